use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;
use uuid::Uuid;

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => {
            // 非管理员只能查看自己；校内管理员只能查看本校用户
            let requester_id = RequireJWT::extract_user_id(request);
            let requester_role = RequireJWT::extract_user_role(request);
            let requester_school = RequireJWT::extract_user_school_id(request);

            let allowed = match requester_role {
                Some(UserRole::Admin) => {
                    requester_school.is_none() || requester_school == user.school_id
                }
                _ => requester_id == Some(user.id),
            };

            if !allowed {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Access denied.",
                )));
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User retrieved successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            error!("Failed to get user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get user: {e}"),
                )),
            )
        }
    }
}
