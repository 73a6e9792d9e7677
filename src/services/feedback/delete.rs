use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::get::check_feedback_access;
use super::{FeedbackService, invalidate_feedback_cache};
use crate::middlewares::RequireJWT;
use crate::models::feedback::entities::FeedbackStatus;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

// 软删除：行保留，状态改为 deleted，线程中的回复不受影响
pub async fn delete_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let existing = match storage.get_feedback_by_id(feedback_id).await {
        Ok(Some(feedback)) if feedback.status != FeedbackStatus::Deleted => {
            // 作者本人或管理员才能删除
            let is_admin = RequireJWT::extract_user_role(request) == Some(UserRole::Admin);
            if !is_admin && RequireJWT::extract_user_id(request) != Some(feedback.author_id) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "You can only delete your own feedback",
                )));
            }
            feedback
        }
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FeedbackNotFound,
                "Feedback not found",
            )));
        }
        Err(e) => {
            error!("Failed to get feedback {}: {}", feedback_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching feedback",
                )),
            );
        }
    };

    // 校内用户只能删除本校项目下的反馈
    if let Err(resp) = check_feedback_access(&storage, request, &existing).await {
        return Ok(resp);
    }

    match storage.delete_feedback(feedback_id).await {
        Ok(true) => {
            invalidate_feedback_cache(&cache, &existing).await;
            info!("Feedback {} deleted successfully", feedback_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Feedback deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "Feedback not found",
        ))),
        Err(e) => {
            error!("Failed to delete feedback {}: {}", feedback_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete feedback: {e}"),
                )),
            )
        }
    }
}
