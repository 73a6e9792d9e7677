use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::get::check_grade_access;
use super::{GradeService, invalidate_grade_cache};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let existing = match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => {
            // 教师只能删除自己给出的评分
            if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher)
                && RequireJWT::extract_user_id(request) != Some(grade.grader_id)
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "You can only delete grades you created",
                )));
            }
            grade
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GradeNotFound,
                "Grade not found",
            )));
        }
        Err(e) => {
            error!("Failed to get grade {}: {}", grade_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching grade",
                )),
            );
        }
    };

    // 校内用户只能删除本校项目下的评分
    if let Err(resp) = check_grade_access(&storage, request, &existing).await {
        return Ok(resp);
    }

    match storage.delete_grade(grade_id).await {
        Ok(true) => {
            invalidate_grade_cache(&cache, grade_id, existing.project_id, existing.student_id)
                .await;
            info!("Grade {} deleted successfully", grade_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Grade deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(e) => {
            error!("Failed to delete grade {}: {}", grade_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete grade: {e}"),
                )),
            )
        }
    }
}
