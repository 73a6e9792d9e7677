use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::{ProjectService, invalidate_project_cache};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let existing = match storage.get_project_by_id(project_id).await {
        Ok(Some(project)) => {
            // 校内用户只能删除本校项目
            if let Some(own_school) = RequireJWT::extract_user_school_id(request)
                && project.school_id != own_school
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Access denied.",
                )));
            }

            // 教师只能删除自己负责的项目
            if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher)
                && RequireJWT::extract_user_id(request) != Some(project.teacher_id)
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ProjectPermissionDenied,
                    "You can only delete your own projects",
                )));
            }
            project
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            )));
        }
        Err(e) => {
            error!("Failed to get project {}: {}", project_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching project",
                )),
            );
        }
    };

    match storage.delete_project(project_id).await {
        Ok(true) => {
            invalidate_project_cache(&cache, project_id, existing.school_id).await;
            info!("Project {} deleted successfully", project_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Project deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProjectNotFound,
            "Project not found",
        ))),
        Err(e) => {
            let msg = format!("Failed to delete project: {e}");
            error!("{}", msg);
            if msg.contains("FOREIGN KEY constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Project still has grades or feedback attached",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
