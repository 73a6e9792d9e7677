use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::{ProjectService, invalidate_project_cache};
use crate::middlewares::RequireJWT;
use crate::models::projects::requests::UpdateProjectRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: Uuid,
    update_data: UpdateProjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let existing = match storage.get_project_by_id(project_id).await {
        Ok(Some(project)) => project,
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

    // 校内用户只能更新本校项目
    if let Some(own_school) = RequireJWT::extract_user_school_id(request)
        && existing.school_id != own_school
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    // 教师只能更新自己负责的项目
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher)
        && RequireJWT::extract_user_id(request) != Some(existing.teacher_id)
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ProjectPermissionDenied,
            "You can only update your own projects",
        )));
    }

    if let Some(ref title) = update_data.title
        && title.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Project title cannot be empty",
        )));
    }

    if let Some(max_score) = update_data.max_score
        && (!max_score.is_finite() || max_score <= 0.0)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeScoreInvalid,
            "max_score must be a positive number",
        )));
    }

    match storage.update_project(project_id, update_data).await {
        Ok(Some(project)) => {
            invalidate_project_cache(&cache, project_id, existing.school_id).await;
            info!("Project {} updated successfully", project_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(project, "Project updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProjectNotFound,
            "Project not found",
        ))),
        Err(e) => {
            error!("Failed to update project {}: {}", project_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update project: {e}"),
                )),
            )
        }
    }
}
