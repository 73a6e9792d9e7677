use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::{ProjectService, invalidate_project_cache};
use crate::middlewares::RequireJWT;
use crate::models::projects::requests::CreateProjectRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn create_project(
    service: &ProjectService,
    request: &HttpRequest,
    mut project_data: CreateProjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let role = RequireJWT::extract_user_role(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    if project_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Project title cannot be empty",
        )));
    }

    if let Some(max_score) = project_data.max_score
        && (!max_score.is_finite() || max_score <= 0.0)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::GradeScoreInvalid,
            "max_score must be a positive number",
        )));
    }
    // 教师只能以自己名义创建；管理员可为指定教师创建
    if let Err(resp) = resolve_teacher(&role, uid, &mut project_data, &storage).await {
        return Ok(resp);
    }

    // 校内用户的项目归属本校
    if let Some(own_school) = RequireJWT::extract_user_school_id(request) {
        project_data.school_id = Some(own_school);
    }
    if project_data.school_id.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "school_id is required",
        )));
    }

    match storage.create_project(project_data).await {
        Ok(project) => {
            // 新项目使学校集合缓存过期
            invalidate_project_cache(&service.get_cache(request), project.id, project.school_id)
                .await;
            info!("Project {} created successfully by {}", project.title, uid);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(project, "Project created successfully")))
        }
        Err(e) => {
            let msg = format!("Project creation failed: {e}");
            error!("{}", msg);
            if msg.contains("FOREIGN KEY constraint failed") {
                Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Referenced school or teacher does not exist",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}

/// 解析项目负责教师
async fn resolve_teacher(
    role: &Option<UserRole>,
    uid: Uuid,
    project_data: &mut CreateProjectRequest,
    storage: &Arc<dyn Storage>,
) -> Result<(), HttpResponse> {
    match role {
        Some(UserRole::Admin) => {
            let teacher_id = match project_data.teacher_id {
                Some(id) => id,
                None => {
                    return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "teacher_id is required when an admin creates a project",
                    )));
                }
            };
            match storage.get_user_by_id(teacher_id).await {
                Ok(Some(user)) => {
                    if user.role != UserRole::Teacher {
                        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::ProjectPermissionDenied,
                            "Admin can only create projects for teachers",
                        )));
                    }
                }
                Ok(None) => {
                    return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::UserNotFound,
                        "Teacher not found",
                    )));
                }
                Err(e) => {
                    error!("Failed to get user by id: {}", e);
                    return Err(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching teacher",
                        ),
                    ));
                }
            }
        }
        Some(UserRole::Teacher) => {
            if let Some(teacher_id) = project_data.teacher_id
                && teacher_id != uid
            {
                return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::ProjectPermissionDenied,
                    "You do not have permission to create a project for another teacher",
                )));
            }
            project_data.teacher_id = Some(uid);
        }
        _ => {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::ProjectPermissionDenied,
                "You do not have permission to create a project",
            )));
        }
    }
    Ok(())
}
