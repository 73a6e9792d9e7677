use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::{GradeService, invalidate_grade_cache};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::UpdateGradeRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_score;

pub async fn update_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: Uuid,
    update_data: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let existing = match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => grade,
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

    // 教师只能更新自己给出的评分
    if RequireJWT::extract_user_role(request) == Some(UserRole::Teacher)
        && RequireJWT::extract_user_id(request) != Some(existing.grader_id)
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only update grades you created",
        )));
    }

    // 无论更新哪些字段，校内用户都只能操作本校项目的评分
    let project = match storage.get_project_by_id(existing.project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            )));
        }
        Err(e) => {
            error!("Failed to get project {}: {}", existing.project_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching project",
                )),
            );
        }
    };
    if let Some(own_school) = RequireJWT::extract_user_school_id(request)
        && project.school_id != own_school
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    // 新分数须落在项目满分范围内
    if let Some(score) = update_data.score
        && let Err(msg) = validate_score(score, project.max_score)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeScoreInvalid, msg)));
    }

    match storage.update_grade(grade_id, update_data).await {
        Ok(Some(grade)) => {
            invalidate_grade_cache(&cache, grade_id, existing.project_id, existing.student_id)
                .await;
            info!("Grade {} updated successfully", grade_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(e) => {
            error!("Failed to update grade {}: {}", grade_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update grade: {e}"),
                )),
            )
        }
    }
}
