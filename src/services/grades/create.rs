use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::{GradeService, invalidate_grade_cache};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::projects::entities::Project;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_score;

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_data: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let uid = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Unauthorized: missing user id",
            )));
        }
    };

    // 项目、学生与分数的前置校验
    if let Err(resp) = validate_grade_entry(
        &storage,
        RequireJWT::extract_user_school_id(request),
        &grade_data,
    )
    .await
    {
        return Ok(resp);
    }

    // 每个 (项目, 学生) 至多一条评分
    match storage
        .get_grade_by_project_and_student(grade_data.project_id, grade_data.student_id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::GradeAlreadyExists,
                "A grade already exists for this project and student",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing grade: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking existing grade",
                )),
            );
        }
    }

    match storage.create_grade(uid, grade_data).await {
        Ok(grade) => {
            // 新评分使按项目/按学生的集合缓存过期
            invalidate_grade_cache(
                &service.get_cache(request),
                grade.id,
                grade.project_id,
                grade.student_id,
            )
            .await;
            info!(
                "Grade created for project {} student {} by {}",
                grade.project_id, grade.student_id, uid
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(grade, "Grade created successfully")))
        }
        Err(e) => {
            let msg = format!("Grade creation failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::GradeAlreadyExists,
                    "A grade already exists for this project and student",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}

/// 校验一条评分数据的项目、学生与分数
///
/// 批量创建复用同一套校验，保证单条与批量行为一致。
pub(super) async fn validate_grade_entry(
    storage: &Arc<dyn Storage>,
    own_school: Option<Uuid>,
    grade_data: &CreateGradeRequest,
) -> Result<Project, HttpResponse> {
    let project = match storage.get_project_by_id(grade_data.project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                format!("Project {} not found", grade_data.project_id),
            )));
        }
        Err(e) => {
            error!("Failed to get project {}: {}", grade_data.project_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching project",
                )),
            );
        }
    };

    // 校内用户只能给本校项目评分
    if let Some(own_school) = own_school
        && project.school_id != own_school
    {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    match storage.get_student_by_id(grade_data.student_id).await {
        Ok(Some(student)) => {
            if student.school_id != project.school_id {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    format!(
                        "Student {} does not belong to the project's school",
                        grade_data.student_id
                    ),
                )));
            }
        }
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                format!("Student {} not found", grade_data.student_id),
            )));
        }
        Err(e) => {
            error!("Failed to get student {}: {}", grade_data.student_id, e);
            return Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching student",
                )),
            );
        }
    }

    if let Err(msg) = validate_score(grade_data.score, project.max_score) {
        return Err(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeScoreInvalid, msg)));
    }

    Ok(project)
}
