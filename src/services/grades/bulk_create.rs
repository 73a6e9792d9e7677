use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::GradeService;
use super::create::validate_grade_entry;
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::BulkCreateGradeRequest;
use crate::models::grades::responses::BulkCreateGradeResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 每批最多允许的评分条数
const MAX_BULK_GRADES: usize = 500;

// 批量创建评分
//
// 先对整批做校验，全部通过后在单个事务中写入；
// 任意一条不合法时整批拒绝，不产生部分写入。
pub async fn bulk_create_grades(
    service: &GradeService,
    request: &HttpRequest,
    bulk_data: BulkCreateGradeRequest,
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

    if bulk_data.grades.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Grade list cannot be empty",
        )));
    }
    if bulk_data.grades.len() > MAX_BULK_GRADES {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("A bulk request may contain at most {MAX_BULK_GRADES} grades"),
        )));
    }

    let own_school = RequireJWT::extract_user_school_id(request);

    // 批内 (项目, 学生) 组合查重
    let mut seen = HashSet::new();
    for entry in &bulk_data.grades {
        if !seen.insert((entry.project_id, entry.student_id)) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BulkOperationFailed,
                format!(
                    "Duplicate grade entry for project {} and student {} in request",
                    entry.project_id, entry.student_id
                ),
            )));
        }
    }

    // 逐条校验项目、学生、分数与既有评分，任一失败则整批拒绝
    for entry in &bulk_data.grades {
        if let Err(resp) = validate_grade_entry(&storage, own_school, entry).await {
            return Ok(resp);
        }

        match storage
            .get_grade_by_project_and_student(entry.project_id, entry.student_id)
            .await
        {
            Ok(Some(_)) => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::GradeAlreadyExists,
                    format!(
                        "A grade already exists for project {} and student {}",
                        entry.project_id, entry.student_id
                    ),
                )));
            }
            Ok(None) => {}
            Err(e) => {
                error!("Failed to check existing grade: {}", e);
                return Ok(HttpResponse::InternalServerError().json(
                    ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while checking existing grades",
                    ),
                ));
            }
        }
    }

    match storage.bulk_create_grades(uid, bulk_data.grades).await {
        Ok(grades) => {
            // 提交后按涉及的项目与学生逐一移除集合缓存键
            let cache = service.get_cache(request);
            let touched_projects: HashSet<_> = grades.iter().map(|g| g.project_id).collect();
            let touched_students: HashSet<_> = grades.iter().map(|g| g.student_id).collect();
            for project_id in touched_projects {
                cache.remove(&format!("grade:project:{project_id}")).await;
            }
            for student_id in touched_students {
                cache.remove(&format!("grade:student:{student_id}")).await;
            }
            info!("Bulk created {} grades by {}", grades.len(), uid);
            let response = BulkCreateGradeResponse {
                created: grades.len(),
                items: grades,
            };
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(response, "Grades created successfully")))
        }
        Err(e) => {
            let msg = format!("Bulk grade creation failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::GradeAlreadyExists,
                    "A grade already exists for one of the project/student pairs",
                )))
            } else {
                Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::BulkOperationFailed,
                    msg,
                )))
            }
        }
    }
}
