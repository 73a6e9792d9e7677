use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};
use uuid::Uuid;

use super::GradeService;
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::grades::entities::ProjectGrade;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn get_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let cache_key = format!("grade:{grade_id}");

    if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<ProjectGrade>(&json) {
            Ok(grade) => {
                if let Err(resp) = check_grade_access(&storage, request, &grade).await {
                    return Ok(resp);
                }
                debug!("Grade {} served from cache", grade_id);
                return Ok(
                    HttpResponse::Ok().json(ApiResponse::success(grade, "Grade found successfully"))
                );
            }
            Err(_) => {
                cache.remove(&cache_key).await;
            }
        }
    }

    match storage.get_grade_by_id(grade_id).await {
        Ok(Some(grade)) => {
            if let Err(resp) = check_grade_access(&storage, request, &grade).await {
                return Ok(resp);
            }

            if let Ok(json) = serde_json::to_string(&grade) {
                cache
                    .insert_raw(cache_key, json, AppConfig::get().cache.default_ttl)
                    .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade found successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::GradeNotFound,
            "Grade not found",
        ))),
        Err(e) => {
            error!("Failed to get grade {}: {}", grade_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching grade",
                )),
            )
        }
    }
}

/// 校内用户只能访问本校项目下的评分
pub(super) async fn check_grade_access(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    grade: &ProjectGrade,
) -> Result<(), HttpResponse> {
    let Some(own_school) = RequireJWT::extract_user_school_id(request) else {
        return Ok(());
    };

    match storage.get_project_by_id(grade.project_id).await {
        Ok(Some(project)) if project.school_id == own_school => Ok(()),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        ))),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProjectNotFound,
            "Project not found",
        ))),
        Err(e) => {
            error!("Failed to get project {}: {}", grade.project_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching project",
                )),
            )
        }
    }
}
