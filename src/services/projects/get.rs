use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};
use uuid::Uuid;

use super::ProjectService;
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::projects::entities::Project;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_project(
    service: &ProjectService,
    request: &HttpRequest,
    project_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let cache_key = format!("project:{project_id}");

    // 先查缓存
    if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<Project>(&json) {
            Ok(project) => {
                if let Some(resp) = check_project_access(request, &project) {
                    return Ok(resp);
                }
                debug!("Project {} served from cache", project_id);
                return Ok(HttpResponse::Ok()
                    .json(ApiResponse::success(project, "Project found successfully")));
            }
            Err(_) => {
                cache.remove(&cache_key).await;
            }
        }
    }

    match storage.get_project_by_id(project_id).await {
        Ok(Some(project)) => {
            if let Some(resp) = check_project_access(request, &project) {
                return Ok(resp);
            }

            if let Ok(json) = serde_json::to_string(&project) {
                cache
                    .insert_raw(cache_key, json, AppConfig::get().cache.default_ttl)
                    .await;
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(project, "Project found successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProjectNotFound,
            "Project not found",
        ))),
        Err(e) => {
            error!("Failed to get project {}: {}", project_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching project",
                )),
            )
        }
    }
}

// 校内用户只能访问本校项目
fn check_project_access(request: &HttpRequest, project: &Project) -> Option<HttpResponse> {
    if let Some(own_school) = RequireJWT::extract_user_school_id(request)
        && project.school_id != own_school
    {
        return Some(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }
    None
}
