use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};
use uuid::Uuid;

use super::ProjectService;
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::common::PaginationQuery;
use crate::models::projects::requests::{ProjectListQuery, ProjectQueryParams};
use crate::models::projects::responses::ProjectListResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 集合缓存键
///
/// 只有默认分页下无附加过滤的整校查询走集合缓存，
/// 其余分页/过滤组合无法被失效逻辑枚举，直接查库。
fn collection_cache_key(params: &ProjectQueryParams, school_id: Option<Uuid>) -> Option<String> {
    let defaults = PaginationQuery::default();
    if params.pagination.page != defaults.page
        || params.pagination.limit != defaults.limit
        || params.pagination.sort_by.is_some()
        || params.pagination.sort_order.is_some()
        || params.teacher_id.is_some()
        || params.status.is_some()
        || params.search.is_some()
    {
        return None;
    }
    school_id.map(|id| format!("project:school:{id}"))
}

pub async fn list_projects(
    service: &ProjectService,
    request: &HttpRequest,
    params: ProjectQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    // 校内用户强制限定在本校
    let school_id = match RequireJWT::extract_user_school_id(request) {
        Some(own_school) => Some(own_school),
        None => params.school_id,
    };

    let cache_key = collection_cache_key(&params, school_id);

    if let Some(key) = &cache_key {
        if let CacheResult::Found(json) = cache.get_raw(key).await {
            match serde_json::from_str::<ProjectListResponse>(&json) {
                Ok(response) => {
                    debug!("Project list served from cache key {}", key);
                    return Ok(HttpResponse::Ok().json(ApiResponse::success(
                        response,
                        "Projects listed successfully",
                    )));
                }
                Err(_) => {
                    cache.remove(key).await;
                }
            }
        }
    }

    let query = ProjectListQuery {
        page: Some(params.pagination.page),
        limit: Some(params.pagination.limit),
        sort_by: params.pagination.sort_by,
        sort_order: params.pagination.sort_order,
        school_id,
        teacher_id: params.teacher_id,
        status: params.status,
        search: params.search,
    };

    match storage.list_projects_with_pagination(query).await {
        Ok(response) => {
            if let Some(key) = cache_key
                && let Ok(json) = serde_json::to_string(&response)
            {
                cache
                    .insert_raw(key, json, AppConfig::get().cache.default_ttl)
                    .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Projects listed successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list projects: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list projects: {e}"),
                )),
            )
        }
    }
}
