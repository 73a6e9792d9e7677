use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};

use super::FeedbackService;
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::common::PaginationQuery;
use crate::models::feedback::requests::{FeedbackListQuery, FeedbackQueryParams};
use crate::models::feedback::responses::FeedbackListResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 集合缓存键
///
/// 只有默认分页下的单一关联查询（某项目的反馈或某反馈的回复首页）走集合缓存，
/// 其余分页/排序组合无法被失效逻辑枚举，直接查库。
fn collection_cache_key(params: &FeedbackQueryParams) -> Option<String> {
    let defaults = PaginationQuery::default();
    if params.pagination.page != defaults.page
        || params.pagination.limit != defaults.limit
        || params.pagination.sort_by.is_some()
        || params.pagination.sort_order.is_some()
    {
        return None;
    }
    match (params.project_id, params.parent_id) {
        (Some(project_id), None) => Some(format!("feedback:project:{project_id}")),
        (None, Some(parent_id)) => Some(format!("feedback:parent:{parent_id}")),
        _ => None,
    }
}

pub async fn list_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    params: FeedbackQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let own_school = RequireJWT::extract_user_school_id(request);

    // 校内用户按关联过滤时，关联对象必须属于本校
    if let Some(own_school) = own_school {
        if let Some(project_id) = params.project_id {
            match storage.get_project_by_id(project_id).await {
                Ok(Some(project)) if project.school_id == own_school => {}
                Ok(Some(_)) => {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::Forbidden,
                        "Access denied.",
                    )));
                }
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::ProjectNotFound,
                        "Project not found",
                    )));
                }
                Err(e) => {
                    error!("Failed to get project {}: {}", project_id, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching project",
                        ),
                    ));
                }
            }
        }
        if let Some(parent_id) = params.parent_id {
            let parent = match storage.get_feedback_by_id(parent_id).await {
                Ok(Some(parent)) => parent,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::FeedbackNotFound,
                        "Parent feedback not found",
                    )));
                }
                Err(e) => {
                    error!("Failed to get parent feedback {}: {}", parent_id, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching parent feedback",
                        ),
                    ));
                }
            };
            if let Err(resp) = super::get::check_feedback_access(&storage, request, &parent).await
            {
                return Ok(resp);
            }
        }
    }

    let cache_key = collection_cache_key(&params);

    if let Some(key) = &cache_key {
        if let CacheResult::Found(json) = cache.get_raw(key).await {
            match serde_json::from_str::<FeedbackListResponse>(&json) {
                Ok(response) => {
                    debug!("Feedback list served from cache key {}", key);
                    return Ok(HttpResponse::Ok().json(ApiResponse::success(
                        response,
                        "Feedback listed successfully",
                    )));
                }
                Err(_) => {
                    cache.remove(key).await;
                }
            }
        }
    }

    // status 不开放给查询参数，存储层默认排除已删除反馈
    let query = FeedbackListQuery {
        page: Some(params.pagination.page),
        limit: Some(params.pagination.limit),
        sort_by: params.pagination.sort_by,
        sort_order: params.pagination.sort_order,
        school_id: own_school,
        project_id: params.project_id,
        parent_id: params.parent_id,
        status: None,
    };

    match storage.list_feedback_with_pagination(query).await {
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
                "Feedback listed successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list feedback: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list feedback: {e}"),
                )),
            )
        }
    }
}
