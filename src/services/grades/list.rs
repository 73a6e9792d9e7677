use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};

use super::GradeService;
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::common::PaginationQuery;
use crate::models::grades::requests::{GradeListQuery, GradeQueryParams};
use crate::models::grades::responses::GradeListResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 集合缓存键
///
/// 只有默认分页下的单一关联查询（某项目或某学生的首页）走集合缓存，
/// 其余分页/排序组合无法被失效逻辑枚举，直接查库。
fn collection_cache_key(params: &GradeQueryParams) -> Option<String> {
    let defaults = PaginationQuery::default();
    if params.pagination.page != defaults.page
        || params.pagination.limit != defaults.limit
        || params.pagination.sort_by.is_some()
        || params.pagination.sort_order.is_some()
    {
        return None;
    }
    match (params.project_id, params.student_id) {
        (Some(project_id), None) => Some(format!("grade:project:{project_id}")),
        (None, Some(student_id)) => Some(format!("grade:student:{student_id}")),
        _ => None,
    }
}

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    params: GradeQueryParams,
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
        if let Some(student_id) = params.student_id {
            match storage.get_student_by_id(student_id).await {
                Ok(Some(student)) if student.school_id == own_school => {}
                Ok(Some(_)) => {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::Forbidden,
                        "Access denied.",
                    )));
                }
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::StudentNotFound,
                        "Student not found",
                    )));
                }
                Err(e) => {
                    error!("Failed to get student {}: {}", student_id, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching student",
                        ),
                    ));
                }
            }
        }
    }

    let cache_key = collection_cache_key(&params);

    if let Some(key) = &cache_key {
        if let CacheResult::Found(json) = cache.get_raw(key).await {
            match serde_json::from_str::<GradeListResponse>(&json) {
                Ok(response) => {
                    debug!("Grade list served from cache key {}", key);
                    return Ok(HttpResponse::Ok()
                        .json(ApiResponse::success(response, "Grades listed successfully")));
                }
                Err(_) => {
                    cache.remove(key).await;
                }
            }
        }
    }

    let query = GradeListQuery {
        page: Some(params.pagination.page),
        limit: Some(params.pagination.limit),
        sort_by: params.pagination.sort_by,
        sort_order: params.pagination.sort_order,
        school_id: own_school,
        project_id: params.project_id,
        student_id: params.student_id,
    };

    match storage.list_grades_with_pagination(query).await {
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
                "Grades listed successfully",
            )))
        }
        Err(e) => {
            error!("Failed to list grades: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list grades: {e}"),
                )),
            )
        }
    }
}
