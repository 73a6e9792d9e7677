use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, error};
use uuid::Uuid;

use super::FeedbackService;
use crate::cache::CacheResult;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::feedback::entities::{FeedbackStatus, ProjectFeedback};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn get_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let cache_key = format!("feedback:{feedback_id}");

    if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<ProjectFeedback>(&json) {
            Ok(feedback) => {
                if let Err(resp) = check_feedback_access(&storage, request, &feedback).await {
                    return Ok(resp);
                }
                debug!("Feedback {} served from cache", feedback_id);
                return Ok(HttpResponse::Ok()
                    .json(ApiResponse::success(feedback, "Feedback found successfully")));
            }
            Err(_) => {
                cache.remove(&cache_key).await;
            }
        }
    }

    match storage.get_feedback_by_id(feedback_id).await {
        // 已删除的反馈对外表现为不存在
        Ok(Some(feedback)) if feedback.status != FeedbackStatus::Deleted => {
            if let Err(resp) = check_feedback_access(&storage, request, &feedback).await {
                return Ok(resp);
            }

            if let Ok(json) = serde_json::to_string(&feedback) {
                cache
                    .insert_raw(cache_key, json, AppConfig::get().cache.default_ttl)
                    .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(feedback, "Feedback found successfully")))
        }
        Ok(_) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "Feedback not found",
        ))),
        Err(e) => {
            error!("Failed to get feedback {}: {}", feedback_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching feedback",
                )),
            )
        }
    }
}

/// 校内用户只能访问本校项目下的反馈
pub(super) async fn check_feedback_access(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    feedback: &ProjectFeedback,
) -> Result<(), HttpResponse> {
    let Some(own_school) = RequireJWT::extract_user_school_id(request) else {
        return Ok(());
    };

    match storage.get_project_by_id(feedback.project_id).await {
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
            error!("Failed to get project {}: {}", feedback.project_id, e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching project",
                )),
            )
        }
    }
}
