use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{FeedbackService, invalidate_feedback_cache};
use crate::middlewares::RequireJWT;
use crate::models::feedback::entities::FeedbackStatus;
use crate::models::feedback::requests::CreateFeedbackRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 反馈内容最大长度（字符数）
const MAX_CONTENT_LENGTH: usize = 10_000;

pub async fn create_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_data: CreateFeedbackRequest,
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

    if feedback_data.content.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Feedback content cannot be empty",
        )));
    }
    if feedback_data.content.chars().count() > MAX_CONTENT_LENGTH {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Feedback content may contain at most {MAX_CONTENT_LENGTH} characters"),
        )));
    }

    // 项目必须存在，且校内用户只能在本校项目下发言
    match storage.get_project_by_id(feedback_data.project_id).await {
        Ok(Some(project)) => {
            if let Some(own_school) = RequireJWT::extract_user_school_id(request)
                && project.school_id != own_school
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Access denied.",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ProjectNotFound,
                "Project not found",
            )));
        }
        Err(e) => {
            error!("Failed to get project {}: {}", feedback_data.project_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching project",
                )),
            );
        }
    }

    // 回复时父反馈必须存在、未删除且属于同一项目
    if let Some(parent_id) = feedback_data.parent_id {
        match storage.get_feedback_by_id(parent_id).await {
            Ok(Some(parent)) => {
                if parent.status == FeedbackStatus::Deleted {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::FeedbackNotFound,
                        "Parent feedback not found",
                    )));
                }
                if parent.project_id != feedback_data.project_id {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "Parent feedback belongs to a different project",
                    )));
                }
            }
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
        }
    }

    match storage.create_feedback(uid, feedback_data).await {
        Ok(feedback) => {
            // 新反馈使按项目/按父反馈的集合缓存过期
            invalidate_feedback_cache(&service.get_cache(request), &feedback).await;
            info!(
                "Feedback {} created on project {} by {}",
                feedback.id, feedback.project_id, uid
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(feedback, "Feedback created successfully")))
        }
        Err(e) => {
            let msg = format!("Feedback creation failed: {e}");
            error!("{}", msg);
            if msg.contains("FOREIGN KEY constraint failed") {
                Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Referenced project or parent feedback does not exist",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
