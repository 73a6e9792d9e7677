use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::get::check_feedback_access;
use super::{FeedbackService, invalidate_feedback_cache};
use crate::middlewares::RequireJWT;
use crate::models::feedback::entities::FeedbackStatus;
use crate::models::feedback::requests::UpdateFeedbackRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_feedback(
    service: &FeedbackService,
    request: &HttpRequest,
    feedback_id: Uuid,
    update_data: UpdateFeedbackRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let existing = match storage.get_feedback_by_id(feedback_id).await {
        Ok(Some(feedback)) if feedback.status != FeedbackStatus::Deleted => feedback,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FeedbackNotFound,
                "Feedback not found",
            )));
        }
        Err(e) => {
            error!("Failed to get feedback {}: {}", feedback_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching feedback",
                )),
            );
        }
    };

    // 校内用户只能修改本校项目下的反馈
    if let Err(resp) = check_feedback_access(&storage, request, &existing).await {
        return Ok(resp);
    }

    // 作者本人或管理员才能修改
    let is_admin = RequireJWT::extract_user_role(request) == Some(UserRole::Admin);
    if !is_admin && RequireJWT::extract_user_id(request) != Some(existing.author_id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only update your own feedback",
        )));
    }

    if let Some(ref content) = update_data.content
        && content.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Feedback content cannot be empty",
        )));
    }

    // 删除状态只能通过删除接口到达
    if update_data.status == Some(FeedbackStatus::Deleted) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Use the delete endpoint to remove feedback",
        )));
    }

    match storage.update_feedback(feedback_id, update_data).await {
        Ok(Some(feedback)) => {
            invalidate_feedback_cache(&cache, &feedback).await;
            info!("Feedback {} updated successfully", feedback_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(feedback, "Feedback updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FeedbackNotFound,
            "Feedback not found",
        ))),
        Err(e) => {
            error!("Failed to update feedback {}: {}", feedback_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update feedback: {e}"),
                )),
            )
        }
    }
}
