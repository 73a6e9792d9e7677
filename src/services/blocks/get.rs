use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;
use uuid::Uuid;

use super::BlockService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_block(
    service: &BlockService,
    request: &HttpRequest,
    block_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_block_by_id(block_id).await {
        Ok(Some(block)) => {
            // 校内用户只能访问本校楼栋
            if let Some(own_school) = RequireJWT::extract_user_school_id(request)
                && block.school_id != own_school
            {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Access denied.",
                )));
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(block, "Block found successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BlockNotFound,
            "Block not found",
        ))),
        Err(e) => {
            error!("Failed to get block {}: {}", block_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching block",
                )),
            )
        }
    }
}
