use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::BlockService;
use crate::middlewares::RequireJWT;
use crate::models::blocks::requests::UpdateBlockRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_block(
    service: &BlockService,
    request: &HttpRequest,
    block_id: Uuid,
    update_data: UpdateBlockRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 校内用户只能更新本校楼栋
    if let Some(own_school) = RequireJWT::extract_user_school_id(request) {
        match storage.get_block_by_id(block_id).await {
            Ok(Some(block)) if block.school_id != own_school => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Access denied.",
                )));
            }
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::BlockNotFound,
                    "Block not found",
                )));
            }
            Err(e) => {
                error!("Failed to get block {}: {}", block_id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while fetching block",
                    )),
                );
            }
        }
    }

    if let Some(ref name) = update_data.name
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Block name cannot be empty",
        )));
    }

    match storage.update_block(block_id, update_data).await {
        Ok(Some(block)) => {
            info!("Block {} updated successfully", block_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(block, "Block updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BlockNotFound,
            "Block not found",
        ))),
        Err(e) => {
            let msg = format!("Block update failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::BlockAlreadyExists,
                    "A block with this name already exists in this school",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
