use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::BlockService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_block(
    service: &BlockService,
    request: &HttpRequest,
    block_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 校内用户只能删除本校楼栋
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

    match storage.delete_block(block_id).await {
        Ok(true) => {
            info!("Block {} deleted successfully", block_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Block deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BlockNotFound,
            "Block not found",
        ))),
        Err(e) => {
            let msg = format!("Failed to delete block: {e}");
            error!("{}", msg);
            if msg.contains("FOREIGN KEY constraint failed") {
                // 仍有教室挂在该楼栋下
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Block still has classrooms attached",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
