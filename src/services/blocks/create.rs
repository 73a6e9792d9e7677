use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::BlockService;
use crate::middlewares::RequireJWT;
use crate::models::blocks::requests::CreateBlockRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_block(
    service: &BlockService,
    request: &HttpRequest,
    mut block_data: CreateBlockRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if block_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Block name cannot be empty",
        )));
    }

    // 校内用户创建的楼栋归属本校
    if let Some(own_school) = RequireJWT::extract_user_school_id(request) {
        block_data.school_id = Some(own_school);
    }
    if block_data.school_id.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "school_id is required",
        )));
    }

    match storage.create_block(block_data).await {
        Ok(block) => {
            info!("Block {} created successfully", block.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(block, "Block created successfully")))
        }
        Err(e) => {
            let msg = format!("Block creation failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                // 同一学校内楼栋名唯一
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::BlockAlreadyExists,
                    "A block with this name already exists in this school",
                )))
            } else if msg.contains("FOREIGN KEY constraint failed") {
                Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::SchoolNotFound,
                    "Referenced school does not exist",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
