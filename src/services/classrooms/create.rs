use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassroomService;
use crate::middlewares::RequireJWT;
use crate::models::classrooms::requests::CreateClassroomRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    mut classroom_data: CreateClassroomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if classroom_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Classroom name cannot be empty",
        )));
    }

    if let Some(capacity) = classroom_data.capacity
        && capacity <= 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Classroom capacity must be positive",
        )));
    }

    // 楼栋必须存在，教室与楼栋必须同校
    let block = match storage.get_block_by_id(classroom_data.block_id).await {
        Ok(Some(block)) => block,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BlockNotFound,
                "Block not found",
            )));
        }
        Err(e) => {
            error!("Failed to get block {}: {}", classroom_data.block_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching block",
                )),
            );
        }
    };

    if let Some(own_school) = RequireJWT::extract_user_school_id(request)
        && block.school_id != own_school
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }
    classroom_data.school_id = Some(block.school_id);

    match storage.create_classroom(classroom_data).await {
        Ok(classroom) => {
            info!("Classroom {} created successfully", classroom.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(classroom, "Classroom created successfully")))
        }
        Err(e) => {
            let msg = format!("Classroom creation failed: {e}");
            error!("{}", msg);
            if msg.contains("FOREIGN KEY constraint failed") {
                Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BlockNotFound,
                    "Referenced block does not exist",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
