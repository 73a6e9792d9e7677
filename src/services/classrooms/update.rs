use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::ClassroomService;
use crate::middlewares::RequireJWT;
use crate::models::classrooms::requests::UpdateClassroomRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: Uuid,
    update_data: UpdateClassroomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => classroom,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ClassroomNotFound,
                "Classroom not found",
            )));
        }
        Err(e) => {
            error!("Failed to get classroom {}: {}", classroom_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching classroom",
                )),
            );
        }
    };

    // 校内用户只能更新本校教室
    if let Some(own_school) = RequireJWT::extract_user_school_id(request)
        && existing.school_id != own_school
    {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    if let Some(ref name) = update_data.name
        && name.trim().is_empty()
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Classroom name cannot be empty",
        )));
    }

    if let Some(capacity) = update_data.capacity
        && capacity <= 0
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Classroom capacity must be positive",
        )));
    }

    // 迁移楼栋时目标楼栋必须存在且同校
    if let Some(block_id) = update_data.block_id {
        match storage.get_block_by_id(block_id).await {
            Ok(Some(block)) => {
                if block.school_id != existing.school_id {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::BadRequest,
                        "Target block belongs to a different school",
                    )));
                }
            }
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

    match storage.update_classroom(classroom_id, update_data).await {
        Ok(Some(classroom)) => {
            info!("Classroom {} updated successfully", classroom_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(classroom, "Classroom updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "Classroom not found",
        ))),
        Err(e) => {
            error!("Failed to update classroom {}: {}", classroom_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update classroom: {e}"),
                )),
            )
        }
    }
}
