use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::ClassroomService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 校内用户只能删除本校教室
    if let Some(own_school) = RequireJWT::extract_user_school_id(request) {
        match storage.get_classroom_by_id(classroom_id).await {
            Ok(Some(classroom)) if classroom.school_id != own_school => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Access denied.",
                )));
            }
            Ok(Some(_)) => {}
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
        }
    }

    match storage.delete_classroom(classroom_id).await {
        Ok(true) => {
            info!("Classroom {} deleted successfully", classroom_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Classroom deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassroomNotFound,
            "Classroom not found",
        ))),
        Err(e) => {
            error!("Failed to delete classroom {}: {}", classroom_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete classroom: {e}"),
                )),
            )
        }
    }
}
