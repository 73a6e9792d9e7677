use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SchoolService;
use crate::models::schools::requests::CreateSchoolRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_school(
    service: &SchoolService,
    request: &HttpRequest,
    school_data: CreateSchoolRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if school_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "School name cannot be empty",
        )));
    }

    // 名称重复检查
    match storage.get_school_by_name(&school_data.name).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SchoolAlreadyExists,
                "School name already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check school name: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while checking school name",
                )),
            );
        }
    }

    match storage.create_school(school_data).await {
        Ok(school) => {
            info!("School {} created successfully", school.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(school, "School created successfully")))
        }
        Err(e) => {
            let msg = format!("School creation failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::SchoolAlreadyExists,
                    "School name already exists",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
