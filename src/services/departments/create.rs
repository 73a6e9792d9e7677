use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::DepartmentService;
use crate::middlewares::RequireJWT;
use crate::models::departments::requests::CreateDepartmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_department(
    service: &DepartmentService,
    request: &HttpRequest,
    mut department_data: CreateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if department_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Department name cannot be empty",
        )));
    }

    // 校内用户创建的院系归属本校
    if let Some(own_school) = RequireJWT::extract_user_school_id(request) {
        department_data.school_id = Some(own_school);
    }
    if department_data.school_id.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "school_id is required",
        )));
    }

    // 指定负责人时对应用户必须存在
    if let Some(head_user_id) = department_data.head_user_id {
        match storage.get_user_by_id(head_user_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::UserNotFound,
                    "Head user not found",
                )));
            }
            Err(e) => {
                error!("Failed to get user {}: {}", head_user_id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while fetching head user",
                    )),
                );
            }
        }
    }

    match storage.create_department(department_data).await {
        Ok(department) => {
            info!("Department {} created successfully", department.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                department,
                "Department created successfully",
            )))
        }
        Err(e) => {
            let msg = format!("Department creation failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                // 同一学校内院系名唯一
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::DepartmentAlreadyExists,
                    "A department with this name already exists in this school",
                )))
            } else if msg.contains("FOREIGN KEY constraint failed") {
                Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::SchoolNotFound,
                    "Referenced school or head user does not exist",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
