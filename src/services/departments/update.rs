use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::DepartmentService;
use crate::middlewares::RequireJWT;
use crate::models::departments::requests::UpdateDepartmentRequest;
use crate::models::{ApiResponse, ErrorCode};

pub async fn update_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department_id: Uuid,
    update_data: UpdateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 校内用户只能更新本校院系
    if let Some(own_school) = RequireJWT::extract_user_school_id(request) {
        match storage.get_department_by_id(department_id).await {
            Ok(Some(department)) if department.school_id != own_school => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "Access denied.",
                )));
            }
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::DepartmentNotFound,
                    "Department not found",
                )));
            }
            Err(e) => {
                error!("Failed to get department {}: {}", department_id, e);
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        "Internal server error while fetching department",
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
            "Department name cannot be empty",
        )));
    }

    // 更换负责人时对应用户必须存在
    if let Some(head_user_id) = update_data.head_user_id {
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

    match storage.update_department(department_id, update_data).await {
        Ok(Some(department)) => {
            info!("Department {} updated successfully", department_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                department,
                "Department updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        ))),
        Err(e) => {
            let msg = format!("Department update failed: {e}");
            error!("{}", msg);
            if msg.contains("UNIQUE constraint failed") {
                Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::DepartmentAlreadyExists,
                    "A department with this name already exists in this school",
                )))
            } else {
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(ErrorCode::InternalServerError, msg)))
            }
        }
    }
}
