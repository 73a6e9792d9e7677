use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};
use uuid::Uuid;

use super::DepartmentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_department(
    service: &DepartmentService,
    request: &HttpRequest,
    department_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 校内用户只能删除本校院系
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

    match storage.delete_department(department_id).await {
        Ok(true) => {
            info!("Department {} deleted successfully", department_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Department deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department not found",
        ))),
        Err(e) => {
            error!("Failed to delete department {}: {}", department_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete department: {e}"),
                )),
            )
        }
    }
}
