use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::DepartmentService;
use crate::middlewares::RequireJWT;
use crate::models::departments::requests::{DepartmentListQuery, DepartmentQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_departments(
    service: &DepartmentService,
    request: &HttpRequest,
    params: DepartmentQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 校内用户强制限定在本校
    let school_id = match RequireJWT::extract_user_school_id(request) {
        Some(own_school) => Some(own_school),
        None => params.school_id,
    };

    let query = DepartmentListQuery {
        page: Some(params.pagination.page),
        limit: Some(params.pagination.limit),
        sort_by: params.pagination.sort_by,
        sort_order: params.pagination.sort_order,
        school_id,
        search: params.search,
    };

    match storage.list_departments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Departments listed successfully",
        ))),
        Err(e) => {
            error!("Failed to list departments: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list departments: {e}"),
                )),
            )
        }
    }
}
