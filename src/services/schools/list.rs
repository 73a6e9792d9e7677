use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SchoolService;
use crate::models::schools::requests::{SchoolListQuery, SchoolQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_schools(
    service: &SchoolService,
    request: &HttpRequest,
    params: SchoolQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let query = SchoolListQuery {
        page: Some(params.pagination.page),
        limit: Some(params.pagination.limit),
        sort_by: params.pagination.sort_by,
        sort_order: params.pagination.sort_order,
        search: params.search,
    };

    match storage.list_schools_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Schools listed successfully",
        ))),
        Err(e) => {
            error!("Failed to list schools: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list schools: {e}"),
                )),
            )
        }
    }
}
