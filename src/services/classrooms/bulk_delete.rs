use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassroomService;
use crate::errors::CampusError;
use crate::middlewares::RequireJWT;
use crate::models::classrooms::requests::BulkDeleteClassroomRequest;
use crate::models::classrooms::responses::BulkDeleteClassroomResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 每批最多允许删除的教室数
const MAX_BULK_DELETE: usize = 500;

// 批量删除教室
//
// 任一 ID 不存在时整批中止，不产生部分删除。
pub async fn bulk_delete_classrooms(
    service: &ClassroomService,
    request: &HttpRequest,
    bulk_data: BulkDeleteClassroomRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if bulk_data.ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "ID list cannot be empty",
        )));
    }
    if bulk_data.ids.len() > MAX_BULK_DELETE {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("A bulk request may contain at most {MAX_BULK_DELETE} ids"),
        )));
    }

    // 重复 ID 会使存在性计数失真，直接拒绝
    let mut seen = HashSet::new();
    for id in &bulk_data.ids {
        if !seen.insert(*id) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Duplicate classroom id {id} in request"),
            )));
        }
    }

    // 校内用户只能删除本校教室，任一越权即整批拒绝
    if let Some(own_school) = RequireJWT::extract_user_school_id(request) {
        for id in &bulk_data.ids {
            match storage.get_classroom_by_id(*id).await {
                Ok(Some(classroom)) if classroom.school_id != own_school => {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                        ErrorCode::Forbidden,
                        "Access denied.",
                    )));
                }
                Ok(Some(_)) => {}
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::BulkOperationFailed,
                        format!("Classroom {id} not found, bulk delete aborted"),
                    )));
                }
                Err(e) => {
                    error!("Failed to get classroom {}: {}", id, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Internal server error while fetching classroom",
                        ),
                    ));
                }
            }
        }
    }

    match storage.bulk_delete_classrooms(&bulk_data.ids).await {
        Ok(deleted) => {
            info!("Bulk deleted {} classrooms", deleted);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulkDeleteClassroomResponse { deleted },
                "Classrooms deleted successfully",
            )))
        }
        Err(CampusError::NotFound(msg)) => {
            // 事务内存在性检查失败，整批已回滚
            Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BulkOperationFailed,
                msg,
            )))
        }
        Err(e) => {
            error!("Bulk classroom delete failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete classrooms: {e}"),
                )),
            )
        }
    }
}
