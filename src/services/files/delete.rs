use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::fs;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_file(
    service: &FileService,
    request: &HttpRequest,
    file_id: Uuid,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_file_by_id(file_id).await {
        Ok(Some(file)) => {
            // 上传者本人或管理员才能删除
            let is_admin = RequireJWT::extract_user_role(request) == Some(UserRole::Admin);
            if !is_admin && RequireJWT::extract_user_id(request) != Some(file.uploader_id) {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::Forbidden,
                    "You can only delete files you uploaded",
                )));
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            error!("Failed to get file {}: {}", file_id, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching file",
                )),
            );
        }
    }

    match storage.delete_file(file_id).await {
        Ok(true) => {
            // 磁盘文件清理失败不影响删除结果，仅留日志
            let file_path = format!("{}/{}", AppConfig::get().upload.dir, file_id);
            if let Err(e) = fs::remove_file(&file_path) {
                warn!("Failed to remove file {} from disk: {}", file_path, e);
            }
            info!("File {} deleted successfully", file_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "File deleted successfully",
            )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "File not found",
        ))),
        Err(e) => {
            error!("Failed to delete file {}: {}", file_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete file: {e}"),
                )),
            )
        }
    }
}
