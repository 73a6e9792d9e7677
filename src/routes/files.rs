use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::FileService;
use crate::utils::SafeFileId;

// 懒加载的全局 FileService 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn upload_file(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    FILE_SERVICE.upload_file(&request, payload).await
}

pub async fn download_file(request: HttpRequest, file_id: SafeFileId) -> ActixResult<HttpResponse> {
    FILE_SERVICE.download_file(&request, file_id.0).await
}

pub async fn delete_file(request: HttpRequest, file_id: SafeFileId) -> ActixResult<HttpResponse> {
    FILE_SERVICE.delete_file(&request, file_id.0).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middlewares::RequireJWT)
            .wrap(middleware::Compress::default())
            .service(
                web::resource("/upload")
                    .wrap(middlewares::RateLimit::file_upload())
                    .route(web::post().to(upload_file)),
            )
            .route("/{file_id}/download", web::get().to(download_file))
            .route("/{file_id}", web::delete().to(delete_file)),
    );
}
