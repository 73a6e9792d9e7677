pub mod delete;
pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::storage::Storage;

pub struct FileService {
    storage: Option<Arc<dyn Storage>>,
}

impl FileService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 上传文件
    pub async fn upload_file(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    // 下载文件
    pub async fn download_file(
        &self,
        request: &HttpRequest,
        file_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, file_id).await
    }

    // 删除文件（元数据与磁盘内容一并移除）
    pub async fn delete_file(
        &self,
        request: &HttpRequest,
        file_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_file(self, request, file_id).await
    }
}
