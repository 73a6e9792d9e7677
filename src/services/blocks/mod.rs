pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::blocks::requests::{BlockQueryParams, CreateBlockRequest, UpdateBlockRequest};
use crate::storage::Storage;

pub struct BlockService {
    storage: Option<Arc<dyn Storage>>,
}

impl BlockService {
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

    // 创建楼栋
    pub async fn create_block(
        &self,
        request: &HttpRequest,
        block_data: CreateBlockRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_block(self, request, block_data).await
    }

    // 获取楼栋详情
    pub async fn get_block(
        &self,
        request: &HttpRequest,
        block_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_block(self, request, block_id).await
    }

    // 获取楼栋列表
    pub async fn list_blocks(
        &self,
        request: &HttpRequest,
        params: BlockQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_blocks(self, request, params).await
    }

    // 更新楼栋
    pub async fn update_block(
        &self,
        request: &HttpRequest,
        block_id: Uuid,
        update_data: UpdateBlockRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_block(self, request, block_id, update_data).await
    }

    // 删除楼栋
    pub async fn delete_block(
        &self,
        request: &HttpRequest,
        block_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_block(self, request, block_id).await
    }
}
