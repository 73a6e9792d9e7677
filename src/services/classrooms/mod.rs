pub mod bulk_delete;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::classrooms::requests::{
    BulkDeleteClassroomRequest, ClassroomQueryParams, CreateClassroomRequest,
    UpdateClassroomRequest,
};
use crate::storage::Storage;

pub struct ClassroomService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassroomService {
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

    // 创建教室
    pub async fn create_classroom(
        &self,
        request: &HttpRequest,
        classroom_data: CreateClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_classroom(self, request, classroom_data).await
    }

    // 获取教室详情
    pub async fn get_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_classroom(self, request, classroom_id).await
    }

    // 获取教室列表
    pub async fn list_classrooms(
        &self,
        request: &HttpRequest,
        params: ClassroomQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classrooms(self, request, params).await
    }

    // 更新教室
    pub async fn update_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: Uuid,
        update_data: UpdateClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_classroom(self, request, classroom_id, update_data).await
    }

    // 删除教室
    pub async fn delete_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_classroom(self, request, classroom_id).await
    }

    // 批量删除教室（原子操作）
    pub async fn bulk_delete_classrooms(
        &self,
        request: &HttpRequest,
        bulk_data: BulkDeleteClassroomRequest,
    ) -> ActixResult<HttpResponse> {
        bulk_delete::bulk_delete_classrooms(self, request, bulk_data).await
    }
}
