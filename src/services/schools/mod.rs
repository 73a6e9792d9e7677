pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::schools::requests::{CreateSchoolRequest, SchoolQueryParams, UpdateSchoolRequest};
use crate::storage::Storage;

pub struct SchoolService {
    storage: Option<Arc<dyn Storage>>,
}

impl SchoolService {
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

    // 创建学校
    pub async fn create_school(
        &self,
        request: &HttpRequest,
        school_data: CreateSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_school(self, request, school_data).await
    }

    // 获取学校详情
    pub async fn get_school(
        &self,
        request: &HttpRequest,
        school_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_school(self, request, school_id).await
    }

    // 获取学校列表
    pub async fn list_schools(
        &self,
        request: &HttpRequest,
        params: SchoolQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_schools(self, request, params).await
    }

    // 更新学校信息
    pub async fn update_school(
        &self,
        request: &HttpRequest,
        school_id: Uuid,
        update_data: UpdateSchoolRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_school(self, request, school_id, update_data).await
    }

    // 删除学校
    pub async fn delete_school(
        &self,
        request: &HttpRequest,
        school_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_school(self, request, school_id).await
    }
}
