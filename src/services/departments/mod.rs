pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentQueryParams, UpdateDepartmentRequest,
};
use crate::storage::Storage;

pub struct DepartmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl DepartmentService {
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

    // 创建院系
    pub async fn create_department(
        &self,
        request: &HttpRequest,
        department_data: CreateDepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, request, department_data).await
    }

    // 获取院系详情
    pub async fn get_department(
        &self,
        request: &HttpRequest,
        department_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_department(self, request, department_id).await
    }

    // 获取院系列表
    pub async fn list_departments(
        &self,
        request: &HttpRequest,
        params: DepartmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_departments(self, request, params).await
    }

    // 更新院系
    pub async fn update_department(
        &self,
        request: &HttpRequest,
        department_id: Uuid,
        update_data: UpdateDepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, request, department_id, update_data).await
    }

    // 删除院系
    pub async fn delete_department(
        &self,
        request: &HttpRequest,
        department_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, request, department_id).await
    }
}
