pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::ObjectCache;
use crate::models::projects::requests::{
    CreateProjectRequest, ProjectQueryParams, UpdateProjectRequest,
};
use crate::storage::Storage;

pub struct ProjectService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProjectService {
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

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Cache not found in app data")
            .get_ref()
            .clone()
    }

    // 创建项目
    pub async fn create_project(
        &self,
        request: &HttpRequest,
        project_data: CreateProjectRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_project(self, request, project_data).await
    }

    // 获取项目详情（带缓存）
    pub async fn get_project(
        &self,
        request: &HttpRequest,
        project_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_project(self, request, project_id).await
    }

    // 获取项目列表
    pub async fn list_projects(
        &self,
        request: &HttpRequest,
        params: ProjectQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_projects(self, request, params).await
    }

    // 更新项目信息
    pub async fn update_project(
        &self,
        request: &HttpRequest,
        project_id: Uuid,
        update_data: UpdateProjectRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_project(self, request, project_id, update_data).await
    }

    // 删除项目
    pub async fn delete_project(
        &self,
        request: &HttpRequest,
        project_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_project(self, request, project_id).await
    }
}

/// 使项目相关缓存失效
///
/// 按 ID 的实体键与按学校的集合键须一并移除，否则列表返回过期数据。
pub(crate) async fn invalidate_project_cache(
    cache: &Arc<dyn ObjectCache>,
    project_id: Uuid,
    school_id: Uuid,
) {
    cache.remove(&format!("project:{project_id}")).await;
    cache.remove(&format!("project:school:{school_id}")).await;
}
