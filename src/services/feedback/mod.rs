pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::ObjectCache;
use crate::models::feedback::requests::{
    CreateFeedbackRequest, FeedbackQueryParams, UpdateFeedbackRequest,
};
use crate::storage::Storage;

pub struct FeedbackService {
    storage: Option<Arc<dyn Storage>>,
}

impl FeedbackService {
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

    // 发表反馈或回复
    pub async fn create_feedback(
        &self,
        request: &HttpRequest,
        feedback_data: CreateFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_feedback(self, request, feedback_data).await
    }

    // 获取反馈详情（带缓存）
    pub async fn get_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_feedback(self, request, feedback_id).await
    }

    // 获取反馈列表
    pub async fn list_feedback(
        &self,
        request: &HttpRequest,
        params: FeedbackQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_feedback(self, request, params).await
    }

    // 更新反馈
    pub async fn update_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: Uuid,
        update_data: UpdateFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_feedback(self, request, feedback_id, update_data).await
    }

    // 删除反馈（软删除）
    pub async fn delete_feedback(
        &self,
        request: &HttpRequest,
        feedback_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_feedback(self, request, feedback_id).await
    }
}

/// 使反馈相关缓存失效
///
/// 反馈出现在按项目的集合里，回复还出现在按父反馈的集合里，相关键一并移除。
pub(crate) async fn invalidate_feedback_cache(
    cache: &Arc<dyn ObjectCache>,
    feedback: &crate::models::feedback::entities::ProjectFeedback,
) {
    cache.remove(&format!("feedback:{}", feedback.id)).await;
    cache
        .remove(&format!("feedback:project:{}", feedback.project_id))
        .await;
    if let Some(parent_id) = feedback.parent_id {
        cache.remove(&format!("feedback:parent:{parent_id}")).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::{HttpMessage, HttpRequest, web};

    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::feedback::entities::ProjectFeedback;
    use crate::models::projects::requests::CreateProjectRequest;
    use crate::models::schools::requests::CreateSchoolRequest;
    use crate::models::users::entities::{User, UserRole, UserStatus};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn setup() -> (Arc<dyn Storage>, FeedbackService, Arc<dyn ObjectCache>) {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);
        let service = FeedbackService {
            storage: Some(storage.clone()),
        };
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new().expect("cache init"));
        (storage, service, cache)
    }

    fn request_as(user: Option<User>, cache: &Arc<dyn ObjectCache>) -> HttpRequest {
        let request = TestRequest::default()
            .app_data(web::Data::new(cache.clone()))
            .to_http_request();
        if let Some(user) = user {
            request.extensions_mut().insert(user);
        }
        request
    }

    fn user_of_school(school_id: Option<Uuid>, role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id: Uuid::new_v4(),
            school_id,
            username: format!("u-{}", Uuid::new_v4().simple()),
            email: format!("{}@example.com", Uuid::new_v4().simple()),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            display_name: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 建一所学校并在其项目下发一条反馈，返回 (学校 ID, 反馈)
    async fn seed_feedback_in_school(
        storage: &Arc<dyn Storage>,
        school_name: &str,
    ) -> (Uuid, ProjectFeedback) {
        let school = storage
            .create_school(CreateSchoolRequest {
                name: school_name.into(),
                address: None,
                phone: None,
            })
            .await
            .unwrap();
        let teacher = storage
            .create_user(CreateUserRequest {
                school_id: Some(school.id),
                username: format!("t-{}", school.id.simple()),
                email: format!("t-{}@example.com", school.id.simple()),
                password: "hashed-password".into(),
                role: UserRole::Teacher,
                display_name: None,
            })
            .await
            .unwrap();
        let project = storage
            .create_project(CreateProjectRequest {
                school_id: Some(school.id),
                teacher_id: Some(teacher.id),
                title: "课程设计".into(),
                description: None,
                max_score: Some(100.0),
                deadline: None,
            })
            .await
            .unwrap();
        let feedback = storage
            .create_feedback(
                teacher.id,
                CreateFeedbackRequest {
                    project_id: project.id,
                    parent_id: None,
                    content: "整体完成度不错".into(),
                },
            )
            .await
            .unwrap();
        (school.id, feedback)
    }

    #[actix_web::test]
    async fn test_get_feedback_rejects_cross_school_user() {
        let (storage, service, cache) = setup().await;
        let (_school, feedback) = seed_feedback_in_school(&storage, "学校庚").await;

        let outsider = user_of_school(Some(Uuid::new_v4()), UserRole::Teacher);
        let request = request_as(Some(outsider), &cache);
        let response = service.get_feedback(&request, feedback.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_get_feedback_allows_same_school_user() {
        let (storage, service, cache) = setup().await;
        let (school_id, feedback) = seed_feedback_in_school(&storage, "学校辛").await;

        let insider = user_of_school(Some(school_id), UserRole::Student);
        let request = request_as(Some(insider), &cache);
        let response = service.get_feedback(&request, feedback.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_list_feedback_rejects_cross_school_project_filter() {
        let (storage, service, cache) = setup().await;
        let (_school, feedback) = seed_feedback_in_school(&storage, "学校壬").await;

        let outsider = user_of_school(Some(Uuid::new_v4()), UserRole::Teacher);
        let request = request_as(Some(outsider), &cache);
        let params = FeedbackQueryParams {
            pagination: crate::models::common::PaginationQuery::default(),
            project_id: Some(feedback.project_id),
            parent_id: None,
        };
        let response = service.list_feedback(&request, params).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_delete_feedback_rejects_cross_school_admin() {
        let (storage, service, cache) = setup().await;
        let (_school, feedback) = seed_feedback_in_school(&storage, "学校癸").await;

        // 他校管理员也不能越界删除
        let outsider = user_of_school(Some(Uuid::new_v4()), UserRole::Admin);
        let request = request_as(Some(outsider), &cache);
        let response = service.delete_feedback(&request, feedback.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let kept = storage.get_feedback_by_id(feedback.id).await.unwrap().unwrap();
        assert_eq!(kept.status, crate::models::feedback::entities::FeedbackStatus::Active);
    }
}
