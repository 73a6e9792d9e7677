pub mod bulk_create;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::ObjectCache;
use crate::models::grades::requests::{
    BulkCreateGradeRequest, CreateGradeRequest, GradeQueryParams, UpdateGradeRequest,
};
use crate::storage::Storage;

pub struct GradeService {
    storage: Option<Arc<dyn Storage>>,
}

impl GradeService {
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

    // 创建评分
    pub async fn create_grade(
        &self,
        request: &HttpRequest,
        grade_data: CreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_grade(self, request, grade_data).await
    }

    // 批量创建评分（原子操作）
    pub async fn bulk_create_grades(
        &self,
        request: &HttpRequest,
        bulk_data: BulkCreateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        bulk_create::bulk_create_grades(self, request, bulk_data).await
    }

    // 获取评分详情（带缓存）
    pub async fn get_grade(
        &self,
        request: &HttpRequest,
        grade_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        get::get_grade(self, request, grade_id).await
    }

    // 获取评分列表
    pub async fn list_grades(
        &self,
        request: &HttpRequest,
        params: GradeQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_grades(self, request, params).await
    }

    // 更新评分
    pub async fn update_grade(
        &self,
        request: &HttpRequest,
        grade_id: Uuid,
        update_data: UpdateGradeRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_grade(self, request, grade_id, update_data).await
    }

    // 删除评分
    pub async fn delete_grade(
        &self,
        request: &HttpRequest,
        grade_id: Uuid,
    ) -> ActixResult<HttpResponse> {
        delete::delete_grade(self, request, grade_id).await
    }
}

/// 使评分相关缓存失效
///
/// 除按 ID 的实体键外，还要移除按项目、按学生的集合键，
/// 漏掉任何一个关联键都会导致列表返回过期数据。
pub(crate) async fn invalidate_grade_cache(
    cache: &Arc<dyn ObjectCache>,
    grade_id: Uuid,
    project_id: Uuid,
    student_id: Uuid,
) {
    cache.remove(&format!("grade:{grade_id}")).await;
    cache.remove(&format!("grade:project:{project_id}")).await;
    cache.remove(&format!("grade:student:{student_id}")).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::{HttpMessage, HttpRequest, web};

    use crate::cache::CacheResult;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::models::common::PaginationQuery;
    use crate::models::grades::entities::ProjectGrade;
    use crate::models::projects::requests::CreateProjectRequest;
    use crate::models::schools::requests::CreateSchoolRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::users::entities::{User, UserRole, UserStatus};
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn setup() -> (Arc<dyn Storage>, GradeService, Arc<dyn ObjectCache>) {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await);
        let service = GradeService {
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

    /// 建一所学校并在其下放一条评分，返回 (学校 ID, 评分)
    async fn seed_grade_in_school(
        storage: &Arc<dyn Storage>,
        school_name: &str,
    ) -> (Uuid, ProjectGrade) {
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
        let student = storage
            .create_student(CreateStudentRequest {
                school_id: Some(school.id),
                user_id: None,
                classroom_id: None,
                student_number: "2026001".into(),
                full_name: "李四".into(),
            })
            .await
            .unwrap();
        let grade = storage
            .create_grade(
                teacher.id,
                crate::models::grades::requests::CreateGradeRequest {
                    project_id: project.id,
                    student_id: student.id,
                    score: 85.0,
                    comment: None,
                },
            )
            .await
            .unwrap();
        (school.id, grade)
    }

    #[actix_web::test]
    async fn test_get_grade_rejects_cross_school_user() {
        let (storage, service, cache) = setup().await;
        let (_school, grade) = seed_grade_in_school(&storage, "学校甲").await;

        // 他校教师读取 → 403
        let outsider = user_of_school(Some(Uuid::new_v4()), UserRole::Teacher);
        let request = request_as(Some(outsider), &cache);
        let response = service.get_grade(&request, grade.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_get_grade_allows_same_school_user() {
        let (storage, service, cache) = setup().await;
        let (school_id, grade) = seed_grade_in_school(&storage, "学校乙").await;

        let insider = user_of_school(Some(school_id), UserRole::Teacher);
        let request = request_as(Some(insider), &cache);
        let response = service.get_grade(&request, grade.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_get_grade_allows_platform_admin() {
        let (storage, service, cache) = setup().await;
        let (_school, grade) = seed_grade_in_school(&storage, "学校丙").await;

        // 平台管理员不挂学校，可跨校读取
        let admin = user_of_school(None, UserRole::Admin);
        let request = request_as(Some(admin), &cache);
        let response = service.get_grade(&request, grade.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_list_grades_rejects_cross_school_project_filter() {
        let (storage, service, cache) = setup().await;
        let (_school, grade) = seed_grade_in_school(&storage, "学校丁").await;

        let outsider = user_of_school(Some(Uuid::new_v4()), UserRole::Teacher);
        let request = request_as(Some(outsider), &cache);
        let params = GradeQueryParams {
            pagination: PaginationQuery::default(),
            project_id: Some(grade.project_id),
            student_id: None,
        };
        let response = service.list_grades(&request, params).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_update_grade_comment_only_rejects_cross_school_user() {
        let (storage, service, cache) = setup().await;
        let (_school, grade) = seed_grade_in_school(&storage, "学校戊").await;

        // 只改备注不改分数，同样不能跨校
        let outsider = user_of_school(Some(Uuid::new_v4()), UserRole::Admin);
        let request = request_as(Some(outsider), &cache);
        let update = UpdateGradeRequest {
            score: None,
            comment: Some("重新评估".into()),
        };
        let response = service
            .update_grade(&request, grade.id, update)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_delete_grade_rejects_cross_school_user() {
        let (storage, service, cache) = setup().await;
        let (_school, grade) = seed_grade_in_school(&storage, "学校己").await;

        let outsider = user_of_school(Some(Uuid::new_v4()), UserRole::Admin);
        let request = request_as(Some(outsider), &cache);
        let response = service.delete_grade(&request, grade.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // 评分仍在
        let kept = storage.get_grade_by_id(grade.id).await.unwrap();
        assert!(kept.is_some());
    }

    #[actix_web::test]
    async fn test_delete_missing_grade_leaves_cache_untouched() {
        let (_storage, service, cache) = setup().await;

        cache
            .insert_raw("grade:sentinel".into(), "{}".into(), 0)
            .await;

        let admin = user_of_school(None, UserRole::Admin);
        let request = request_as(Some(admin), &cache);
        let response = service.delete_grade(&request, Uuid::new_v4()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // 未命中的删除不得触发任何缓存失效
        assert!(matches!(
            cache.get_raw("grade:sentinel").await,
            CacheResult::Found(_)
        ));
    }
}
