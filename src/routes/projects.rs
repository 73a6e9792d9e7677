use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::projects::requests::{
    CreateProjectRequest, ProjectQueryParams, UpdateProjectRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ProjectService;
use crate::utils::SafeProjectId;

// 懒加载的全局 ProjectService 实例
static PROJECT_SERVICE: Lazy<ProjectService> = Lazy::new(ProjectService::new_lazy);

// HTTP处理程序
pub async fn list_projects(
    req: HttpRequest,
    query: web::Query<ProjectQueryParams>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.list_projects(&req, query.into_inner()).await
}

pub async fn create_project(
    req: HttpRequest,
    project_data: web::Json<CreateProjectRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .create_project(&req, project_data.into_inner())
        .await
}

pub async fn get_project(req: HttpRequest, project_id: SafeProjectId) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.get_project(&req, project_id.0).await
}

pub async fn update_project(
    req: HttpRequest,
    project_id: SafeProjectId,
    update_data: web::Json<UpdateProjectRequest>,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE
        .update_project(&req, project_id.0, update_data.into_inner())
        .await
}

pub async fn delete_project(
    req: HttpRequest,
    project_id: SafeProjectId,
) -> ActixResult<HttpResponse> {
    PROJECT_SERVICE.delete_project(&req, project_id.0).await
}

// 配置路由
pub fn configure_project_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/projects")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_projects)).route(
                    web::post()
                        .to(create_project)
                        // 教师创建自己的项目，管理员可以为指定教师创建
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{project_id}")
                    .route(web::get().to(get_project))
                    .route(
                        web::put()
                            .to(update_project)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_project)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
