use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::feedback::requests::{
    CreateFeedbackRequest, FeedbackQueryParams, UpdateFeedbackRequest,
};
use crate::services::FeedbackService;
use crate::utils::SafeFeedbackId;

// 懒加载的全局 FeedbackService 实例
static FEEDBACK_SERVICE: Lazy<FeedbackService> = Lazy::new(FeedbackService::new_lazy);

// HTTP处理程序
pub async fn list_feedback(
    req: HttpRequest,
    query: web::Query<FeedbackQueryParams>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.list_feedback(&req, query.into_inner()).await
}

pub async fn create_feedback(
    req: HttpRequest,
    feedback_data: web::Json<CreateFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .create_feedback(&req, feedback_data.into_inner())
        .await
}

pub async fn get_feedback(
    req: HttpRequest,
    feedback_id: SafeFeedbackId,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.get_feedback(&req, feedback_id.0).await
}

pub async fn update_feedback(
    req: HttpRequest,
    feedback_id: SafeFeedbackId,
    update_data: web::Json<UpdateFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE
        .update_feedback(&req, feedback_id.0, update_data.into_inner())
        .await
}

pub async fn delete_feedback(
    req: HttpRequest,
    feedback_id: SafeFeedbackId,
) -> ActixResult<HttpResponse> {
    FEEDBACK_SERVICE.delete_feedback(&req, feedback_id.0).await
}

// 配置路由
//
// 所有已登录角色都可以发表与查看反馈，作者与管理员才可修改，
// 权限细节在服务层判定。
pub fn configure_feedback_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/feedback")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_feedback))
            .route("", web::post().to(create_feedback))
            .route("/{feedback_id}", web::get().to(get_feedback))
            .route("/{feedback_id}", web::put().to(update_feedback))
            .route("/{feedback_id}", web::delete().to(delete_feedback)),
    );
}
