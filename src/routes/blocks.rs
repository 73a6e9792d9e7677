use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::blocks::requests::{BlockQueryParams, CreateBlockRequest, UpdateBlockRequest};
use crate::models::users::entities::UserRole;
use crate::services::BlockService;
use crate::utils::SafeBlockId;

// 懒加载的全局 BlockService 实例
static BLOCK_SERVICE: Lazy<BlockService> = Lazy::new(BlockService::new_lazy);

// HTTP处理程序
pub async fn list_blocks(
    req: HttpRequest,
    query: web::Query<BlockQueryParams>,
) -> ActixResult<HttpResponse> {
    BLOCK_SERVICE.list_blocks(&req, query.into_inner()).await
}

pub async fn create_block(
    req: HttpRequest,
    block_data: web::Json<CreateBlockRequest>,
) -> ActixResult<HttpResponse> {
    BLOCK_SERVICE.create_block(&req, block_data.into_inner()).await
}

pub async fn get_block(req: HttpRequest, block_id: SafeBlockId) -> ActixResult<HttpResponse> {
    BLOCK_SERVICE.get_block(&req, block_id.0).await
}

pub async fn update_block(
    req: HttpRequest,
    block_id: SafeBlockId,
    update_data: web::Json<UpdateBlockRequest>,
) -> ActixResult<HttpResponse> {
    BLOCK_SERVICE
        .update_block(&req, block_id.0, update_data.into_inner())
        .await
}

pub async fn delete_block(req: HttpRequest, block_id: SafeBlockId) -> ActixResult<HttpResponse> {
    BLOCK_SERVICE.delete_block(&req, block_id.0).await
}

// 配置路由
pub fn configure_block_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/blocks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_blocks)).route(
                    web::post()
                        .to(create_block)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/{block_id}")
                    .route(web::get().to(get_block))
                    .route(
                        web::put()
                            .to(update_block)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_block)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
