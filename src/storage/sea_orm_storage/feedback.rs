//! 反馈存储操作
//!
//! 删除为软删除：仅把状态改为 deleted，保留行以维持回复线程完整。

use super::SeaOrmStorage;
use crate::entity::project_feedback::{ActiveModel, Column, Entity as Feedback};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    common::SortOrder,
    feedback::{
        entities::{FeedbackStatus, ProjectFeedback},
        requests::{CreateFeedbackRequest, FeedbackListQuery, UpdateFeedbackRequest},
        responses::FeedbackListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建反馈
    pub async fn create_feedback_impl(
        &self,
        author_id: Uuid,
        req: CreateFeedbackRequest,
    ) -> Result<ProjectFeedback> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(req.project_id),
            author_id: Set(author_id),
            parent_id: Set(req.parent_id),
            content: Set(req.content),
            status: Set(FeedbackStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("创建反馈失败: {e}")))?;

        Ok(result.into_feedback())
    }

    /// 通过 ID 获取反馈
    pub async fn get_feedback_by_id_impl(&self, id: Uuid) -> Result<Option<ProjectFeedback>> {
        let result = Feedback::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询反馈失败: {e}")))?;

        Ok(result.map(|m| m.into_feedback()))
    }

    /// 分页列出反馈
    ///
    /// query.status 为 None 时默认排除 deleted 状态。
    pub async fn list_feedback_with_pagination_impl(
        &self,
        query: FeedbackListQuery,
    ) -> Result<FeedbackListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let limit = query.limit.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Feedback::find();

        // 学校筛选（经所属项目关联）
        if let Some(school_id) = query.school_id {
            select = select
                .inner_join(crate::entity::projects::Entity)
                .filter(crate::entity::projects::Column::SchoolId.eq(school_id));
        }

        // 项目筛选
        if let Some(project_id) = query.project_id {
            select = select.filter(Column::ProjectId.eq(project_id));
        }

        // 父反馈筛选（列出某条反馈的回复）
        if let Some(parent_id) = query.parent_id {
            select = select.filter(Column::ParentId.eq(parent_id));
        }

        // 状态筛选
        match query.status {
            Some(status) => {
                select = select.filter(Column::Status.eq(status.to_string()));
            }
            None => {
                select =
                    select.filter(Column::Status.ne(FeedbackStatus::Deleted.to_string()));
            }
        }

        // 排序
        let sort_column = match query.sort_by.as_deref() {
            Some("updated_at") => Column::UpdatedAt,
            _ => Column::CreatedAt,
        };
        select = match query.sort_order.unwrap_or_default() {
            SortOrder::Asc => select.order_by_asc(sort_column),
            SortOrder::Desc => select.order_by_desc(sort_column),
        };

        // 分页查询
        let paginator = select.paginate(&self.db, limit);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| CampusError::database_operation(format!("查询反馈总数失败: {e}")))?;

        let feedback = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询反馈列表失败: {e}")))?;

        Ok(FeedbackListResponse {
            items: feedback.into_iter().map(|m| m.into_feedback()).collect(),
            pagination: PaginationInfo::new(page as i64, limit as i64, total as i64),
        })
    }

    /// 更新反馈
    pub async fn update_feedback_impl(
        &self,
        id: Uuid,
        update: UpdateFeedbackRequest,
    ) -> Result<Option<ProjectFeedback>> {
        let existing = self.get_feedback_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新反馈失败: {e}")))?;

        self.get_feedback_by_id_impl(id).await
    }

    /// 软删除反馈（状态改为 deleted）
    pub async fn delete_feedback_impl(&self, id: Uuid) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Feedback::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(FeedbackStatus::Deleted.to_string()),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(FeedbackStatus::Deleted.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除反馈失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
