//! 楼栋存储操作

use super::SeaOrmStorage;
use crate::entity::blocks::{ActiveModel, Column, Entity as Blocks};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    blocks::{
        entities::Block,
        requests::{BlockListQuery, CreateBlockRequest, UpdateBlockRequest},
        responses::BlockListResponse,
    },
    common::SortOrder,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建楼栋
    pub async fn create_block_impl(&self, req: CreateBlockRequest) -> Result<Block> {
        let now = chrono::Utc::now().timestamp();

        // school_id 必须由服务层确保已设置
        let school_id = req.school_id.ok_or_else(|| {
            CampusError::database_operation("school_id must be set before calling create_block")
        })?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            school_id: Set(school_id),
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("创建楼栋失败: {e}")))?;

        Ok(result.into_block())
    }

    /// 通过 ID 获取楼栋
    pub async fn get_block_by_id_impl(&self, id: Uuid) -> Result<Option<Block>> {
        let result = Blocks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询楼栋失败: {e}")))?;

        Ok(result.map(|m| m.into_block()))
    }

    /// 分页列出楼栋
    pub async fn list_blocks_with_pagination_impl(
        &self,
        query: BlockListQuery,
    ) -> Result<BlockListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let limit = query.limit.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Blocks::find();

        // 学校筛选
        if let Some(school_id) = query.school_id {
            select = select.filter(Column::SchoolId.eq(school_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        // 排序
        let sort_column = match query.sort_by.as_deref() {
            Some("name") => Column::Name,
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
            .map_err(|e| CampusError::database_operation(format!("查询楼栋总数失败: {e}")))?;

        let blocks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询楼栋列表失败: {e}")))?;

        Ok(BlockListResponse {
            items: blocks.into_iter().map(|m| m.into_block()).collect(),
            pagination: PaginationInfo::new(page as i64, limit as i64, total as i64),
        })
    }

    /// 更新楼栋信息
    pub async fn update_block_impl(
        &self,
        id: Uuid,
        update: UpdateBlockRequest,
    ) -> Result<Option<Block>> {
        let existing = self.get_block_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新楼栋失败: {e}")))?;

        self.get_block_by_id_impl(id).await
    }

    /// 删除楼栋
    pub async fn delete_block_impl(&self, id: Uuid) -> Result<bool> {
        let result = Blocks::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除楼栋失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
