//! 教室存储操作
//!
//! 批量删除走单事务，任一 ID 不存在时整批中止。

use super::SeaOrmStorage;
use crate::entity::classrooms::{ActiveModel, Column, Entity as Classrooms};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    classrooms::{
        entities::Classroom,
        requests::{ClassroomListQuery, CreateClassroomRequest, UpdateClassroomRequest},
        responses::ClassroomListResponse,
    },
    common::SortOrder,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建教室
    pub async fn create_classroom_impl(&self, req: CreateClassroomRequest) -> Result<Classroom> {
        let now = chrono::Utc::now().timestamp();

        // school_id 必须由服务层确保已设置
        let school_id = req.school_id.ok_or_else(|| {
            CampusError::database_operation(
                "school_id must be set before calling create_classroom",
            )
        })?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            school_id: Set(school_id),
            block_id: Set(req.block_id),
            name: Set(req.name),
            capacity: Set(req.capacity),
            floor: Set(req.floor),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("创建教室失败: {e}")))?;

        Ok(result.into_classroom())
    }

    /// 通过 ID 获取教室
    pub async fn get_classroom_by_id_impl(&self, id: Uuid) -> Result<Option<Classroom>> {
        let result = Classrooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教室失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom()))
    }

    /// 分页列出教室
    pub async fn list_classrooms_with_pagination_impl(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let limit = query.limit.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Classrooms::find();

        // 学校筛选
        if let Some(school_id) = query.school_id {
            select = select.filter(Column::SchoolId.eq(school_id));
        }

        // 楼栋筛选
        if let Some(block_id) = query.block_id {
            select = select.filter(Column::BlockId.eq(block_id));
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
            Some("capacity") => Column::Capacity,
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
            .map_err(|e| CampusError::database_operation(format!("查询教室总数失败: {e}")))?;

        let classrooms = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询教室列表失败: {e}")))?;

        Ok(ClassroomListResponse {
            items: classrooms.into_iter().map(|m| m.into_classroom()).collect(),
            pagination: PaginationInfo::new(page as i64, limit as i64, total as i64),
        })
    }

    /// 更新教室信息
    pub async fn update_classroom_impl(
        &self,
        id: Uuid,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        let existing = self.get_classroom_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(block_id) = update.block_id {
            model.block_id = Set(block_id);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(capacity) = update.capacity {
            model.capacity = Set(Some(capacity));
        }

        if let Some(floor) = update.floor {
            model.floor = Set(Some(floor));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新教室失败: {e}")))?;

        self.get_classroom_by_id_impl(id).await
    }

    /// 删除教室
    pub async fn delete_classroom_impl(&self, id: Uuid) -> Result<bool> {
        let result = Classrooms::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除教室失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量删除教室（单事务）
    ///
    /// 先在事务内校验所有 ID 均存在，再执行删除；任一缺失即回滚。
    pub async fn bulk_delete_classrooms_impl(&self, ids: &[Uuid]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CampusError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Classrooms::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .count(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("校验教室失败: {e}")))?;

        if existing != ids.len() as u64 {
            txn.rollback()
                .await
                .map_err(|e| CampusError::database_operation(format!("回滚事务失败: {e}")))?;
            return Err(CampusError::not_found(format!(
                "批量删除中止: {} 个教室中仅 {} 个存在",
                ids.len(),
                existing
            )));
        }

        let result = Classrooms::delete_many()
            .filter(Column::Id.is_in(ids.to_vec()))
            .exec(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("批量删除教室失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CampusError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
