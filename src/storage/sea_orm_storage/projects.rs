//! 项目存储操作

use super::SeaOrmStorage;
use crate::entity::projects::{ActiveModel, Column, Entity as Projects};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    common::SortOrder,
    projects::{
        entities::{Project, ProjectStatus},
        requests::{CreateProjectRequest, ProjectListQuery, UpdateProjectRequest},
        responses::ProjectListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

const DEFAULT_MAX_SCORE: f64 = 100.0;

impl SeaOrmStorage {
    /// 创建项目（初始状态为 draft）
    pub async fn create_project_impl(&self, req: CreateProjectRequest) -> Result<Project> {
        let now = chrono::Utc::now().timestamp();

        // school_id 与 teacher_id 必须由服务层确保已设置
        let school_id = req.school_id.ok_or_else(|| {
            CampusError::database_operation("school_id must be set before calling create_project")
        })?;
        let teacher_id = req.teacher_id.ok_or_else(|| {
            CampusError::database_operation("teacher_id must be set before calling create_project")
        })?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            school_id: Set(school_id),
            teacher_id: Set(teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            max_score: Set(req.max_score.unwrap_or(DEFAULT_MAX_SCORE)),
            status: Set(ProjectStatus::Draft.to_string()),
            deadline: Set(req.deadline.map(|d| d.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("创建项目失败: {e}")))?;

        Ok(result.into_project())
    }

    /// 通过 ID 获取项目
    pub async fn get_project_by_id_impl(&self, id: Uuid) -> Result<Option<Project>> {
        let result = Projects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询项目失败: {e}")))?;

        Ok(result.map(|m| m.into_project()))
    }

    /// 分页列出项目
    pub async fn list_projects_with_pagination_impl(
        &self,
        query: ProjectListQuery,
    ) -> Result<ProjectListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let limit = query.limit.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Projects::find();

        // 学校筛选
        if let Some(school_id) = query.school_id {
            select = select.filter(Column::SchoolId.eq(school_id));
        }

        // 教师筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        // 排序
        let sort_column = match query.sort_by.as_deref() {
            Some("title") => Column::Title,
            Some("deadline") => Column::Deadline,
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
            .map_err(|e| CampusError::database_operation(format!("查询项目总数失败: {e}")))?;

        let projects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询项目列表失败: {e}")))?;

        Ok(ProjectListResponse {
            items: projects.into_iter().map(|m| m.into_project()).collect(),
            pagination: PaginationInfo::new(page as i64, limit as i64, total as i64),
        })
    }

    /// 更新项目信息
    pub async fn update_project_impl(
        &self,
        id: Uuid,
        update: UpdateProjectRequest,
    ) -> Result<Option<Project>> {
        let existing = self.get_project_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(deadline) = update.deadline {
            model.deadline = Set(Some(deadline.timestamp()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新项目失败: {e}")))?;

        self.get_project_by_id_impl(id).await
    }

    /// 删除项目
    pub async fn delete_project_impl(&self, id: Uuid) -> Result<bool> {
        let result = Projects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除项目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
