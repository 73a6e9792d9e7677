//! 评分存储操作
//!
//! 批量创建走单事务，任一失败即整批回滚。

use super::SeaOrmStorage;
use crate::entity::project_grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{CampusError, Result};
use crate::models::{
    PaginationInfo,
    common::SortOrder,
    grades::{
        entities::ProjectGrade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::GradeListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建评分
    pub async fn create_grade_impl(
        &self,
        grader_id: Uuid,
        req: CreateGradeRequest,
    ) -> Result<ProjectGrade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            project_id: Set(req.project_id),
            student_id: Set(req.student_id),
            grader_id: Set(grader_id),
            score: Set(req.score),
            comment: Set(req.comment),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("创建评分失败: {e}")))?;

        Ok(result.into_grade())
    }

    /// 批量创建评分（单事务，单条 insert_many 语句）
    ///
    /// 服务层已完成业务校验；这里只保证原子性：插入失败时整批回滚。
    pub async fn bulk_create_grades_impl(
        &self,
        grader_id: Uuid,
        reqs: Vec<CreateGradeRequest>,
    ) -> Result<Vec<ProjectGrade>> {
        if reqs.is_empty() {
            return Ok(Vec::new());
        }

        let now = chrono::Utc::now().timestamp();

        let mut ids = Vec::with_capacity(reqs.len());
        let models: Vec<ActiveModel> = reqs
            .into_iter()
            .map(|req| {
                let id = Uuid::new_v4();
                ids.push(id);
                ActiveModel {
                    id: Set(id),
                    project_id: Set(req.project_id),
                    student_id: Set(req.student_id),
                    grader_id: Set(grader_id),
                    score: Set(req.score),
                    comment: Set(req.comment),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
            })
            .collect();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CampusError::database_operation(format!("开启事务失败: {e}")))?;

        Grades::insert_many(models)
            .exec(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("批量创建评分失败: {e}")))?;

        let rows = Grades::find()
            .filter(Column::Id.is_in(ids.clone()))
            .all(&txn)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询批量评分失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| CampusError::database_operation(format!("提交事务失败: {e}")))?;

        // 按请求顺序返回
        let mut by_id: std::collections::HashMap<Uuid, ProjectGrade> =
            rows.into_iter().map(|m| (m.id, m.into_grade())).collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// 通过 ID 获取评分
    pub async fn get_grade_by_id_impl(&self, id: Uuid) -> Result<Option<ProjectGrade>> {
        let result = Grades::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 通过 (项目, 学生) 组合获取评分
    pub async fn get_grade_by_project_and_student_impl(
        &self,
        project_id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<ProjectGrade>> {
        let result = Grades::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 分页列出评分
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let limit = query.limit.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Grades::find();

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

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 排序
        let sort_column = match query.sort_by.as_deref() {
            Some("score") => Column::Score,
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
            .map_err(|e| CampusError::database_operation(format!("查询评分总数失败: {e}")))?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| CampusError::database_operation(format!("查询评分列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: grades.into_iter().map(|m| m.into_grade()).collect(),
            pagination: PaginationInfo::new(page as i64, limit as i64, total as i64),
        })
    }

    /// 更新评分
    pub async fn update_grade_impl(
        &self,
        id: Uuid,
        update: UpdateGradeRequest,
    ) -> Result<Option<ProjectGrade>> {
        let existing = self.get_grade_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(score) = update.score {
            model.score = Set(score);
        }

        if let Some(comment) = update.comment {
            model.comment = Set(Some(comment));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("更新评分失败: {e}")))?;

        self.get_grade_by_id_impl(id).await
    }

    /// 删除评分
    pub async fn delete_grade_impl(&self, id: Uuid) -> Result<bool> {
        let result = Grades::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| CampusError::database_operation(format!("删除评分失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
