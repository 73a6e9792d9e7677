use super::entities::ProjectStatus;
use crate::models::common::{PaginationQuery, SortOrder};
use serde::Deserialize;
use uuid::Uuid;

// 项目查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ProjectQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub school_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

// 创建项目请求
//
// # teacher_id 字段说明
// - **教师创建**：可选字段，不填写则自动使用当前登录教师的 ID
// - **管理员创建**：必填字段，用于指定负责该项目的教师
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub school_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub max_score: Option<f64>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

// 更新项目请求
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub max_score: Option<f64>,
    pub status: Option<ProjectStatus>,
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
}

// 项目列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ProjectListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub school_id: Option<Uuid>,
    pub teacher_id: Option<Uuid>,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}
