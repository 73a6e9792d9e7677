use crate::models::common::{PaginationQuery, SortOrder};
use serde::Deserialize;
use uuid::Uuid;

// 院系查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct DepartmentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub school_id: Option<Uuid>,
    pub search: Option<String>,
}

// 创建院系请求
#[derive(Debug, Deserialize)]
pub struct CreateDepartmentRequest {
    pub school_id: Option<Uuid>,
    pub name: String,
    pub head_user_id: Option<Uuid>,
    pub description: Option<String>,
}

// 更新院系请求
#[derive(Debug, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub head_user_id: Option<Uuid>,
    pub description: Option<String>,
}

// 院系列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct DepartmentListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub school_id: Option<Uuid>,
    pub search: Option<String>,
}
