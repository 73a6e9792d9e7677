use crate::models::common::{PaginationQuery, SortOrder};
use serde::Deserialize;

// 学校查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct SchoolQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建学校请求
#[derive(Debug, Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

// 更新学校请求
#[derive(Debug, Deserialize)]
pub struct UpdateSchoolRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

// 学校列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct SchoolListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
}
