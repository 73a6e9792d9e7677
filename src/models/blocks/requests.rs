use crate::models::common::{PaginationQuery, SortOrder};
use serde::Deserialize;
use uuid::Uuid;

// 楼栋查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct BlockQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub school_id: Option<Uuid>,
    pub search: Option<String>,
}

// 创建楼栋请求
#[derive(Debug, Deserialize)]
pub struct CreateBlockRequest {
    pub school_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
}

// 更新楼栋请求
#[derive(Debug, Deserialize)]
pub struct UpdateBlockRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

// 楼栋列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct BlockListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub school_id: Option<Uuid>,
    pub search: Option<String>,
}
