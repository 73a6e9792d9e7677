use crate::models::common::{PaginationQuery, SortOrder};
use serde::Deserialize;
use uuid::Uuid;

// 教室查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ClassroomQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub school_id: Option<Uuid>,
    pub block_id: Option<Uuid>,
    pub search: Option<String>,
}

// 创建教室请求
#[derive(Debug, Deserialize)]
pub struct CreateClassroomRequest {
    pub school_id: Option<Uuid>,
    pub block_id: Uuid,
    pub name: String,
    pub capacity: Option<i32>,
    pub floor: Option<i32>,
}

// 更新教室请求
#[derive(Debug, Deserialize)]
pub struct UpdateClassroomRequest {
    pub block_id: Option<Uuid>,
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub floor: Option<i32>,
}

// 批量删除教室请求
//
// 全部成功或全部失败：任一 ID 不存在时整批中止。
#[derive(Debug, Deserialize)]
pub struct BulkDeleteClassroomRequest {
    pub ids: Vec<Uuid>,
}

// 教室列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassroomListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub school_id: Option<Uuid>,
    pub block_id: Option<Uuid>,
    pub search: Option<String>,
}
