use crate::models::common::{PaginationQuery, SortOrder};
use serde::Deserialize;
use uuid::Uuid;

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct StudentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub school_id: Option<Uuid>,
    pub classroom_id: Option<Uuid>,
    pub search: Option<String>,
}

// 创建学生请求
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub school_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub classroom_id: Option<Uuid>,
    pub student_number: String,
    pub full_name: String,
}

// 更新学生请求
#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub user_id: Option<Uuid>,
    pub classroom_id: Option<Uuid>,
    pub student_number: Option<String>,
    pub full_name: Option<String>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub school_id: Option<Uuid>,
    pub classroom_id: Option<Uuid>,
    pub search: Option<String>,
}
