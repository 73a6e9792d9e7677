use crate::models::common::{PaginationQuery, SortOrder};
use serde::Deserialize;
use uuid::Uuid;

// 评分查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct GradeQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub project_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
}

// 创建评分请求
#[derive(Debug, Deserialize)]
pub struct CreateGradeRequest {
    pub project_id: Uuid,
    pub student_id: Uuid,
    pub score: f64,
    pub comment: Option<String>,
}

// 批量创建评分请求
//
// 全部成功或全部失败：任意一项校验不通过时整批回滚。
#[derive(Debug, Deserialize)]
pub struct BulkCreateGradeRequest {
    pub grades: Vec<CreateGradeRequest>,
}

// 更新评分请求
#[derive(Debug, Deserialize)]
pub struct UpdateGradeRequest {
    pub score: Option<f64>,
    pub comment: Option<String>,
}

// 评分列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    // 按所属项目的学校过滤（校内用户的强制租户隔离）
    pub school_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
}
