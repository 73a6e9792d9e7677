use super::entities::FeedbackStatus;
use crate::models::common::{PaginationQuery, SortOrder};
use serde::Deserialize;
use uuid::Uuid;

// 反馈查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct FeedbackQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub project_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
}

// 创建反馈请求
#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub project_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
}

// 更新反馈请求
#[derive(Debug, Deserialize)]
pub struct UpdateFeedbackRequest {
    pub content: Option<String>,
    pub status: Option<FeedbackStatus>,
}

// 反馈列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct FeedbackListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    // 按所属项目的学校过滤（校内用户的强制租户隔离）
    pub school_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    // 为 None 时列表默认排除 deleted 状态
    pub status: Option<FeedbackStatus>,
}
