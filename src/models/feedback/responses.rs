use super::entities::ProjectFeedback;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};

// 反馈列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ProjectFeedback>,
}
