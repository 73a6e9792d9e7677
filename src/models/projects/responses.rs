use super::entities::Project;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};

// 项目列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Project>,
}
