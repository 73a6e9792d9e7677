use super::entities::ProjectGrade;
use crate::models::common::PaginationInfo;
use serde::{Deserialize, Serialize};

// 评分列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct GradeListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<ProjectGrade>,
}

// 批量创建评分响应
#[derive(Debug, Serialize)]
pub struct BulkCreateGradeResponse {
    pub created: usize,
    pub items: Vec<ProjectGrade>,
}
