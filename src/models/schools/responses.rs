use super::entities::School;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 学校列表响应
#[derive(Debug, Serialize)]
pub struct SchoolListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<School>,
}
