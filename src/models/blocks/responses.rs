use super::entities::Block;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 楼栋列表响应
#[derive(Debug, Serialize)]
pub struct BlockListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Block>,
}
