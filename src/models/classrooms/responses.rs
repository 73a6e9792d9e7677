use super::entities::Classroom;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 教室列表响应
#[derive(Debug, Serialize)]
pub struct ClassroomListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Classroom>,
}

// 批量删除教室响应
#[derive(Debug, Serialize)]
pub struct BulkDeleteClassroomResponse {
    pub deleted: u64,
}
