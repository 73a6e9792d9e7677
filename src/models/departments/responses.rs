use super::entities::Department;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 院系列表响应
#[derive(Debug, Serialize)]
pub struct DepartmentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Department>,
}
