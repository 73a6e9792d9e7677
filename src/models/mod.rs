//! 数据模型定义
//!
//! 业务实体、请求与响应模型，与 entity 模块中的数据库实体分离。

pub mod auth;
pub mod blocks;
pub mod classrooms;
pub mod common;
pub mod departments;
pub mod feedback;
pub mod files;
pub mod grades;
pub mod projects;
pub mod schools;
pub mod students;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery, SortOrder};
pub use common::response::ApiResponse;

/// 应用启动时间，用于运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
///
/// 0 表示成功；1xxx 为通用错误；2xxx 用户与认证；3xxx 学校与学生；
/// 4xxx 项目、评分与反馈；5xxx 学校配置实体；6xxx 文件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    RateLimitExceeded = 1004,
    InternalServerError = 1005,

    // 用户与认证
    AuthFailed = 2000,
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    UserNameInvalid = 2003,
    UserEmailInvalid = 2004,
    UserPasswordInvalid = 2005,
    UserCreationFailed = 2006,
    UserUpdateFailed = 2007,
    UserDeleteFailed = 2008,
    CanNotDeleteCurrentUser = 2009,

    // 学校与学生
    SchoolNotFound = 3000,
    SchoolAlreadyExists = 3001,
    StudentNotFound = 3010,
    StudentNumberAlreadyExists = 3011,

    // 项目、评分与反馈
    ProjectNotFound = 4000,
    ProjectPermissionDenied = 4001,
    GradeNotFound = 4010,
    GradeAlreadyExists = 4011,
    GradeScoreInvalid = 4012,
    BulkOperationFailed = 4013,
    FeedbackNotFound = 4020,

    // 学校配置实体
    BlockNotFound = 5000,
    BlockAlreadyExists = 5001,
    ClassroomNotFound = 5010,
    DepartmentNotFound = 5020,
    DepartmentAlreadyExists = 5021,

    // 文件
    FileNotFound = 6000,
    FileSizeExceeded = 6001,
    FileTypeNotAllowed = 6002,
    FileUploadFailed = 6003,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Unauthorized as i32, 1001);
        assert_eq!(ErrorCode::GradeAlreadyExists as i32, 4011);
    }
}
