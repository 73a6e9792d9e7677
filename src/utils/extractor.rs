//! 路径参数安全提取器
//!
//! 在进入处理函数之前解析路径中的 UUID，格式非法时直接返回 400 响应，
//! 避免每个处理函数重复解析逻辑。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse, error::InternalError};
use futures_util::future::{Ready, ready};
use uuid::Uuid;

use crate::models::{ApiResponse, ErrorCode};

macro_rules! define_uuid_extractor {
    ($name:ident, $param:literal, $label:literal) => {
        pub struct $name(pub Uuid);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                match Uuid::parse_str(raw) {
                    Ok(id) => ready(Ok($name(id))),
                    Err(_) => {
                        let resp = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::BadRequest,
                            concat!("Invalid ", $label, " ID format"),
                        ));
                        ready(Err(InternalError::from_response(
                            concat!("invalid ", $label, " id"),
                            resp,
                        )
                        .into()))
                    }
                }
            }
        }
    };
}

define_uuid_extractor!(SafeUserId, "user_id", "user");
define_uuid_extractor!(SafeSchoolId, "school_id", "school");
define_uuid_extractor!(SafeStudentId, "student_id", "student");
define_uuid_extractor!(SafeProjectId, "project_id", "project");
define_uuid_extractor!(SafeGradeId, "grade_id", "grade");
define_uuid_extractor!(SafeFeedbackId, "feedback_id", "feedback");
define_uuid_extractor!(SafeBlockId, "block_id", "block");
define_uuid_extractor!(SafeClassroomId, "classroom_id", "classroom");
define_uuid_extractor!(SafeDepartmentId, "department_id", "department");
define_uuid_extractor!(SafeFileId, "file_id", "file");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_uuid_is_extracted() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .param("project_id", id.to_string())
            .to_http_request();
        let extracted = SafeProjectId::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(extracted.0, id);
    }

    #[actix_web::test]
    async fn test_invalid_uuid_is_rejected() {
        let req = TestRequest::default()
            .param("project_id", "not-a-uuid")
            .to_http_request();
        let result = SafeProjectId::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }
}
