use super::entities::File;
use serde::Serialize;

// 文件上传响应
#[derive(Debug, Serialize)]
pub struct FileUploadResponse {
    pub file: File,
    pub download_url: String,
}
