use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 文件元数据业务实体（硬删除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct File {
    // 文件ID，同时作为下载 token 和磁盘存储名
    pub id: Uuid,
    // 上传者（用户）ID
    pub uploader_id: Uuid,
    // 原始文件名
    pub file_name: String,
    // 文件大小（字节）
    pub file_size: i64,
    // MIME 类型
    pub mime_type: String,
    // 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
