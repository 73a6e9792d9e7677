use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 院系业务实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    // 院系ID
    pub id: Uuid,
    // 所属学校ID
    pub school_id: Uuid,
    // 院系名称（学校内唯一）
    pub name: String,
    // 系主任（用户）ID
    pub head_user_id: Option<Uuid>,
    // 描述
    pub description: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
