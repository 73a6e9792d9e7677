use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 楼栋业务实体（硬删除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    // 楼栋ID
    pub id: Uuid,
    // 所属学校ID
    pub school_id: Uuid,
    // 楼栋名称（学校内唯一）
    pub name: String,
    // 描述
    pub description: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
