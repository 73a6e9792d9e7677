use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 学校业务实体（租户根）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    // 学校ID
    pub id: Uuid,
    // 学校名称
    pub name: String,
    // 地址
    pub address: Option<String>,
    // 联系电话
    pub phone: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
