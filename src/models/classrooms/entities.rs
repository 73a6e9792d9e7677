use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 教室业务实体（硬删除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    // 教室ID
    pub id: Uuid,
    // 所属学校ID
    pub school_id: Uuid,
    // 所在楼栋ID
    pub block_id: Uuid,
    // 教室名称
    pub name: String,
    // 容量
    pub capacity: Option<i32>,
    // 楼层
    pub floor: Option<i32>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
