use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 学生业务实体
//
// 学号 student_number 在学校范围内唯一。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    // 学生ID
    pub id: Uuid,
    // 所属学校ID
    pub school_id: Uuid,
    // 关联用户账号（可选）
    pub user_id: Option<Uuid>,
    // 所在教室（可选）
    pub classroom_id: Option<Uuid>,
    // 学号
    pub student_number: String,
    // 姓名
    pub full_name: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
