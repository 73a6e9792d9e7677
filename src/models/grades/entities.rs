use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 项目评分业务实体
//
// 每个 (project_id, student_id) 组合至多存在一条评分。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectGrade {
    // 评分ID
    pub id: Uuid,
    // 项目ID
    pub project_id: Uuid,
    // 学生ID
    pub student_id: Uuid,
    // 评分教师（用户）ID
    pub grader_id: Uuid,
    // 分数
    pub score: f64,
    // 评语
    pub comment: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
