use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 反馈状态（软删除：删除只修改状态，不移除行）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    Active,
    Archived,
    Deleted,
}

impl std::fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedbackStatus::Active => write!(f, "active"),
            FeedbackStatus::Archived => write!(f, "archived"),
            FeedbackStatus::Deleted => write!(f, "deleted"),
        }
    }
}

impl std::str::FromStr for FeedbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(FeedbackStatus::Active),
            "archived" => Ok(FeedbackStatus::Archived),
            "deleted" => Ok(FeedbackStatus::Deleted),
            _ => Err(format!("无效的反馈状态: '{s}'")),
        }
    }
}

// 项目反馈业务实体
//
// parent_id 指向同表的另一条反馈，用于线程化回复。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFeedback {
    // 反馈ID
    pub id: Uuid,
    // 项目ID
    pub project_id: Uuid,
    // 作者（用户）ID
    pub author_id: Uuid,
    // 父反馈ID（回复时存在）
    pub parent_id: Option<Uuid>,
    // 内容
    pub content: String,
    // 状态
    pub status: FeedbackStatus,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
