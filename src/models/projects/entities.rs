use serde::{Deserialize, Serialize};
use uuid::Uuid;

// 项目状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Draft => write!(f, "draft"),
            ProjectStatus::Published => write!(f, "published"),
            ProjectStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProjectStatus::Draft),
            "published" => Ok(ProjectStatus::Published),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(format!("无效的项目状态: '{s}'")),
        }
    }
}

// 项目业务实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    // 项目ID
    pub id: Uuid,
    // 所属学校ID
    pub school_id: Uuid,
    // 负责教师（用户）ID
    pub teacher_id: Uuid,
    // 标题
    pub title: String,
    // 描述
    pub description: Option<String>,
    // 满分
    pub max_score: f64,
    // 状态
    pub status: ProjectStatus,
    // 截止时间
    pub deadline: Option<chrono::DateTime<chrono::Utc>>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
