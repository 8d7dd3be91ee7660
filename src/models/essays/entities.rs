use serde::{Deserialize, Serialize};

use crate::grading::AiScore;

// 论文状态（仅由教师审核修改）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EssayStatus {
    Pending,  // 待审核
    Approved, // 已通过
    Rejected, // 已驳回
}

impl<'de> Deserialize<'de> for EssayStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的论文状态: '{s}'. 支持的状态: pending, approved, rejected"
            ))
        })
    }
}

impl std::fmt::Display for EssayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EssayStatus::Pending => write!(f, "pending"),
            EssayStatus::Approved => write!(f, "approved"),
            EssayStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for EssayStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EssayStatus::Pending),
            "approved" => Ok(EssayStatus::Approved),
            "rejected" => Ok(EssayStatus::Rejected),
            _ => Err(format!("Invalid essay status: {s}")),
        }
    }
}

// 论文实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Essay {
    pub id: i64,
    pub student_id: i64,
    pub teacher_id: i64,
    pub title: String,
    // 形如 `/uploads/{file_name}`
    pub file_url: String,
    pub status: EssayStatus,
    pub ai_score: Option<AiScore>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
