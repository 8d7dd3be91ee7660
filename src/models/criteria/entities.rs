use serde::{Deserialize, Serialize};

/// 评分标准（管理员配置，评分流水线只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: i64,
    // 唯一显示名称
    pub name: String,
    pub description: Option<String>,
    // 该项满分（正数）
    pub max_score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
