use serde::{Deserialize, Serialize};

use crate::grading::AiScore;

// 评分记录：创建时拷贝 AI 评分，教师随后给出最终分数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grading {
    pub id: i64,
    pub essay_id: i64,
    pub teacher_id: i64,
    pub ai_score: Option<AiScore>,
    pub final_score: Option<f64>,
    pub feedback: Option<String>,
    pub graded_at: chrono::DateTime<chrono::Utc>,
}
