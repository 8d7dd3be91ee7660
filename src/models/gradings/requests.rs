use crate::grading::AiScore;

#[derive(Debug, Clone)]
pub struct CreateGradingRequest {
    pub essay_id: i64,
    pub teacher_id: i64,
    pub ai_score: Option<AiScore>,
}

/// 教师确认最终成绩
#[derive(Debug, Clone)]
pub struct FinalizeGradingRequest {
    pub final_score: f64,
    pub feedback: Option<String>,
}
