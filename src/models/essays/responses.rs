use serde::Serialize;

use super::entities::Essay;
use crate::grading::GradingResult;
use crate::models::gradings::entities::Grading;

/// 提交结果：论文记录与随之创建的评分记录
#[derive(Debug, Clone, Serialize)]
pub struct SubmitEssayResponse {
    pub essay: Essay,
    pub grading: Grading,
}

/// 批量重评中单个文件的结果
///
/// 成功时只有 `ai_score`，失败时只有 `error`。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegradeEntry {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_score: Option<GradingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegradeEntry {
    pub fn graded(filename: impl Into<String>, ai_score: GradingResult) -> Self {
        Self {
            filename: filename.into(),
            ai_score: Some(ai_score),
            error: None,
        }
    }

    pub fn failed(filename: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ai_score: None,
            error: Some(error.into()),
        }
    }
}
