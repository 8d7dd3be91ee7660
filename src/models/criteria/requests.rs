use crate::errors::{EssaySystemError, Result};

#[derive(Debug, Clone)]
pub struct CreateCriterionRequest {
    pub name: String,
    pub description: Option<String>,
    pub max_score: f64,
}

impl CreateCriterionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EssaySystemError::validation("评分标准名称不能为空"));
        }
        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            return Err(EssaySystemError::validation(format!(
                "评分标准满分必须为正数: {}",
                self.max_score
            )));
        }
        Ok(())
    }
}
