//! AI 评分流水线
//!
//! 提取文本 → 获取评分标准 → 构建提示词 → 调用模型 → 解析响应。
//! 任何一步失败都会得到形状一致的哨兵结果，[`EssayGrader::grade`] 从不返回错误，
//! 调用方可以统一持久化。

pub mod client;
pub mod extractor;
pub mod parser;
pub mod prompt;
pub mod result;
pub mod rubric;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::EssaySystemError;

pub use client::{DEFAULT_TEMPERATURE, GeminiClient, GradingModel};
pub use extractor::{DocumentTextExtractor, TextExtractor};
pub use result::{AiScore, GradingResult, ResultValue};
pub use rubric::{CriteriaSource, Rubric};

/// 流水线阶段，仅用于日志
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradingStage {
    Extracting,
    FetchingRubric,
    Prompting,
    CallingModel,
    Parsing,
    Done,
}

impl fmt::Display for GradingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GradingStage::Extracting => "extracting",
            GradingStage::FetchingRubric => "fetching_rubric",
            GradingStage::Prompting => "prompting",
            GradingStage::CallingModel => "calling_model",
            GradingStage::Parsing => "parsing",
            GradingStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// 评分编排器，依赖在构造时注入
#[derive(Clone)]
pub struct EssayGrader {
    criteria: Arc<dyn CriteriaSource>,
    extractor: Arc<dyn TextExtractor>,
    model: Arc<dyn GradingModel>,
}

impl EssayGrader {
    pub fn new(
        criteria: Arc<dyn CriteriaSource>,
        extractor: Arc<dyn TextExtractor>,
        model: Arc<dyn GradingModel>,
    ) -> Self {
        Self {
            criteria,
            extractor,
            model,
        }
    }

    /// 使用全部评分标准和默认温度评分
    pub async fn grade_default(&self, path: &Path, title: &str) -> GradingResult {
        self.grade(path, title, None, DEFAULT_TEMPERATURE).await
    }

    /// 对一篇论文评分
    ///
    /// `criterion_ids` 为空或 `None` 时使用全部评分标准。
    pub async fn grade(
        &self,
        path: &Path,
        title: &str,
        criterion_ids: Option<&[i64]>,
        temperature: f32,
    ) -> GradingResult {
        let path_text = path.display().to_string();

        Self::enter(GradingStage::Extracting, &path_text);
        // lopdf 解析是 CPU 密集的同步操作，放到阻塞线程池
        let extractor = Arc::clone(&self.extractor);
        let owned_path = path.to_path_buf();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&owned_path))
            .await
            .unwrap_or_else(|e| Err(EssaySystemError::extraction(format!("提取任务异常退出: {e}"))));
        let essay_text = match extracted {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                warn!("No text layer in {}, cannot grade", path_text);
                return GradingResult::cannot_extract(&path_text);
            }
            Err(e) => {
                warn!("Failed to extract {}: {}", path_text, e);
                return GradingResult::cannot_extract(&path_text);
            }
        };

        Self::enter(GradingStage::FetchingRubric, &path_text);
        let rubric = match rubric::fetch_rubric(self.criteria.as_ref(), criterion_ids).await {
            Ok(rubric) => rubric,
            Err(e) => {
                warn!("Failed to load grading criteria: {}", e);
                return GradingResult::rubric_error(e.message());
            }
        };

        Self::enter(GradingStage::Prompting, &path_text);
        let keys = prompt::expected_keys(&rubric.criteria);
        let prompt = prompt::GradingPrompt {
            title,
            essay_text: &essay_text,
            rubric_text: &rubric.text,
            expected_keys: &keys,
        }
        .render();

        Self::enter(GradingStage::CallingModel, &path_text);
        let raw = match self.model.generate(&prompt, temperature).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Grading model call failed for {}: {}", path_text, e);
                return GradingResult::model_error(e.message());
            }
        };
        debug!("Response from grading model: {}", raw);

        Self::enter(GradingStage::Parsing, &path_text);
        let result = parser::parse_response(&raw);

        Self::enter(GradingStage::Done, &path_text);
        if result.is_sentinel() {
            warn!("Model response for {} could not be parsed", path_text);
        } else {
            info!(
                "Graded {} with {} criteria (score: {:?})",
                path_text,
                rubric.criteria.len(),
                result.overall_score()
            );
        }
        result
    }

    fn enter(stage: GradingStage, path: &str) {
        debug!(stage = %stage, "Grading {}", path);
    }
}
