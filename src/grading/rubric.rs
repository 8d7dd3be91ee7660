//! 评分标准获取与渲染

use async_trait::async_trait;
use tracing::debug;

use crate::errors::Result;
use crate::models::criteria::entities::Criterion;

/// 没有任何评分标准时嵌入提示词的文本
pub const HOLISTIC_FALLBACK: &str =
    "No explicit grading criteria; grade holistically based on overall impression.";
/// 评分标准列表的标题行
pub const RUBRIC_HEADER: &str = "Grade according to the following criteria:";
/// 评分标准没有描述时的占位
pub const NO_DESCRIPTION: &str = "no description";

/// 评分流水线对评分标准存储的只读视图
#[async_trait]
pub trait CriteriaSource: Send + Sync {
    /// 按 ID 查询，不存在的 ID 直接忽略
    async fn criteria_by_ids(&self, ids: &[i64]) -> Result<Vec<Criterion>>;
    /// 全部评分标准
    async fn all_criteria(&self) -> Result<Vec<Criterion>>;
}

/// 一次评分使用的评分标准：结构化列表和渲染后的文本
#[derive(Debug, Clone, PartialEq)]
pub struct Rubric {
    pub criteria: Vec<Criterion>,
    pub text: String,
}

impl Rubric {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        let text = render_rubric(&criteria);
        Self { criteria, text }
    }

    pub fn is_holistic(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// 获取评分标准：ID 列表非空时只取匹配项，否则取全部
pub async fn fetch_rubric(source: &dyn CriteriaSource, ids: Option<&[i64]>) -> Result<Rubric> {
    let criteria = match ids {
        Some(ids) if !ids.is_empty() => source.criteria_by_ids(ids).await?,
        _ => source.all_criteria().await?,
    };

    debug!("Fetched {} grading criteria", criteria.len());
    Ok(Rubric::new(criteria))
}

pub fn render_rubric(criteria: &[Criterion]) -> String {
    if criteria.is_empty() {
        return HOLISTIC_FALLBACK.to_string();
    }

    let lines: Vec<String> = criteria.iter().map(render_criterion).collect();
    format!("{RUBRIC_HEADER}\n{}", lines.join("\n"))
}

fn render_criterion(criterion: &Criterion) -> String {
    format!(
        "- {}: {} (Max {} points)",
        criterion.name,
        criterion.description.as_deref().unwrap_or(NO_DESCRIPTION),
        criterion.max_score
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn criterion(id: i64, name: &str, description: Option<&str>, max_score: f64) -> Criterion {
        let now = chrono::Utc::now();
        Criterion {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            max_score,
            created_at: now,
            updated_at: now,
        }
    }

    struct InMemoryCriteria {
        criteria: Vec<Criterion>,
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl CriteriaSource for InMemoryCriteria {
        async fn criteria_by_ids(&self, ids: &[i64]) -> Result<Vec<Criterion>> {
            self.calls.lock().unwrap().push("by_ids");
            Ok(self
                .criteria
                .iter()
                .filter(|c| ids.contains(&c.id))
                .cloned()
                .collect())
        }

        async fn all_criteria(&self) -> Result<Vec<Criterion>> {
            self.calls.lock().unwrap().push("all");
            Ok(self.criteria.clone())
        }
    }

    fn source() -> InMemoryCriteria {
        InMemoryCriteria {
            criteria: vec![
                criterion(1, "Grammar", Some("Spelling and syntax"), 4.0),
                criterion(2, "Content Depth", None, 6.0),
            ],
            calls: Mutex::new(Vec::new()),
        }
    }

    #[test]
    fn test_render_lines() {
        let rubric = Rubric::new(source().criteria);
        assert_eq!(
            rubric.text,
            "Grade according to the following criteria:\n\
             - Grammar: Spelling and syntax (Max 4 points)\n\
             - Content Depth: no description (Max 6 points)"
        );
        assert!(!rubric.is_holistic());
    }

    #[test]
    fn test_render_fractional_max_score() {
        let text = render_rubric(&[criterion(1, "Style", None, 2.5)]);
        assert!(text.ends_with("- Style: no description (Max 2.5 points)"));
    }

    #[tokio::test]
    async fn test_empty_ids_scan_everything() {
        let source = source();
        let from_empty = fetch_rubric(&source, Some(&[] as &[i64])).await.unwrap();
        let from_none = fetch_rubric(&source, None).await.unwrap();

        assert_eq!(from_empty, from_none);
        assert_eq!(from_empty.text, render_rubric(&source.criteria));
        assert_eq!(*source.calls.lock().unwrap(), vec!["all", "all"]);
    }

    #[tokio::test]
    async fn test_selected_ids_drop_missing() {
        let source = source();
        let rubric = fetch_rubric(&source, Some(&[2, 99][..])).await.unwrap();

        assert_eq!(rubric.criteria.len(), 1);
        assert_eq!(rubric.criteria[0].name, "Content Depth");
    }

    #[tokio::test]
    async fn test_unknown_ids_fall_back_to_holistic() {
        let rubric = fetch_rubric(&source(), Some(&[41, 42][..])).await.unwrap();
        assert!(rubric.is_holistic());
        assert_eq!(rubric.text, HOLISTIC_FALLBACK);
    }

    #[tokio::test]
    async fn test_empty_store_falls_back_to_holistic() {
        let empty = InMemoryCriteria {
            criteria: Vec::new(),
            calls: Mutex::new(Vec::new()),
        };
        let rubric = fetch_rubric(&empty, None).await.unwrap();
        assert_eq!(rubric.text, HOLISTIC_FALLBACK);
    }
}
