//! 评分结果
//!
//! 子分数的键由评分标准名称派生，集合随数据变化，所以结果是
//! 字符串到 [`ResultValue`] 的映射，而不是固定字段的结构体。
//! 键保持模型输出时的顺序。

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 适配度无法判断时的取值
pub const FIT_UNDETERMINED: &str = "undetermined";
/// 无法评分时 `score` 字段的取值
pub const SCORE_CANNOT_GRADE: &str = "cannot grade";

pub const KEY_FIT: &str = "fit";
pub const KEY_SCORE: &str = "score";
pub const KEY_EXPLANATION: &str = "explanation";
pub const KEY_GENERAL_EXPLANATION: &str = "general_explanation";
pub const KEY_DETAILED_EXPLANATION: &str = "detailed_explanation";

/// 结果中的单个取值：数值、文本（含哨兵文本），其余 JSON 原样保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl ResultValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResultValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResultValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for ResultValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => ResultValue::Number(n),
            serde_json::Value::String(s) => ResultValue::Text(s),
            other => ResultValue::Other(other),
        }
    }
}

impl From<&str> for ResultValue {
    fn from(value: &str) -> Self {
        ResultValue::Text(value.to_string())
    }
}

impl From<String> for ResultValue {
    fn from(value: String) -> Self {
        ResultValue::Text(value)
    }
}

/// 一次评分的输出
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradingResult {
    fields: IndexMap<String, ResultValue>,
}

impl GradingResult {
    /// 文档无法提取文本
    pub fn cannot_extract(path: &str) -> Self {
        Self::sentinel(
            KEY_EXPLANATION,
            format!("could not extract content from {path}"),
        )
    }

    /// 调用模型（或准备调用）失败
    pub fn model_error(message: &str) -> Self {
        Self::sentinel(
            KEY_GENERAL_EXPLANATION,
            format!("error calling the grading model: {message}"),
        )
    }

    /// 评分标准读取失败
    pub fn rubric_error(message: &str) -> Self {
        Self::sentinel(
            KEY_GENERAL_EXPLANATION,
            format!("could not load grading criteria: {message}"),
        )
    }

    /// 模型输出无法解析，原文保留供人工查看
    pub fn unparseable(raw: &str) -> Self {
        Self::sentinel(KEY_GENERAL_EXPLANATION, raw.to_string())
    }

    fn sentinel(explanation_key: &str, explanation: String) -> Self {
        let mut result = Self::default();
        result.insert(KEY_FIT, FIT_UNDETERMINED);
        result.insert(KEY_SCORE, SCORE_CANNOT_GRADE);
        result.insert(explanation_key, explanation);
        result
    }

    pub fn from_json_object(object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: object
                .into_iter()
                .map(|(key, value)| (key, ResultValue::from(value)))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ResultValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ResultValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 是否为哨兵结果（`score == "cannot grade"`）
    pub fn is_sentinel(&self) -> bool {
        self.get(KEY_SCORE).and_then(ResultValue::as_str) == Some(SCORE_CANNOT_GRADE)
    }

    /// 总分（模型可能给数值，也可能给 `"8"` 这样的文本）
    pub fn overall_score(&self) -> Option<f64> {
        match self.get(KEY_SCORE)? {
            ResultValue::Number(n) => n.as_f64(),
            ResultValue::Text(s) => s.trim().parse().ok(),
            ResultValue::Other(_) => None,
        }
    }
}

/// 论文上保存的 AI 评分：结构化结果，或调用方记录的错误文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AiScore {
    Graded(GradingResult),
    Error(String),
}

impl From<GradingResult> for AiScore {
    fn from(result: GradingResult) -> Self {
        AiScore::Graded(result)
    }
}
