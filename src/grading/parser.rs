//! 模型响应解析
//!
//! 模型通常把 JSON 包在 ```json 代码块里，但并不保证。
//! 先找代码块，找不到再把整段文本当作 JSON。

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::result::GradingResult;

static JSON_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(\{.*\})\s*```").expect("Invalid JSON fence regex"));

/// 代码块中的 JSON 对象；没有代码块时返回整段文本
pub fn extract_json_block(raw: &str) -> &str {
    JSON_FENCE_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map_or(raw, |m| m.as_str())
}

/// 解析模型输出，失败时返回保留原文的哨兵结果
pub fn parse_response(raw: &str) -> GradingResult {
    let candidate = extract_json_block(raw);

    match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(serde_json::Value::Object(object)) => GradingResult::from_json_object(object),
        Ok(other) => {
            warn!("Model response is JSON but not an object: {}", other);
            GradingResult::unparseable(raw)
        }
        Err(e) => {
            warn!("Failed to decode model response as JSON: {}", e);
            GradingResult::unparseable(raw)
        }
    }
}
