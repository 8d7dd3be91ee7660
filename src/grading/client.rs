//! 生成式模型客户端

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GradingConfig;
use crate::errors::{EssaySystemError, Result};

/// 默认采样温度
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// 评分模型：提示词进，原始文本出
///
/// 失败直接返回错误，不在内部重试。
#[async_trait]
pub trait GradingModel: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;
}

/// Gemini `generateContent` REST 客户端
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// 根据配置构造客户端，缺少密钥或模型名时返回配置错误
    pub fn new(config: &GradingConfig) -> Result<Self> {
        let api_key = config.api_key.trim();
        if api_key.is_empty() {
            return Err(EssaySystemError::model_config(
                "GEMINI_API_KEY is not set; configure grading.api_key",
            ));
        }

        let model = config.model.trim();
        if model.is_empty() {
            return Err(EssaySystemError::model_config("grading.model must not be empty"));
        }

        let api_base = config.api_base.trim().trim_end_matches('/');
        if api_base.is_empty() {
            return Err(EssaySystemError::model_config(
                "grading.api_base must not be empty",
            ));
        }

        let http = Client::builder()
            .build()
            .map_err(|e| EssaySystemError::model_config(format!("无法创建 HTTP 客户端: {e}")))?;

        Ok(Self {
            http,
            endpoint: format!("{api_base}/models/{model}:generateContent"),
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// 第一个候选的全部文本片段拼接
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[async_trait]
impl GradingModel for GeminiClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig { temperature },
        };

        debug!("Calling grading model at {}", self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EssaySystemError::model_request(format!(
                "模型接口返回 {status}: {detail}"
            )));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EssaySystemError::model_response(format!("无法解析模型响应: {e}")))?;

        payload
            .into_text()
            .ok_or_else(|| EssaySystemError::model_response("模型响应中没有文本内容"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> GradingConfig {
        GradingConfig {
            api_key: api_key.to_string(),
            ..GradingConfig::default()
        }
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = GeminiClient::new(&config("  ")).unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[test]
    fn test_empty_model_is_config_error() {
        let mut cfg = config("key");
        cfg.model = String::new();
        assert!(GeminiClient::new(&cfg).is_err());
    }

    #[test]
    fn test_endpoint() {
        let mut cfg = config("secret-key");
        cfg.api_base = "https://example.test/v1beta/".to_string();
        cfg.model = "gemini-1.5-pro".to_string();

        let client = GeminiClient::new(&cfg).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-1.5-pro:generateContent"
        );
        assert!(!format!("{client:?}").contains("secret-key"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "grade this" }],
            }],
            generation_config: GenerationConfig { temperature: 0.5 },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "grade this");
        assert_eq!(value["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"```json\n"},{"text":"{}\n```"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(payload.into_text().as_deref(), Some("```json\n{}\n```"));
    }

    #[test]
    fn test_response_without_candidates() {
        let payload: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(payload.into_text().is_none());
    }
}
