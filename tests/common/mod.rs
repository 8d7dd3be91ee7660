#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rust_essay_system::config::DatabaseConfig;
use rust_essay_system::errors::{EssaySystemError, Result};
use rust_essay_system::grading::{EssayGrader, GradingModel, TextExtractor};
use rust_essay_system::models::criteria::{entities::Criterion, requests::CreateCriterionRequest};
use rust_essay_system::models::users::{
    entities::{User, UserRole},
    requests::CreateUserRequest,
};
use rust_essay_system::storage::{SeaOrmStorage, Storage};

pub async fn memory_storage() -> Arc<SeaOrmStorage> {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        ..DatabaseConfig::default()
    };
    rust_essay_system::storage::create_storage(&config)
        .await
        .expect("in-memory storage")
}

pub async fn add_user(storage: &SeaOrmStorage, name: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            name: name.to_string(),
            email: format!("{}@school.test", name.to_lowercase()),
            role,
        })
        .await
        .expect("create user")
}

pub async fn add_criterion(storage: &SeaOrmStorage, name: &str, max_score: f64) -> Criterion {
    storage
        .create_criterion(CreateCriterionRequest {
            name: name.to_string(),
            description: None,
            max_score,
        })
        .await
        .expect("create criterion")
}

/// 按顺序返回预设回复的模型，并记录收到的提示词
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<Vec<Result<String>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    /// 每次调用都返回同一段文本
    pub fn always(reply: &str) -> Self {
        Self {
            replies: Mutex::new(vec![Ok(reply.to_string())]),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            replies: Mutex::new(vec![Err(EssaySystemError::model_request(message))]),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl GradingModel for ScriptedModel {
    async fn generate(&self, prompt: &str, _temperature: f32) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let replies = self.replies.lock().unwrap();
        // 最后一条回复重复使用
        replies
            .last()
            .cloned()
            .unwrap_or_else(|| Err(EssaySystemError::model_response("no scripted reply")))
    }
}

/// 不读文件，直接返回固定文本
pub struct StubExtractor(pub String);

impl TextExtractor for StubExtractor {
    fn extract(&self, _path: &Path) -> Result<String> {
        Ok(self.0.clone())
    }
}

pub fn grader(
    storage: &Arc<SeaOrmStorage>,
    text: &str,
    model: Arc<ScriptedModel>,
) -> EssayGrader {
    EssayGrader::new(
        storage.clone(),
        Arc::new(StubExtractor(text.to_string())),
        model,
    )
}

pub const FENCED_REPLY: &str = "Here is my assessment:\n```json\n{\"fit\":\"yes\",\"score\":8,\"general_explanation\":\"solid\",\"grammar\":3,\"content_depth\":5}\n```";
