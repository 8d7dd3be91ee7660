use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::grading::AiScore;
use crate::models::{
    criteria::{entities::Criterion, requests::CreateCriterionRequest},
    essays::{
        entities::{Essay, EssayStatus},
        requests::CreateEssayRequest,
    },
    gradings::{
        entities::Grading,
        requests::{CreateGradingRequest, FinalizeGradingRequest},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    /// 评分标准管理方法
    // 创建评分标准
    async fn create_criterion(&self, req: CreateCriterionRequest) -> Result<Criterion>;
    // 列出全部评分标准
    async fn list_criteria(&self) -> Result<Vec<Criterion>>;
    // 按ID批量获取评分标准（不存在的ID忽略）
    async fn get_criteria_by_ids(&self, ids: &[i64]) -> Result<Vec<Criterion>>;
    // 删除评分标准
    async fn delete_criterion(&self, id: i64) -> Result<bool>;

    /// 论文管理方法
    // 创建论文
    async fn create_essay(&self, req: CreateEssayRequest) -> Result<Essay>;
    // 通过ID获取论文
    async fn get_essay_by_id(&self, id: i64) -> Result<Option<Essay>>;
    // 通过文件URL获取论文
    async fn get_essay_by_file_url(&self, file_url: &str) -> Result<Option<Essay>>;
    // 写入 AI 评分
    async fn update_essay_ai_score(&self, id: i64, ai_score: &AiScore) -> Result<bool>;
    // 更新论文状态
    async fn update_essay_status(&self, id: i64, status: EssayStatus) -> Result<bool>;

    /// 评分记录管理方法
    // 创建评分记录
    async fn create_grading(&self, req: CreateGradingRequest) -> Result<Grading>;
    // 通过ID获取评分记录
    async fn get_grading_by_id(&self, id: i64) -> Result<Option<Grading>>;
    // 列出论文的评分记录
    async fn list_gradings_by_essay(&self, essay_id: i64) -> Result<Vec<Grading>>;
    // 教师确认最终成绩
    async fn finalize_grading(
        &self,
        id: i64,
        req: FinalizeGradingRequest,
    ) -> Result<Option<Grading>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
