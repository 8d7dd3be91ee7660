//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod criteria;
mod essays;
mod gradings;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{EssaySystemError, Result};
use crate::grading::AiScore;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| EssaySystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库每个连接都是独立的库，只能使用单连接
        let max_connections = if Self::is_sqlite_memory(url) {
            1
        } else {
            config.pool_size.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| EssaySystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| EssaySystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    fn is_sqlite_memory(url: &str) -> bool {
        url.contains(":memory:") || url.contains("mode=memory")
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(EssaySystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// AI 评分以 JSON 文本落库
pub(crate) fn encode_ai_score(ai_score: Option<&AiScore>) -> Result<Option<String>> {
    ai_score
        .map(serde_json::to_string)
        .transpose()
        .map_err(EssaySystemError::from)
}

/// 读取 AI 评分；无法解析的历史数据按错误文本返回
pub(crate) fn decode_ai_score(raw: Option<String>) -> Option<AiScore> {
    raw.map(|text| serde_json::from_str(&text).unwrap_or(AiScore::Error(text)))
}

pub(crate) fn timestamp_to_datetime(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

// Storage trait 实现
use crate::grading::CriteriaSource;
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    // 评分标准模块
    async fn create_criterion(&self, req: CreateCriterionRequest) -> Result<Criterion> {
        self.create_criterion_impl(req).await
    }

    async fn list_criteria(&self) -> Result<Vec<Criterion>> {
        self.list_criteria_impl().await
    }

    async fn get_criteria_by_ids(&self, ids: &[i64]) -> Result<Vec<Criterion>> {
        self.get_criteria_by_ids_impl(ids).await
    }

    async fn delete_criterion(&self, id: i64) -> Result<bool> {
        self.delete_criterion_impl(id).await
    }

    // 论文模块
    async fn create_essay(&self, req: CreateEssayRequest) -> Result<Essay> {
        self.create_essay_impl(req).await
    }

    async fn get_essay_by_id(&self, id: i64) -> Result<Option<Essay>> {
        self.get_essay_by_id_impl(id).await
    }

    async fn get_essay_by_file_url(&self, file_url: &str) -> Result<Option<Essay>> {
        self.get_essay_by_file_url_impl(file_url).await
    }

    async fn update_essay_ai_score(&self, id: i64, ai_score: &AiScore) -> Result<bool> {
        self.update_essay_ai_score_impl(id, ai_score).await
    }

    async fn update_essay_status(&self, id: i64, status: EssayStatus) -> Result<bool> {
        self.update_essay_status_impl(id, status).await
    }

    // 评分记录模块
    async fn create_grading(&self, req: CreateGradingRequest) -> Result<Grading> {
        self.create_grading_impl(req).await
    }

    async fn get_grading_by_id(&self, id: i64) -> Result<Option<Grading>> {
        self.get_grading_by_id_impl(id).await
    }

    async fn list_gradings_by_essay(&self, essay_id: i64) -> Result<Vec<Grading>> {
        self.list_gradings_by_essay_impl(essay_id).await
    }

    async fn finalize_grading(
        &self,
        id: i64,
        req: FinalizeGradingRequest,
    ) -> Result<Option<Grading>> {
        self.finalize_grading_impl(id, req).await
    }
}

// 评分流水线只需要评分标准的只读视图
#[async_trait]
impl CriteriaSource for SeaOrmStorage {
    async fn criteria_by_ids(&self, ids: &[i64]) -> Result<Vec<Criterion>> {
        self.get_criteria_by_ids_impl(ids).await
    }

    async fn all_criteria(&self) -> Result<Vec<Criterion>> {
        self.list_criteria_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("essay.db").unwrap(),
            "sqlite://essay.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/essays").unwrap(),
            "postgres://u:p@localhost/essays"
        );
        assert!(SeaOrmStorage::build_database_url("mongodb://localhost").is_err());
    }

    #[test]
    fn test_ai_score_text_round_trip() {
        let raw = Some("not json at all".to_string());
        assert_eq!(
            decode_ai_score(raw),
            Some(AiScore::Error("not json at all".to_string()))
        );

        let score = AiScore::Error("Lỗi chấm điểm".to_string());
        let encoded = encode_ai_score(Some(&score)).unwrap();
        assert_eq!(decode_ai_score(encoded), Some(score));
        assert_eq!(encode_ai_score(None).unwrap(), None);
    }
}
