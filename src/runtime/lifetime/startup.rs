use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::grading::{DocumentTextExtractor, EssayGrader, GeminiClient};
use crate::services::{EssayService, GradingService};
use crate::storage::{SeaOrmStorage, Storage};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub grader: EssayGrader,
    pub essays: EssayService,
    pub gradings: GradingService,
}

/// 准备运行上下文：存储、评分客户端、评分编排器和业务服务
///
/// 缺少模型 API Key 属于致命配置错误。
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    // 已安装过时忽略
    let _ = rustls::crypto::ring::default_provider().install_default();

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let model = GeminiClient::new(&config.grading)?;
    debug!("Grading model client ready: {:?}", model);

    let grader = EssayGrader::new(
        storage.clone(),
        Arc::new(DocumentTextExtractor),
        Arc::new(model),
    );

    let dyn_storage: Arc<dyn Storage> = storage.clone();
    let essays = EssayService::new(dyn_storage.clone(), grader.clone(), config.upload.clone())
        .with_temperature(config.grading.temperature);
    let gradings = GradingService::new(dyn_storage);

    Ok(StartupContext {
        storage,
        grader,
        essays,
        gradings,
    })
}
