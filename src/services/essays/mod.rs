pub mod regrade;
pub mod submit;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::UploadConfig;
use crate::errors::Result;
use crate::grading::{DEFAULT_TEMPERATURE, EssayGrader};
use crate::models::essays::{
    requests::SubmitEssayRequest,
    responses::{RegradeEntry, SubmitEssayResponse},
};
use crate::storage::Storage;

pub struct EssayService {
    storage: Arc<dyn Storage>,
    grader: EssayGrader,
    upload: UploadConfig,
    temperature: f32,
}

impl EssayService {
    pub fn new(storage: Arc<dyn Storage>, grader: EssayGrader, upload: UploadConfig) -> Self {
        Self {
            storage,
            grader,
            upload,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// 全部评分标准 ID（提交和重评都使用全部标准）
    pub(crate) async fn all_criterion_ids(&self) -> Result<Vec<i64>> {
        let criteria = self.storage.list_criteria().await?;
        Ok(criteria.into_iter().map(|c| c.id).collect())
    }

    /// 提交论文并立即进行 AI 评分
    pub async fn submit_essay(&self, req: SubmitEssayRequest) -> Result<SubmitEssayResponse> {
        submit::submit_essay(self, req).await
    }

    /// 批量重评已上传的文件
    pub async fn regrade_files(&self, files: &[PathBuf]) -> Vec<RegradeEntry> {
        regrade::regrade_files(self, files).await
    }
}
