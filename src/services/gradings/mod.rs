pub mod finalize;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::essays::entities::{Essay, EssayStatus};
use crate::models::gradings::{entities::Grading, requests::FinalizeGradingRequest};
use crate::storage::Storage;

/// 教师审核：确认最终成绩、修改论文状态
pub struct GradingService {
    storage: Arc<dyn Storage>,
}

impl GradingService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub async fn finalize_grading(
        &self,
        grading_id: i64,
        teacher_id: i64,
        req: FinalizeGradingRequest,
    ) -> Result<Grading> {
        finalize::finalize_grading(self, grading_id, teacher_id, req).await
    }

    pub async fn review_essay(
        &self,
        essay_id: i64,
        teacher_id: i64,
        status: EssayStatus,
    ) -> Result<Essay> {
        finalize::review_essay(self, essay_id, teacher_id, status).await
    }
}
