//! 评分记录存储操作

use super::{SeaOrmStorage, decode_ai_score, encode_ai_score, timestamp_to_datetime};
use crate::entity::gradings::{ActiveModel, Column, Entity as Gradings, Model};
use crate::errors::{EssaySystemError, Result};
use crate::models::gradings::{
    entities::Grading,
    requests::{CreateGradingRequest, FinalizeGradingRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl Model {
    pub(crate) fn into_grading(self) -> Grading {
        Grading {
            id: self.id,
            essay_id: self.essay_id,
            teacher_id: self.teacher_id,
            ai_score: decode_ai_score(self.ai_score),
            final_score: self.final_score,
            feedback: self.feedback,
            graded_at: timestamp_to_datetime(self.graded_at),
        }
    }
}

impl SeaOrmStorage {
    /// 创建评分记录（最终分数待教师确认）
    pub async fn create_grading_impl(&self, req: CreateGradingRequest) -> Result<Grading> {
        let model = ActiveModel {
            essay_id: Set(req.essay_id),
            teacher_id: Set(req.teacher_id),
            ai_score: Set(encode_ai_score(req.ai_score.as_ref())?),
            final_score: Set(None),
            feedback: Set(None),
            graded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("创建评分记录失败: {e}")))?;

        Ok(result.into_grading())
    }

    /// 通过 ID 获取评分记录
    pub async fn get_grading_by_id_impl(&self, id: i64) -> Result<Option<Grading>> {
        let result = Gradings::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("查询评分记录失败: {e}")))?;

        Ok(result.map(Model::into_grading))
    }

    /// 列出论文的评分记录
    pub async fn list_gradings_by_essay_impl(&self, essay_id: i64) -> Result<Vec<Grading>> {
        let results = Gradings::find()
            .filter(Column::EssayId.eq(essay_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("查询评分记录失败: {e}")))?;

        Ok(results.into_iter().map(Model::into_grading).collect())
    }

    /// 写入最终分数与评语
    pub async fn finalize_grading_impl(
        &self,
        id: i64,
        req: FinalizeGradingRequest,
    ) -> Result<Option<Grading>> {
        // 先检查评分记录是否存在
        let existing = self.get_grading_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            final_score: Set(Some(req.final_score)),
            graded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(feedback) = req.feedback {
            model.feedback = Set(Some(feedback));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("更新评分记录失败: {e}")))?;

        self.get_grading_by_id_impl(id).await
    }
}
