//! 论文存储操作

use super::{SeaOrmStorage, decode_ai_score, encode_ai_score, timestamp_to_datetime};
use crate::entity::essays::{ActiveModel, Column, Entity as Essays, Model};
use crate::errors::{EssaySystemError, Result};
use crate::grading::AiScore;
use crate::models::essays::{
    entities::{Essay, EssayStatus},
    requests::CreateEssayRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl Model {
    pub(crate) fn into_essay(self) -> Result<Essay> {
        let status = self
            .status
            .parse::<EssayStatus>()
            .map_err(EssaySystemError::serialization)?;

        Ok(Essay {
            id: self.id,
            student_id: self.student_id,
            teacher_id: self.teacher_id,
            title: self.title,
            file_url: self.file_url,
            status,
            ai_score: decode_ai_score(self.ai_score),
            submitted_at: timestamp_to_datetime(self.submitted_at),
        })
    }
}

impl SeaOrmStorage {
    /// 创建论文（状态为 pending，尚无 AI 评分）
    pub async fn create_essay_impl(&self, req: CreateEssayRequest) -> Result<Essay> {
        let model = ActiveModel {
            student_id: Set(req.student_id),
            teacher_id: Set(req.teacher_id),
            title: Set(req.title),
            file_url: Set(req.file_url),
            status: Set(EssayStatus::Pending.to_string()),
            ai_score: Set(None),
            submitted_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("创建论文失败: {e}")))?;

        result.into_essay()
    }

    /// 通过 ID 获取论文
    pub async fn get_essay_by_id_impl(&self, id: i64) -> Result<Option<Essay>> {
        let result = Essays::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("查询论文失败: {e}")))?;

        result.map(Model::into_essay).transpose()
    }

    /// 通过文件 URL 获取论文（同名文件取最新提交）
    pub async fn get_essay_by_file_url_impl(&self, file_url: &str) -> Result<Option<Essay>> {
        let result = Essays::find()
            .filter(Column::FileUrl.eq(file_url))
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("查询论文失败: {e}")))?;

        result.map(Model::into_essay).transpose()
    }

    /// 写入 AI 评分，重评时直接覆盖
    pub async fn update_essay_ai_score_impl(&self, id: i64, ai_score: &AiScore) -> Result<bool> {
        let encoded = encode_ai_score(Some(ai_score))?;

        let result = Essays::update_many()
            .col_expr(Column::AiScore, sea_orm::sea_query::Expr::value(encoded))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("更新 AI 评分失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新论文状态
    pub async fn update_essay_status_impl(&self, id: i64, status: EssayStatus) -> Result<bool> {
        let result = Essays::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("更新论文状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
