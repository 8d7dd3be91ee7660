//! 评分标准存储操作

use super::{SeaOrmStorage, timestamp_to_datetime};
use crate::entity::grading_criteria::{ActiveModel, Column, Entity as GradingCriteria, Model};
use crate::errors::{EssaySystemError, Result};
use crate::models::criteria::{entities::Criterion, requests::CreateCriterionRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl Model {
    pub(crate) fn into_criterion(self) -> Criterion {
        Criterion {
            id: self.id,
            name: self.name,
            description: self.description,
            max_score: self.max_score,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}

impl SeaOrmStorage {
    /// 创建评分标准
    pub async fn create_criterion_impl(&self, req: CreateCriterionRequest) -> Result<Criterion> {
        req.validate()?;
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            max_score: Set(req.max_score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("创建评分标准失败: {e}")))?;

        Ok(result.into_criterion())
    }

    /// 列出全部评分标准（按 ID 排序）
    pub async fn list_criteria_impl(&self) -> Result<Vec<Criterion>> {
        let results = GradingCriteria::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("查询评分标准失败: {e}")))?;

        Ok(results.into_iter().map(Model::into_criterion).collect())
    }

    /// 按 ID 批量获取评分标准，不存在的 ID 直接忽略
    pub async fn get_criteria_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Criterion>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = GradingCriteria::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("查询评分标准失败: {e}")))?;

        Ok(results.into_iter().map(Model::into_criterion).collect())
    }

    /// 删除评分标准（已有的评分结果不受影响）
    pub async fn delete_criterion_impl(&self, id: i64) -> Result<bool> {
        let result = GradingCriteria::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| EssaySystemError::database_operation(format!("删除评分标准失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
