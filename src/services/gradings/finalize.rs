use tracing::info;

use super::GradingService;
use crate::errors::{EssaySystemError, Result};
use crate::models::essays::entities::{Essay, EssayStatus};
use crate::models::gradings::{entities::Grading, requests::FinalizeGradingRequest};
use crate::utils::validate::validate_final_score;

/// 教师给出最终成绩，只有评分记录所属教师可以操作
pub async fn finalize_grading(
    service: &GradingService,
    grading_id: i64,
    teacher_id: i64,
    req: FinalizeGradingRequest,
) -> Result<Grading> {
    validate_final_score(req.final_score).map_err(EssaySystemError::validation)?;

    let storage = service.storage();
    let grading = storage
        .get_grading_by_id(grading_id)
        .await?
        .ok_or_else(|| EssaySystemError::not_found(format!("评分记录 {grading_id} 不存在")))?;

    if grading.teacher_id != teacher_id {
        return Err(EssaySystemError::authorization("没有修改该评分记录的权限"));
    }

    let updated = storage
        .finalize_grading(grading_id, req)
        .await?
        .ok_or_else(|| EssaySystemError::not_found(format!("评分记录 {grading_id} 不存在")))?;

    info!(
        "Grading {} finalized by teacher {} with score {:?}",
        grading_id, teacher_id, updated.final_score
    );
    Ok(updated)
}

/// 教师审核论文（通过 / 驳回）
pub async fn review_essay(
    service: &GradingService,
    essay_id: i64,
    teacher_id: i64,
    status: EssayStatus,
) -> Result<Essay> {
    let storage = service.storage();
    let essay = storage
        .get_essay_by_id(essay_id)
        .await?
        .ok_or_else(|| EssaySystemError::not_found(format!("论文 {essay_id} 不存在")))?;

    if essay.teacher_id != teacher_id {
        return Err(EssaySystemError::authorization("没有审核该论文的权限"));
    }

    storage.update_essay_status(essay_id, status).await?;

    storage
        .get_essay_by_id(essay_id)
        .await?
        .ok_or_else(|| EssaySystemError::not_found(format!("论文 {essay_id} 不存在")))
}
