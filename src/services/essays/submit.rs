use tracing::{info, warn};

use super::EssayService;
use crate::errors::{EssaySystemError, Result};
use crate::grading::AiScore;
use crate::models::essays::{
    requests::{CreateEssayRequest, SubmitEssayRequest},
    responses::SubmitEssayResponse,
};
use crate::models::gradings::requests::CreateGradingRequest;
use crate::models::users::entities::UserRole;

/// 检查用户存在且角色正确
async fn ensure_user_role(service: &EssayService, user_id: i64, role: UserRole) -> Result<()> {
    match service.storage().get_user_by_id(user_id).await? {
        Some(user) if user.role == role => Ok(()),
        Some(user) => Err(EssaySystemError::validation(format!(
            "用户 {user_id} 的角色是 {}，不是 {role}",
            user.role
        ))),
        None => Err(EssaySystemError::not_found(format!("{role} {user_id} 不存在"))),
    }
}

/// 保存论文、评分、回写 AI 评分并创建评分记录
///
/// AI 评分失败不会导致提交失败，失败信息写在 `ai_score` 里。
pub async fn submit_essay(
    service: &EssayService,
    req: SubmitEssayRequest,
) -> Result<SubmitEssayResponse> {
    ensure_user_role(service, req.student_id, UserRole::Student).await?;
    ensure_user_role(service, req.teacher_id, UserRole::Teacher).await?;

    let file_name = req
        .file_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            EssaySystemError::validation(format!("无效的文件路径: {}", req.file_path.display()))
        })?
        .to_string();

    let storage = service.storage();
    let mut essay = storage
        .create_essay(CreateEssayRequest {
            student_id: req.student_id,
            teacher_id: req.teacher_id,
            title: req.title,
            file_url: service.upload.file_url(&file_name),
        })
        .await?;
    info!("Essay {} stored as {}", essay.id, essay.file_url);

    let ai_score = match service.all_criterion_ids().await {
        Ok(ids) => {
            let result = service
                .grader
                .grade(&req.file_path, &essay.title, Some(ids.as_slice()), service.temperature)
                .await;
            let score = AiScore::Graded(result);

            match storage.update_essay_ai_score(essay.id, &score).await {
                Ok(_) => score,
                Err(e) => {
                    warn!("Failed to store AI score for essay {}: {}", essay.id, e);
                    AiScore::Error(format!("AI grading error: {e}"))
                }
            }
        }
        Err(e) => {
            warn!("Failed to load criteria for essay {}: {}", essay.id, e);
            AiScore::Error(format!("AI grading error: {e}"))
        }
    };
    essay.ai_score = Some(ai_score.clone());

    let grading = storage
        .create_grading(CreateGradingRequest {
            essay_id: essay.id,
            teacher_id: essay.teacher_id,
            ai_score: Some(ai_score),
        })
        .await?;

    Ok(SubmitEssayResponse { essay, grading })
}
