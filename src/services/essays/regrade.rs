use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::EssayService;
use crate::errors::{EssaySystemError, Result};
use crate::grading::{AiScore, GradingResult};
use crate::models::essays::responses::RegradeEntry;
use crate::utils::file_magic::dotted_extension;

/// 依次重评每个文件；单个文件失败只记录在该文件的结果里
pub async fn regrade_files(service: &EssayService, files: &[PathBuf]) -> Vec<RegradeEntry> {
    let criterion_ids = service.all_criterion_ids().await;
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let filename = display_name(path);

        let entry = match &criterion_ids {
            Ok(ids) => match regrade_one(service, path, &filename, ids).await {
                Ok(score) => RegradeEntry::graded(filename, score),
                Err(e) => {
                    warn!("Re-grade of {} failed: {}", filename, e);
                    RegradeEntry::failed(filename, e.message())
                }
            },
            Err(e) => RegradeEntry::failed(filename, e.message()),
        };
        results.push(entry);
    }

    info!(
        "Re-graded {} file(s), {} failed",
        results.len(),
        results.iter().filter(|r| r.error.is_some()).count()
    );
    results
}

async fn regrade_one(
    service: &EssayService,
    path: &Path,
    filename: &str,
    criterion_ids: &[i64],
) -> Result<GradingResult> {
    let extension = dotted_extension(path);
    if !service.upload.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(&extension)) {
        return Err(EssaySystemError::validation(format!(
            "File '{filename}' is not an accepted document type"
        )));
    }

    let storage = service.storage();
    let essay = storage
        .get_essay_by_file_url(&service.upload.file_url(filename))
        .await?
        .ok_or_else(|| EssaySystemError::not_found("No matching essay found"))?;

    let result = service
        .grader
        .grade(path, &essay.title, Some(criterion_ids), service.temperature)
        .await;

    storage
        .update_essay_ai_score(essay.id, &AiScore::Graded(result.clone()))
        .await?;

    Ok(result)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
