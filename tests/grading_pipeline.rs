mod common;

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use common::{FENCED_REPLY, ScriptedModel, add_criterion, grader, memory_storage};
use rust_essay_system::grading::result::{FIT_UNDETERMINED, SCORE_CANNOT_GRADE};
use rust_essay_system::grading::rubric::{self, HOLISTIC_FALLBACK};
use rust_essay_system::grading::{DEFAULT_TEMPERATURE, GradingResult, ResultValue};

fn expected(value: serde_json::Value) -> GradingResult {
    GradingResult::from_json_object(value.as_object().cloned().unwrap())
}

#[tokio::test]
async fn prompt_carries_rubric_and_one_placeholder_per_criterion() {
    let storage = memory_storage().await;
    let grammar = add_criterion(&storage, "Grammar", 4.0).await;
    let depth = add_criterion(&storage, "Content  Depth", 6.0).await;
    let model = Arc::new(ScriptedModel::always(FENCED_REPLY));
    let grader = grader(&storage, "Rivers shape the land.", model.clone());

    let ids = [grammar.id, depth.id];
    grader
        .grade(Path::new("rivers.pdf"), "Rivers", Some(ids.as_slice()), DEFAULT_TEMPERATURE)
        .await;

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];

    let rubric_text = rubric::render_rubric(&[grammar, depth]);
    assert!(prompt.contains(&rubric_text));
    assert!(prompt.contains("Rivers shape the land."));
    assert_eq!(prompt.matches("\"grammar\": \"[score for grammar]\"").count(), 1);
    assert_eq!(
        prompt
            .matches("\"content_depth\": \"[score for content_depth]\"")
            .count(),
        1
    );
}

#[tokio::test]
async fn empty_extraction_yields_cannot_extract_sentinel() {
    let storage = memory_storage().await;
    let model = Arc::new(ScriptedModel::always(FENCED_REPLY));
    let grader = grader(&storage, "", model.clone());

    let result = grader
        .grade_default(Path::new("/tmp/missing/essay.pdf"), "Anything")
        .await;

    assert_eq!(
        result,
        expected(json!({
            "fit": "undetermined",
            "score": "cannot grade",
            "explanation": "could not extract content from /tmp/missing/essay.pdf"
        }))
    );
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn fenced_reply_is_returned_unchanged() {
    let storage = memory_storage().await;
    let grammar = add_criterion(&storage, "Grammar", 4.0).await;
    let depth = add_criterion(&storage, "Content Depth", 6.0).await;
    let reply = "```json\n{\"fit\":\"Có\",\"overall\":8,\"grammar\":3,\"content_depth\":5}\n```";
    let model = Arc::new(ScriptedModel::always(reply));
    let grader = grader(&storage, "Some essay text", model);

    let ids = [grammar.id, depth.id];
    let result = grader
        .grade(Path::new("essay.pdf"), "Essay", Some(ids.as_slice()), DEFAULT_TEMPERATURE)
        .await;

    assert_eq!(
        result,
        expected(json!({"fit": "Có", "overall": 8, "grammar": 3, "content_depth": 5}))
    );
    assert!(!result.is_sentinel());
}

#[tokio::test]
async fn unparseable_reply_keeps_raw_text() {
    let storage = memory_storage().await;
    let raw = "I think this essay is quite good, maybe 7 out of 10.";
    let grader = grader(&storage, "text", Arc::new(ScriptedModel::always(raw)));

    let result = grader.grade_default(Path::new("essay.pdf"), "Essay").await;

    assert_eq!(result.get("fit").and_then(ResultValue::as_str), Some(FIT_UNDETERMINED));
    assert_eq!(
        result.get("score").and_then(ResultValue::as_str),
        Some(SCORE_CANNOT_GRADE)
    );
    assert_eq!(
        result.get("general_explanation").and_then(ResultValue::as_str),
        Some(raw)
    );
}

#[tokio::test]
async fn model_failure_becomes_sentinel() {
    let storage = memory_storage().await;
    let model = Arc::new(ScriptedModel::failing("connection refused"));
    let grader = grader(&storage, "text", model);

    let result = grader.grade_default(Path::new("essay.pdf"), "Essay").await;

    assert!(result.is_sentinel());
    let explanation = result
        .get("general_explanation")
        .and_then(ResultValue::as_str)
        .unwrap();
    assert!(explanation.starts_with("error calling the grading model:"));
    assert!(explanation.contains("connection refused"));
}

#[tokio::test]
async fn rubric_uses_whole_store_or_falls_back_to_holistic() {
    let storage = memory_storage().await;
    add_criterion(&storage, "Grammar", 4.0).await;
    add_criterion(&storage, "Structure", 6.0).await;

    let all = rubric::fetch_rubric(storage.as_ref(), None).await.unwrap();
    let empty = rubric::fetch_rubric(storage.as_ref(), Some(&[] as &[i64])).await.unwrap();
    assert_eq!(all.criteria.len(), 2);
    assert_eq!(empty.text, all.text);

    let unknown = rubric::fetch_rubric(storage.as_ref(), Some(&[404, 405][..]))
        .await
        .unwrap();
    assert!(unknown.is_holistic());
    assert_eq!(unknown.text, HOLISTIC_FALLBACK);
}
