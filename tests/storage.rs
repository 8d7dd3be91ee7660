mod common;

use common::{add_criterion, add_user, memory_storage};
use rust_essay_system::errors::EssaySystemError;
use rust_essay_system::grading::{AiScore, GradingResult};
use rust_essay_system::models::criteria::requests::CreateCriterionRequest;
use rust_essay_system::models::essays::{entities::EssayStatus, requests::CreateEssayRequest};
use rust_essay_system::models::gradings::requests::CreateGradingRequest;
use rust_essay_system::models::users::entities::UserRole;
use rust_essay_system::storage::Storage;

#[tokio::test]
async fn criteria_lookup_ignores_unknown_ids_and_delete_reports_presence() {
    let storage = memory_storage().await;
    let grammar = add_criterion(&storage, "Grammar", 4.0).await;
    let depth = add_criterion(&storage, "Content Depth", 6.0).await;

    let found = storage
        .get_criteria_by_ids(&[depth.id, 777, grammar.id])
        .await
        .unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Grammar", "Content Depth"]);

    assert!(storage.delete_criterion(grammar.id).await.unwrap());
    assert!(!storage.delete_criterion(grammar.id).await.unwrap());
    assert_eq!(storage.list_criteria().await.unwrap(), vec![depth]);
}

#[tokio::test]
async fn criterion_names_are_unique_and_validated() {
    let storage = memory_storage().await;
    add_criterion(&storage, "Grammar", 4.0).await;

    let duplicate = storage
        .create_criterion(CreateCriterionRequest {
            name: "Grammar".to_string(),
            description: None,
            max_score: 2.0,
        })
        .await;
    assert!(matches!(duplicate, Err(EssaySystemError::DatabaseOperation(_))));

    let invalid = storage
        .create_criterion(CreateCriterionRequest {
            name: "Style".to_string(),
            description: None,
            max_score: 0.0,
        })
        .await;
    assert!(matches!(invalid, Err(EssaySystemError::Validation(_))));
}

#[tokio::test]
async fn essays_by_file_url_prefer_latest_and_keep_ai_score() {
    let storage = memory_storage().await;
    let student = add_user(&storage, "Lan", UserRole::Student).await;
    let teacher = add_user(&storage, "Minh", UserRole::Teacher).await;

    let mut ids = Vec::new();
    for title in ["Draft", "Final"] {
        let essay = storage
            .create_essay(CreateEssayRequest {
                student_id: student.id,
                teacher_id: teacher.id,
                title: title.to_string(),
                file_url: "/uploads/essay.pdf".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(essay.status, EssayStatus::Pending);
        assert!(essay.ai_score.is_none());
        ids.push(essay.id);
    }

    let latest = storage
        .get_essay_by_file_url("/uploads/essay.pdf")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id, ids[1]);
    assert_eq!(latest.title, "Final");
    assert!(storage.get_essay_by_file_url("/uploads/other.pdf").await.unwrap().is_none());

    let score = AiScore::Graded(GradingResult::cannot_extract("essay.pdf"));
    assert!(storage.update_essay_ai_score(latest.id, &score).await.unwrap());
    assert!(!storage.update_essay_ai_score(9999, &score).await.unwrap());

    let stored = storage.get_essay_by_id(latest.id).await.unwrap().unwrap();
    assert_eq!(stored.ai_score, Some(score));
}

#[tokio::test]
async fn gradings_are_listed_per_essay() {
    let storage = memory_storage().await;
    let student = add_user(&storage, "Lan", UserRole::Student).await;
    let teacher = add_user(&storage, "Minh", UserRole::Teacher).await;
    let essay = storage
        .create_essay(CreateEssayRequest {
            student_id: student.id,
            teacher_id: teacher.id,
            title: "Rivers".to_string(),
            file_url: "/uploads/rivers.pdf".to_string(),
        })
        .await
        .unwrap();

    for ai_score in [None, Some(AiScore::Error("model unavailable".to_string()))] {
        storage
            .create_grading(CreateGradingRequest {
                essay_id: essay.id,
                teacher_id: teacher.id,
                ai_score,
            })
            .await
            .unwrap();
    }

    let gradings = storage.list_gradings_by_essay(essay.id).await.unwrap();
    assert_eq!(gradings.len(), 2);
    assert!(gradings[0].ai_score.is_none());
    assert_eq!(
        gradings[1].ai_score,
        Some(AiScore::Error("model unavailable".to_string()))
    );
    assert!(gradings.iter().all(|g| g.final_score.is_none()));
    assert!(storage.list_gradings_by_essay(9999).await.unwrap().is_empty());
}
