//! PostgreSQL submission store tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use vocab_match_backend::db::Database;
use vocab_match_backend::models::NewSubmission;
use vocab_match_backend::services::store::SubmissionStore;
use vocabmatch_core::types::Student;
use vocabmatch_core::vocab::EXERCISE_ID;

use common::fixtures;

async fn connect() -> Database {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations().await.expect("Failed to run migrations");
    db
}

async fn cleanup(db: &Database, student_id: &str) {
    let _ = sqlx::query("DELETE FROM student_answers WHERE student_id = $1")
        .bind(student_id)
        .execute(db.pool())
        .await;
}

/// Test the row comes back with a server-assigned submit time.
#[tokio::test]
#[ignore = "requires database"]
async fn test_upsert_assigns_submit_time() {
    let db = connect().await;
    let student_id = fixtures::unique_student_id("test");
    let student = Student::new("张三", &student_id).unwrap();

    let before = chrono::Utc::now();
    let record = db
        .upsert_submission(&NewSubmission::completed_game(&student))
        .await
        .unwrap();

    assert!(record.id > 0);
    assert_eq!(record.exercise_id, EXERCISE_ID);
    assert_eq!(record.score, 100);
    assert!(record.completed);
    assert!(record.submit_time >= before - chrono::Duration::seconds(5));

    cleanup(&db, &student_id).await;
}

/// Test re-submitting lands as an update, not a second row.
#[tokio::test]
#[ignore = "requires database"]
async fn test_upsert_is_idempotent_per_student() {
    let db = connect().await;
    let student_id = fixtures::unique_student_id("test");
    let student = Student::new("张三", &student_id).unwrap();
    let submission = NewSubmission::completed_game(&student);

    let first = db.upsert_submission(&submission).await.unwrap();
    let second = db.upsert_submission(&submission).await.unwrap();

    // Same row, refreshed submit time.
    assert_eq!(first.id, second.id);
    assert!(second.submit_time >= first.submit_time);

    let records = db.list_completed(EXERCISE_ID).await.unwrap();
    let mine: Vec<_> = records
        .iter()
        .filter(|r| r.student_id == student_id)
        .collect();
    assert_eq!(mine.len(), 1);

    cleanup(&db, &student_id).await;
}

/// Test the completion list is ordered newest first.
#[tokio::test]
#[ignore = "requires database"]
async fn test_list_completed_newest_first() {
    let db = connect().await;
    let earlier_id = fixtures::unique_student_id("test");
    let later_id = fixtures::unique_student_id("test");

    let earlier = Student::new("张三", &earlier_id).unwrap();
    db.upsert_submission(&NewSubmission::completed_game(&earlier))
        .await
        .unwrap();
    let later = Student::new("李四", &later_id).unwrap();
    db.upsert_submission(&NewSubmission::completed_game(&later))
        .await
        .unwrap();

    let records = db.list_completed(EXERCISE_ID).await.unwrap();
    let earlier_pos = records.iter().position(|r| r.student_id == earlier_id);
    let later_pos = records.iter().position(|r| r.student_id == later_id);
    assert!(later_pos.unwrap() < earlier_pos.unwrap());

    cleanup(&db, &earlier_id).await;
    cleanup(&db, &later_id).await;
}
