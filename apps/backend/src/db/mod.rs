//! PostgreSQL database operations

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::{ApiError, Result};
use crate::models::{NewSubmission, SubmissionRecord};
use crate::services::store::{StoreError, SubmissionStore};

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Database(e.into()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl SubmissionStore for Database {
    /// One row per (student_id, exercise_id), enforced by the table's
    /// unique constraint. A re-submission lands as an atomic update that
    /// refreshes the server-assigned submit time.
    async fn upsert_submission(
        &self,
        submission: &NewSubmission,
    ) -> std::result::Result<SubmissionRecord, StoreError> {
        let record = sqlx::query_as::<_, SubmissionRecord>(
            r#"
            INSERT INTO student_answers (student_name, student_id, exercise_id, score, completed, submit_time)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (student_id, exercise_id) DO UPDATE SET
                student_name = EXCLUDED.student_name,
                score = EXCLUDED.score,
                completed = EXCLUDED.completed,
                submit_time = NOW()
            RETURNING id, student_name, student_id, exercise_id, score, completed, submit_time
            "#,
        )
        .bind(&submission.student_name)
        .bind(&submission.student_id)
        .bind(&submission.exercise_id)
        .bind(submission.score)
        .bind(submission.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_completed(
        &self,
        exercise_id: &str,
    ) -> std::result::Result<Vec<SubmissionRecord>, StoreError> {
        let records = sqlx::query_as::<_, SubmissionRecord>(
            r#"
            SELECT id, student_name, student_id, exercise_id, score, completed, submit_time
            FROM student_answers
            WHERE exercise_id = $1 AND completed = TRUE
            ORDER BY submit_time DESC
            "#,
        )
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
