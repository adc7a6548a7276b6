//! Submission workflow over the record store.

use std::sync::Arc;

use thiserror::Error;

use vocabmatch_core::error::IdentityError;
use vocabmatch_core::types::Student;

use crate::models::{NewSubmission, SubmissionRecord};
use crate::services::store::{StoreError, SubmissionStore};

/// Errors from the submission workflow.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Records game completions, one live record per student and exercise.
pub struct SubmissionGateway {
    store: Arc<dyn SubmissionStore>,
}

impl SubmissionGateway {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    /// Store the completion record for a finished game. Identity is
    /// validated before the store is touched; whether the game is actually
    /// complete is the caller's gate.
    pub async fn submit(
        &self,
        student_name: &str,
        student_id: &str,
    ) -> Result<SubmissionRecord, SubmissionError> {
        let student = Student::new(student_name, student_id)?;
        let record = self
            .store
            .upsert_submission(&NewSubmission::completed_game(&student))
            .await?;

        tracing::info!("Stored completion record for student: {}", record.student_id);
        Ok(record)
    }

    /// Completed submissions for an exercise, newest first.
    pub async fn list_completed(
        &self,
        exercise_id: &str,
    ) -> Result<Vec<SubmissionRecord>, SubmissionError> {
        Ok(self.store.list_completed(exercise_id).await?)
    }
}
