//! The persistence collaborator for completion records.
//!
//! The gateway and the teacher dashboard talk to [`SubmissionStore`], never
//! to PostgreSQL directly. The production implementation lives in
//! [`crate::db::Database`]; [`MemoryStore`] backs the API test suite and
//! database-less runs.

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::models::{NewSubmission, SubmissionRecord};

/// Errors surfaced by a submission store. Messages reach the student
/// verbatim, so they carry the underlying cause.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Where completion records live. Implementations keep at most one record
/// per (student_id, exercise_id): storing again replaces the previous
/// record and refreshes its submit time.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Store the record, replacing any previous one for the same student
    /// and exercise. Returns the stored row with its assigned submit time.
    async fn upsert_submission(
        &self,
        submission: &NewSubmission,
    ) -> Result<SubmissionRecord, StoreError>;

    /// All completed records for an exercise, newest first.
    async fn list_completed(&self, exercise_id: &str) -> Result<Vec<SubmissionRecord>, StoreError>;
}

/// In-process store for tests and database-less runs.
///
/// Operations are counted so tests can assert that validation
/// short-circuits before the store is reached, and a failure message can
/// be armed to exercise error paths.
pub struct MemoryStore {
    rows: Mutex<Vec<SubmissionRecord>>,
    next_id: AtomicI64,
    calls: AtomicU32,
    failure: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            calls: AtomicU32::new(0),
            failure: Mutex::new(None),
        }
    }

    /// Number of store operations attempted, including failed ones.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Make every following operation fail with the given message.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().expect("store lock") = Some(message.to_string());
    }

    /// Clear an armed failure.
    pub fn recover(&self) {
        *self.failure.lock().expect("store lock") = None;
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.lock().expect("store lock").as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn upsert_submission(
        &self,
        submission: &NewSubmission,
    ) -> Result<SubmissionRecord, StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;

        let record = SubmissionRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            student_name: submission.student_name.clone(),
            student_id: submission.student_id.clone(),
            exercise_id: submission.exercise_id.clone(),
            score: submission.score,
            completed: submission.completed,
            submit_time: Utc::now(),
        };

        let mut rows = self.rows.lock().expect("store lock");
        rows.retain(|row| {
            !(row.student_id == submission.student_id && row.exercise_id == submission.exercise_id)
        });
        rows.push(record.clone());

        Ok(record)
    }

    async fn list_completed(&self, exercise_id: &str) -> Result<Vec<SubmissionRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.check_failure()?;

        let mut records: Vec<_> = self
            .rows
            .lock()
            .expect("store lock")
            .iter()
            .filter(|row| row.exercise_id == exercise_id && row.completed)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.submit_time.cmp(&a.submit_time));

        Ok(records)
    }
}
