//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from vocabmatch-core
pub use vocabmatch_core::types::{Card, CardKind, Student, VocabPair};

use vocabmatch_core::engine::Selection;
use vocabmatch_core::vocab::{COMPLETION_SCORE, EXERCISE_ID};

// === Database Entity Types ===

/// Completion record stored in PostgreSQL (`student_answers`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SubmissionRecord {
    pub id: i64,
    pub student_name: String,
    pub student_id: String,
    pub exercise_id: String,
    pub score: i32,
    pub completed: bool,
    pub submit_time: DateTime<Utc>,
}

/// Fields the application controls when storing a submission; the row ID
/// and `submit_time` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub student_name: String,
    pub student_id: String,
    pub exercise_id: String,
    pub score: i32,
    pub completed: bool,
}

impl NewSubmission {
    /// The record for a finished game: fixed exercise ID, full marks.
    pub fn completed_game(student: &Student) -> Self {
        Self {
            student_name: student.name.clone(),
            student_id: student.student_id.clone(),
            exercise_id: EXERCISE_ID.to_string(),
            score: COMPLETION_SCORE,
            completed: true,
        }
    }
}

// === API Request/Response Types ===

// Session types
#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub student_name: String,
    pub student_id: String,
}

/// Everything a client needs to render one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub deck: Vec<Card>,
    pub matched: Vec<i64>,
    pub first_selected: Option<i64>,
    pub input_locked: bool,
    pub complete: bool,
    pub submitted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectCardRequest {
    pub card_id: i64,
}

/// How one selection changed the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOutcome {
    Ignored,
    First,
    Matched,
    Mismatched,
}

impl From<&Selection> for SelectionOutcome {
    fn from(selection: &Selection) -> Self {
        match selection {
            Selection::Ignored => Self::Ignored,
            Selection::First { .. } => Self::First,
            Selection::Matched { .. } => Self::Matched,
            Selection::Mismatched { .. } => Self::Mismatched,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectCardResponse {
    pub outcome: SelectionOutcome,
    pub session: SessionView,
}

// Submission types
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub submission: SubmissionRecord,
    pub session: SessionView,
}

// Teacher dashboard types
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionListQuery {
    pub exercise_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionListResponse {
    pub submissions: Vec<SubmissionRecord>,
}
