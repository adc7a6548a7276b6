//! Submission endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::SubmitResponse;
use crate::AppState;

/// POST /api/sessions/{id}/submit
/// Records the completion once the game is finished. The session stays
/// untouched if the store rejects the record, so the student can retry.
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>> {
    let student = state.sessions.begin_submit(id)?;

    let submission = state
        .gateway
        .submit(&student.name, &student.student_id)
        .await?;

    let session = state.sessions.mark_submitted(id)?;

    Ok(Json(SubmitResponse {
        submission,
        session,
    }))
}
