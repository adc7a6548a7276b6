//! Teacher dashboard endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use vocabmatch_core::vocab::EXERCISE_ID;

use crate::error::Result;
use crate::models::{CompletionListQuery, CompletionListResponse};
use crate::AppState;

/// GET /api/teacher/completions?exercise_id=...
/// Completed submissions for an exercise, newest first. An empty class is
/// an empty list, not an error.
pub async fn completions(
    State(state): State<AppState>,
    Query(query): Query<CompletionListQuery>,
) -> Result<Json<CompletionListResponse>> {
    let exercise_id = query.exercise_id.as_deref().unwrap_or(EXERCISE_ID);
    let submissions = state.gateway.list_completed(exercise_id).await?;
    Ok(Json(CompletionListResponse { submissions }))
}
