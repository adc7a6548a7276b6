//! Game session endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use vocabmatch_core::types::Student;

use crate::error::Result;
use crate::models::*;
use crate::AppState;

/// POST /api/sessions
/// Validates the student identity and deals a fresh shuffled deck
pub async fn start(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionView>)> {
    let student = Student::new(&payload.student_name, &payload.student_id)?;
    let view = state.sessions.start(student)?;

    tracing::info!("Started game session: {}", view.session_id);

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/sessions/{id}
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let view = state.sessions.view(id)?;
    Ok(Json(view))
}

/// POST /api/sessions/{id}/select
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectCardRequest>,
) -> Result<Json<SelectCardResponse>> {
    let (outcome, session) = state.sessions.select(id, payload.card_id)?;
    Ok(Json(SelectCardResponse { outcome, session }))
}

/// POST /api/sessions/{id}/restart
pub async fn restart(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>> {
    let view = state.sessions.restart(id)?;
    Ok(Json(view))
}

/// DELETE /api/sessions/{id}
pub async fn discard(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    state.sessions.discard(id);
    StatusCode::NO_CONTENT
}
