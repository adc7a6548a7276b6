//! Common test utilities and fixtures for integration tests.
//!
//! The API tests run against the in-memory submission store, so they need
//! no external services. Only the PostgreSQL store suite
//! (`store_postgres.rs`) talks to a real database.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use axum_test::TestServer;

use vocab_match_backend::services::store::MemoryStore;
use vocab_match_backend::{router, AppState};

/// Test context wired to an in-memory submission store.
///
/// The store handle is kept so tests can arm failures and count calls.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone());
        let app = router(state);
        Self { store, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }
}

/// Start a session and return its view.
pub async fn start_session(server: &TestServer, name: &str, student_id: &str) -> serde_json::Value {
    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_session_request(name, student_id))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

/// Play every pair of the session's deck to completion.
pub async fn play_to_completion(server: &TestServer, view: &serde_json::Value) {
    let session_id = view["session_id"].as_str().expect("session_id");
    for (lexeme_id, translation_id) in fixtures::pairs_from_deck(view) {
        for card_id in [lexeme_id, translation_id] {
            let response = server
                .post(&format!("/api/sessions/{session_id}/select"))
                .json(&fixtures::select_card_request(card_id))
                .await;
            response.assert_status_ok();
        }
    }
}
