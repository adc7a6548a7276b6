pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use crate::services::gateway::SubmissionGateway;
use crate::services::registry::SessionRegistry;
use crate::services::store::SubmissionStore;

/// How often abandoned sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(600);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SubmissionGateway>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Wire the application around any submission store.
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            gateway: Arc::new(SubmissionGateway::new(store)),
            sessions: Arc::new(SessionRegistry::new()),
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState::new(Arc::new(db));

    // Sweep idle sessions in the background
    let sessions = state.sessions.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            tick.tick().await;
            sessions.evict_idle();
        }
    });

    let app = router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Session routes
        .route("/api/sessions", post(routes::sessions::start))
        .route("/api/sessions/{id}", get(routes::sessions::view))
        .route("/api/sessions/{id}", delete(routes::sessions::discard))
        .route("/api/sessions/{id}/select", post(routes::sessions::select))
        .route("/api/sessions/{id}/restart", post(routes::sessions::restart))
        .route("/api/sessions/{id}/submit", post(routes::submissions::submit))
        // Teacher routes
        .route("/api/teacher/completions", get(routes::teacher::completions))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
