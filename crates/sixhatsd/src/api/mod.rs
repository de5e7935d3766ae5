//! HTTP API under `/api`.

mod error;
mod handlers;
pub mod schema;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use sixhats_core::{Orchestrator, SessionContext, SessionId, SessionStore};
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SessionStore>,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(store: Arc<SessionStore>, orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            store,
            orchestrator,
        }
    }

    fn lookup(&self, session_id: String) -> Result<SessionContext, ApiError> {
        self.store
            .get(&SessionId(session_id))
            .ok_or_else(ApiError::session_not_found)
    }
}

pub fn build_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/sessions", post(handlers::create_session))
        .route("/sessions/{id}/analyze", post(handlers::analyze))
        .route("/sessions/{id}/progress", get(handlers::progress))
        .route("/sessions/{id}/results", get(handlers::results))
        .route("/sessions/{id}/debug", get(handlers::debug_session))
        .route(
            "/sessions/{id}",
            axum::routing::delete(handlers::delete_session),
        )
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(CorsLayer::permissive())
}
