use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sixhats_backend::ModelBackend;
use sixhats_core::{Orchestrator, OrchestratorConfig, SessionStore};

use crate::api::{build_app, AppState};
use crate::sweeper::spawn_sweeper;

/// Everything the server needs besides a listener.
pub struct ServerOptions {
    pub orchestrator: OrchestratorConfig,
    pub session_ttl_minutes: i64,
    pub cleanup_interval: Duration,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            orchestrator: OrchestratorConfig::default(),
            session_ttl_minutes: sixhats_core::DEFAULT_TTL_MINUTES,
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

/// Wire store, orchestrator and backend together. The orchestrator
/// checkpoints into the same store the handlers read.
pub fn build_state(backend: Arc<dyn ModelBackend>, options: &ServerOptions) -> AppState {
    let store = Arc::new(SessionStore::with_ttl_minutes(options.session_ttl_minutes));
    let orchestrator = Arc::new(
        Orchestrator::new(backend, options.orchestrator.clone()).with_sink(store.clone()),
    );
    AppState::new(store, orchestrator)
}

/// Bind `host:port` and serve until the process exits.
pub async fn run_server(
    host: &str,
    port: u16,
    backend: Arc<dyn ModelBackend>,
    options: ServerOptions,
) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    run_server_with_listener(listener, backend, options).await
}

/// Serve from a pre-bound listener.
pub async fn run_server_with_listener(
    listener: tokio::net::TcpListener,
    backend: Arc<dyn ModelBackend>,
    options: ServerOptions,
) -> Result<()> {
    let local = listener
        .local_addr()
        .context("get listener local address")?;

    let state = build_state(backend, &options);
    let sweeper = spawn_sweeper(state.store.clone(), options.cleanup_interval);

    tracing::info!(
        addr = %local,
        backend = %state.orchestrator.backend_name(),
        ttl_minutes = options.session_ttl_minutes,
        include_solution = options.orchestrator.include_solution,
        "sixhatsd listening"
    );

    let app = build_app(state);
    let served = axum::serve(listener, app).await.context("serve HTTP API");
    sweeper.abort();
    served
}
