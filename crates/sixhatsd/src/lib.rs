//! Six Hats daemon: HTTP API, TTL sweeper and process configuration.

pub mod api;
pub mod config;
pub mod server;
pub mod sweeper;

pub use api::{build_app, ApiError, AppState};
pub use config::Cli;
pub use server::{build_state, run_server, run_server_with_listener, ServerOptions};
