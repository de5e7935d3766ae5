use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sixhats_backend::{create_backend, BackendConfig};
use sixhats_core::telemetry::{default_level, init_tracing};
use sixhatsd::{run_server, Cli, ServerOptions};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json, default_level(cli.verbose));
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let backend_config = BackendConfig::from_env().context("read backend configuration")?;
    let backend = create_backend(&backend_config)
        .with_context(|| format!("initialise {} backend", backend_config.provider))?;

    let options = ServerOptions {
        orchestrator: cli.orchestrator_config(),
        session_ttl_minutes: cli.session_ttl_minutes,
        cleanup_interval: Duration::from_secs(cli.cleanup_interval_secs.max(1)),
    };

    run_server(&cli.host, cli.port, backend, options).await
}
