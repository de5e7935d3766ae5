//! Daemon settings: command-line flags with environment fallbacks.

use clap::Parser;
use sixhats_core::OrchestratorConfig;

#[derive(Debug, Clone, Parser)]
#[command(name = "sixhatsd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Six Thinking Hats analysis service", long_about = None)]
pub struct Cli {
    /// Address to bind
    #[arg(long, env = "SIXHATS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind (0 picks a free port)
    #[arg(long, env = "SIXHATS_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Minutes after the last update before a session is evicted
    #[arg(long, env = "SESSION_TTL_MINUTES", default_value_t = 60)]
    pub session_ttl_minutes: i64,

    /// Reported on /api/health; Phase 1 does not enforce it yet
    #[arg(long, env = "MAX_CONCURRENT_AGENTS", default_value_t = 1)]
    pub max_concurrent_agents: usize,

    /// Seconds between TTL sweeps
    #[arg(long, env = "SIXHATS_CLEANUP_INTERVAL_SECS", default_value_t = 60)]
    pub cleanup_interval_secs: u64,

    /// Run the solution role after synthesis
    #[arg(long, env = "SIXHATS_WITH_SOLUTION")]
    pub with_solution: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            include_solution: self.with_solution,
            max_concurrent_agents: self.max_concurrent_agents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["sixhatsd"]).unwrap();
        assert_eq!(cli.host, "127.0.0.1");
        assert_eq!(cli.port, 8000);
        assert_eq!(cli.session_ttl_minutes, 60);
        assert_eq!(cli.cleanup_interval_secs, 60);
        assert_eq!(cli.orchestrator_config(), OrchestratorConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "sixhatsd",
            "--port",
            "9100",
            "--session-ttl-minutes",
            "5",
            "--with-solution",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.port, 9100);
        assert_eq!(cli.session_ttl_minutes, 5);
        assert!(cli.json);
        assert!(cli.orchestrator_config().include_solution);
    }
}
