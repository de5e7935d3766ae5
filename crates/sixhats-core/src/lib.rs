//! Six Hats core library.
//!
//! Runs a fixed two-phase "Six Thinking Hats" analysis over a shared
//! session: five perspective roles concurrently, then a synthesis role
//! (optionally followed by a solution role) over their outputs.
//!
//! - [`domain`]: role vocabulary, session context and error taxonomy
//! - [`roles`]: per-role prompts, extraction and the [`RoleAgent`]
//! - [`orchestrator`]: Phase 1 fan-out, Phase 2 synthesis, full cycle
//! - [`store`]: in-memory TTL session registry
//! - [`runner`]: detached background cycles with write-back

pub mod domain;
pub mod metrics;
pub mod obs;
pub mod orchestrator;
pub mod roles;
pub mod runner;
pub mod store;
pub mod telemetry;

pub use domain::{
    Confidence, HatsError, Result, RoleId, RoleResult, RoleResults, SessionContext, SessionId,
    SessionStatus,
};
pub use metrics::{Metrics, MetricsSnapshot, METRICS};
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use roles::{extract, Extraction, RoleAgent};
pub use runner::start_analysis;
pub use store::{SessionSink, SessionStore, DEFAULT_TTL_MINUTES};
pub use telemetry::init_tracing;

/// Six Hats version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
