//! Two-phase analysis over a [`SessionContext`].
//!
//! Phase 1 fans the independent roles out concurrently against one shared
//! read-only snapshot and tolerates individual failures. Phase 2 runs the
//! synthesis role (and optionally the solution role) strictly afterwards;
//! its failure fails the cycle.
//!
//! Agents never write to the context. Every outcome is collected back on
//! the orchestrating task, which is the only writer.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use sixhats_backend::ModelBackend;
use tracing::{instrument, warn};

use crate::domain::error::{HatsError, Result};
use crate::domain::role::{RoleId, RoleResult};
use crate::domain::session::{SessionContext, SessionStatus};
use crate::metrics::METRICS;
use crate::obs;
use crate::roles::RoleAgent;
use crate::store::SessionSink;

/// Orchestrator knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Run the solution role after synthesis.
    pub include_solution: bool,
    /// Reported only; Phase 1 always launches every requested role at once.
    pub max_concurrent_agents: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            include_solution: false,
            max_concurrent_agents: 1,
        }
    }
}

/// Drives role agents through both phases.
pub struct Orchestrator {
    backend: Arc<dyn ModelBackend>,
    config: OrchestratorConfig,
    sink: Option<Arc<dyn SessionSink>>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("backend", &self.backend.name())
            .field("config", &self.config)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn ModelBackend>, config: OrchestratorConfig) -> Self {
        Self {
            backend,
            config,
            sink: None,
        }
    }

    /// Persist the context through `sink` after each phase.
    pub fn with_sink(mut self, sink: Arc<dyn SessionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn backend_name(&self) -> String {
        self.backend.name()
    }

    pub fn agent(&self, role: RoleId) -> RoleAgent {
        RoleAgent::new(role, Arc::clone(&self.backend))
    }

    fn checkpoint(&self, context: &SessionContext) {
        if let Some(sink) = &self.sink {
            sink.checkpoint(context);
        }
    }

    /// Phase 1: run `roles` (default: the five independent roles) concurrently.
    ///
    /// Waits for every invocation to settle. Successes are written into the
    /// context; failures are recorded per role and never cancel siblings.
    /// Returns the successful results only.
    #[instrument(skip_all, fields(session_id = %context.id))]
    pub async fn execute_parallel(
        &self,
        context: &mut SessionContext,
        roles: Option<&[RoleId]>,
    ) -> BTreeMap<RoleId, RoleResult> {
        let mut requested: Vec<RoleId> = Vec::new();
        for role in roles.unwrap_or(&RoleId::PARALLEL) {
            if !requested.contains(role) {
                requested.push(*role);
            }
        }
        obs::emit_cycle_started(context.id.as_str(), &requested);

        let agents: Vec<RoleAgent> = requested.iter().map(|r| self.agent(*r)).collect();
        let outcomes = {
            let snapshot: &SessionContext = context;
            join_all(
                agents
                    .iter()
                    .map(|agent| async move { (agent.role(), agent.execute(snapshot).await) }),
            )
            .await
        };

        let mut succeeded = BTreeMap::new();
        for (role, outcome) in outcomes {
            match outcome {
                Ok(result) => {
                    METRICS.inc_roles_succeeded();
                    obs::emit_role_completed(context.id.as_str(), role, result.duration_ms);
                    context.record_result(result.clone());
                    succeeded.insert(role, result);
                }
                Err(e) => {
                    let message = format!("{} failed: {}: {}", role.display_name(), e.kind(), e);
                    METRICS.inc_roles_failed();
                    obs::emit_role_failed(context.id.as_str(), role, &message);
                    context.record_failure(role, message);
                }
            }
        }

        self.checkpoint(context);
        succeeded
    }

    /// Phase 2: run the synthesis role over whatever Phase 1 produced.
    ///
    /// A failure is recorded for the role and returned to the caller.
    #[instrument(skip_all, fields(session_id = %context.id))]
    pub async fn execute_synthesis(&self, context: &mut SessionContext) -> Result<RoleResult> {
        let result = self.execute_single(context, RoleId::Blue).await?;
        self.checkpoint(context);
        Ok(result)
    }

    /// Run the solution role over every result present, synthesis included.
    #[instrument(skip_all, fields(session_id = %context.id))]
    pub async fn execute_solution(&self, context: &mut SessionContext) -> Result<RoleResult> {
        let result = self.execute_single(context, RoleId::Solution).await?;
        self.checkpoint(context);
        Ok(result)
    }

    async fn execute_single(&self, context: &mut SessionContext, role: RoleId) -> Result<RoleResult> {
        let outcome = self.agent(role).execute(context).await;
        match outcome {
            Ok(result) => {
                METRICS.inc_roles_succeeded();
                obs::emit_role_completed(context.id.as_str(), role, result.duration_ms);
                context.record_result(result.clone());
                Ok(result)
            }
            Err(e) => {
                METRICS.inc_roles_failed();
                obs::emit_role_failed(context.id.as_str(), role, &e);
                context.record_failure(
                    role,
                    format!("{} failed: {}: {}", role.display_name(), e.kind(), e),
                );
                Err(HatsError::Backend(e))
            }
        }
    }

    /// Full cycle: `processing`, Phase 1, Phase 2, then `completed`.
    ///
    /// Any error from setup or Phase 2 leaves the context `failed` with the
    /// error's message and is returned. Persisting that terminal state is the
    /// caller's job.
    #[instrument(skip_all, fields(session_id = %context.id))]
    pub async fn execute_full_cycle(&self, context: &mut SessionContext) -> Result<()> {
        let started = Instant::now();
        let outcome = self.run_phases(context).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => {
                context.transition(SessionStatus::Completed)?;
                METRICS.inc_cycles_completed();
                obs::emit_cycle_finished(context.id.as_str(), context.status(), duration_ms);
                METRICS.flush();
                Ok(())
            }
            Err(e) => {
                if !context.status().is_terminal() {
                    if let Err(transition) = context.mark_failed(e.to_string()) {
                        warn!(error = %transition, "could not mark session failed");
                    }
                }
                METRICS.inc_cycles_failed();
                obs::emit_cycle_finished(context.id.as_str(), context.status(), duration_ms);
                METRICS.flush();
                Err(e)
            }
        }
    }

    async fn run_phases(&self, context: &mut SessionContext) -> Result<()> {
        context.begin_processing()?;
        self.checkpoint(context);

        self.execute_parallel(context, None).await;
        self.execute_synthesis(context).await?;
        if self.config.include_solution {
            self.execute_solution(context).await?;
        }
        Ok(())
    }
}
