//! Request and response bodies.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sixhats_core::{
    Confidence, MetricsSnapshot, RoleId, RoleResult, SessionContext, SessionStatus,
};

/// Minimum trimmed length of a problem statement.
pub const MIN_PROBLEM_CHARS: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub problem_statement: String,
    #[serde(default)]
    pub background_context: Option<String>,
}

impl CreateSessionRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.problem_statement.trim().chars().count() < MIN_PROBLEM_CHARS {
            return Err(format!(
                "problem_statement must be at least {MIN_PROBLEM_CHARS} characters"
            ));
        }
        Ok(())
    }
}

fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub problem_statement: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&SessionContext> for SessionStatusResponse {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            session_id: ctx.id.to_string(),
            status: ctx.status(),
            problem_statement: ctx.problem_statement.clone(),
            created_at: timestamp(ctx.created_at()),
            updated_at: timestamp(ctx.updated_at()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub session_id: String,
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub agents_completed: Vec<RoleId>,
    /// Always empty: progress is only known per settled role.
    pub agents_processing: Vec<RoleId>,
    pub agents_pending: Vec<RoleId>,
    pub error_message: Option<String>,
    pub timestamp: String,
}

impl From<&SessionContext> for ProgressResponse {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            session_id: ctx.id.to_string(),
            status: ctx.status(),
            agents_completed: ctx.results().completed(),
            agents_processing: Vec::new(),
            agents_pending: ctx.results().pending(),
            error_message: ctx.error_message().map(str::to_string),
            timestamp: timestamp(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub hat_color: RoleId,
    pub agent_name: String,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence_level: Confidence,
    pub execution_time_ms: u64,
}

impl From<&RoleResult> for RoleSummary {
    fn from(r: &RoleResult) -> Self {
        Self {
            hat_color: r.role,
            agent_name: r.display_name.clone(),
            key_insights: r.insights.clone(),
            recommendations: r.recommendations.clone(),
            confidence_level: r.confidence,
            execution_time_ms: r.duration_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsResponse {
    pub session_id: String,
    pub problem_statement: String,
    pub background_context: Option<String>,
    pub status: SessionStatus,
    pub results: BTreeMap<RoleId, RoleSummary>,
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&SessionContext> for ResultsResponse {
    fn from(ctx: &SessionContext) -> Self {
        Self {
            session_id: ctx.id.to_string(),
            problem_statement: ctx.problem_statement.clone(),
            background_context: ctx.background.clone(),
            status: ctx.status(),
            results: ctx
                .results()
                .present()
                .map(|r| (r.role, RoleSummary::from(r)))
                .collect(),
            error_message: ctx.error_message().map(str::to_string),
            created_at: timestamp(ctx.created_at()),
            updated_at: timestamp(ctx.updated_at()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    Completed,
    Failed,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentDebug {
    pub status: AgentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DebugResponse {
    pub session_id: String,
    pub overall_status: SessionStatus,
    pub agent_status: BTreeMap<RoleId, AgentDebug>,
    pub error_message: Option<String>,
}

impl From<&SessionContext> for DebugResponse {
    fn from(ctx: &SessionContext) -> Self {
        let agent_status = ctx
            .results()
            .iter()
            .map(|(role, slot)| {
                let entry = match (slot, ctx.role_errors().get(&role)) {
                    (Some(result), _) => AgentDebug {
                        status: AgentState::Completed,
                        agent_name: Some(result.display_name.clone()),
                        execution_time_ms: Some(result.duration_ms),
                        error: None,
                    },
                    (None, Some(error)) => AgentDebug {
                        status: AgentState::Failed,
                        agent_name: Some(role.display_name().to_string()),
                        execution_time_ms: None,
                        error: Some(error.clone()),
                    },
                    (None, None) => AgentDebug {
                        status: AgentState::Pending,
                        agent_name: None,
                        execution_time_ms: None,
                        error: None,
                    },
                };
                (role, entry)
            })
            .collect();

        Self {
            session_id: ctx.id.to_string(),
            overall_status: ctx.status(),
            agent_status,
            error_message: ctx.error_message().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
    pub backend: String,
    pub include_solution: bool,
    pub max_concurrent_agents: usize,
    pub metrics: MetricsSnapshot,
}
