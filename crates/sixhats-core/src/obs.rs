//! Structured observability hooks for the analysis lifecycle.
//!
//! - Session-scoped tracing spans via the `SessionSpan` RAII guard
//! - Emission functions for cycle start/finish, per-role outcomes and eviction
//!
//! Events are emitted at `info!` level (failures at `warn!`). Set `RUST_LOG`
//! to filter, and pass `--json` to the daemon for JSON lines.

use tracing::{info, warn};

use crate::domain::role::RoleId;
use crate::domain::session::SessionStatus;

/// RAII guard that enters a session-scoped tracing span.
///
/// Only hold it in synchronous code; async work should use
/// [`session_span`] with `Instrument` instead.
pub struct SessionSpan {
    _span: tracing::span::EnteredSpan,
}

impl SessionSpan {
    pub fn enter(session_id: &str) -> Self {
        Self {
            _span: session_span(session_id).entered(),
        }
    }
}

/// Span tagged with the session id.
pub fn session_span(session_id: &str) -> tracing::Span {
    tracing::info_span!("sixhats.session", session_id = %session_id)
}

pub fn emit_session_created(session_id: &str) {
    info!(event = "session.created", session_id = %session_id);
}

/// Emit event: a phase is about to fan out over `roles`.
pub fn emit_cycle_started(session_id: &str, roles: &[RoleId]) {
    let roles = roles
        .iter()
        .map(RoleId::as_str)
        .collect::<Vec<_>>()
        .join(",");
    info!(event = "cycle.started", session_id = %session_id, roles = %roles);
}

pub fn emit_role_completed(session_id: &str, role: RoleId, duration_ms: u64) {
    info!(
        event = "role.completed",
        session_id = %session_id,
        role = %role,
        duration_ms = duration_ms,
    );
}

/// Emit event: a role failed (warning level).
pub fn emit_role_failed(session_id: &str, role: RoleId, error: &dyn std::fmt::Display) {
    warn!(event = "role.failed", session_id = %session_id, role = %role, error = %error);
}

/// Emit event: the full cycle reached a terminal status.
pub fn emit_cycle_finished(session_id: &str, status: SessionStatus, duration_ms: u64) {
    info!(
        event = "cycle.finished",
        session_id = %session_id,
        status = %status,
        duration_ms = duration_ms,
    );
}

pub fn emit_sessions_evicted(count: usize, remaining: usize) {
    info!(event = "sessions.evicted", count = count, remaining = remaining);
}
