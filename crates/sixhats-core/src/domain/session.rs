//! Session context: the shared record a full analysis cycle works on.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::{HatsError, Result};
use crate::domain::role::{RoleId, RoleResult};

/// Opaque session identifier (random UUID v4, 128 bits).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        SessionId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

/// Lifecycle of a session: initialized → processing → completed | failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Initialized,
    Processing,
    Completed,
    Failed,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Failed)
    }

    /// Transitions only move forward; terminal states accept nothing.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Initialized, Processing)
                | (Initialized, Failed)
                | (Processing, Completed)
                | (Processing, Failed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Initialized => "initialized",
            SessionStatus::Processing => "processing",
            SessionStatus::Completed => "completed",
            SessionStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-role result slots. Always holds exactly one entry per [`RoleId`];
/// entries start absent and are only ever filled, never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<RoleId, Option<RoleResult>>")]
#[serde(into = "BTreeMap<RoleId, Option<RoleResult>>")]
pub struct RoleResults {
    slots: BTreeMap<RoleId, Option<RoleResult>>,
}

impl RoleResults {
    /// All seven slots, all absent.
    pub fn new() -> Self {
        RoleResults {
            slots: RoleId::ALL.into_iter().map(|r| (r, None)).collect(),
        }
    }

    pub fn get(&self, role: RoleId) -> Option<&RoleResult> {
        self.slots.get(&role).and_then(Option::as_ref)
    }

    pub fn is_present(&self, role: RoleId) -> bool {
        self.get(role).is_some()
    }

    /// Fill the slot named by `result.role`.
    pub(crate) fn insert(&mut self, result: RoleResult) {
        self.slots.insert(result.role, Some(result));
    }

    /// Every slot in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (RoleId, Option<&RoleResult>)> {
        self.slots.iter().map(|(role, slot)| (*role, slot.as_ref()))
    }

    /// Present results in canonical order.
    pub fn present(&self) -> impl Iterator<Item = &RoleResult> {
        self.slots.values().filter_map(Option::as_ref)
    }

    pub fn completed(&self) -> Vec<RoleId> {
        self.iter()
            .filter(|(_, r)| r.is_some())
            .map(|(role, _)| role)
            .collect()
    }

    pub fn pending(&self) -> Vec<RoleId> {
        self.iter()
            .filter(|(_, r)| r.is_none())
            .map(|(role, _)| role)
            .collect()
    }

    /// Number of slots; always seven.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for RoleResults {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<RoleId, Option<RoleResult>>> for RoleResults {
    fn from(map: BTreeMap<RoleId, Option<RoleResult>>) -> Self {
        let mut results = RoleResults::new();
        for result in map.into_values().flatten() {
            results.insert(result);
        }
        results
    }
}

impl From<RoleResults> for BTreeMap<RoleId, Option<RoleResult>> {
    fn from(results: RoleResults) -> Self {
        results.slots
    }
}

/// Unit of work and shared state across both execution phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub id: SessionId,
    pub problem_statement: String,
    pub background: Option<String>,
    results: RoleResults,
    status: SessionStatus,
    error_message: Option<String>,
    role_errors: BTreeMap<RoleId, String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionContext {
    /// Fresh `initialized` context; blank background is stored as `None`.
    pub fn new(id: SessionId, problem_statement: String, background: Option<String>) -> Self {
        let now = Utc::now();
        SessionContext {
            id,
            problem_statement,
            background: background.filter(|b| !b.trim().is_empty()),
            results: RoleResults::new(),
            status: SessionStatus::Initialized,
            error_message: None,
            role_errors: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn results(&self) -> &RoleResults {
        &self.results
    }

    pub fn result(&self, role: RoleId) -> Option<&RoleResult> {
        self.results.get(role)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Per-role failure messages recorded by the orchestrator.
    pub fn role_errors(&self) -> &BTreeMap<RoleId, String> {
        &self.role_errors
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Move to `next`, rejecting any backward or post-terminal transition.
    pub fn transition(&mut self, next: SessionStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(HatsError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Enter `processing`. A session already claimed as processing is left as is.
    pub fn begin_processing(&mut self) -> Result<()> {
        if self.status == SessionStatus::Processing {
            return Ok(());
        }
        self.transition(SessionStatus::Processing)
    }

    /// Enter `failed` and record `message` as the session error.
    pub fn mark_failed(&mut self, message: impl Into<String>) -> Result<()> {
        self.transition(SessionStatus::Failed)?;
        self.error_message = Some(message.into());
        Ok(())
    }

    /// Store a role's result, clearing any earlier failure for that role.
    pub fn record_result(&mut self, result: RoleResult) {
        self.role_errors.remove(&result.role);
        self.results.insert(result);
    }

    /// Record a role failure; the result slot stays as it was.
    pub fn record_failure(&mut self, role: RoleId, message: impl Into<String>) {
        self.role_errors.insert(role, message.into());
    }

    /// Refresh the last-updated timestamp, never earlier than creation.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}
