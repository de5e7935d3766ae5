//! In-memory session registry with TTL eviction.
//!
//! Sessions live for the lifetime of the process only. Reads hand out
//! clones, so a caller never holds the registry lock across an await.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use crate::domain::error::{HatsError, Result};
use crate::domain::session::{SessionContext, SessionId, SessionStatus};
use crate::metrics::METRICS;
use crate::obs;

/// Default session lifetime after the last accepted mutation.
pub const DEFAULT_TTL_MINUTES: i64 = 60;

/// Receives the context after each orchestration phase.
pub trait SessionSink: Send + Sync {
    fn checkpoint(&self, context: &SessionContext);
}

/// Concurrent id → context map.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionContext>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl_minutes(DEFAULT_TTL_MINUTES)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn with_ttl_minutes(minutes: i64) -> Self {
        Self::new(Duration::minutes(minutes))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Register a new `initialized` session under a fresh id.
    pub fn create(
        &self,
        problem_statement: impl Into<String>,
        background: Option<String>,
    ) -> Result<SessionId> {
        let problem_statement = problem_statement.into();
        if problem_statement.trim().is_empty() {
            return Err(HatsError::Validation(
                "problem statement must not be empty".to_string(),
            ));
        }

        let id = SessionId::new();
        let context = SessionContext::new(id.clone(), problem_statement, background);
        self.sessions.write().insert(id.clone(), context);

        METRICS.inc_sessions_created();
        obs::emit_session_created(id.as_str());
        Ok(id)
    }

    /// Clone of the stored context, or `None` if unknown or evicted.
    pub fn get(&self, id: &SessionId) -> Option<SessionContext> {
        self.sessions.read().get(id).cloned()
    }

    /// Store `context` under `id`, refreshing its last-updated timestamp.
    /// Last write wins; an evicted id is re-inserted.
    pub fn update(&self, id: &SessionId, mut context: SessionContext) {
        context.touch(Utc::now());
        self.sessions.write().insert(id.clone(), context);
    }

    /// Apply `f` to the stored context under the write lock.
    ///
    /// The timestamp is refreshed only when `f` succeeds.
    pub fn modify<T>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut SessionContext) -> Result<T>,
    ) -> Result<T> {
        let mut sessions = self.sessions.write();
        let context = sessions
            .get_mut(id)
            .ok_or_else(|| HatsError::SessionNotFound(id.to_string()))?;
        let out = f(context)?;
        context.touch(Utc::now());
        Ok(out)
    }

    /// Atomically move an `initialized` session to `processing`.
    ///
    /// Returns the claimed context. Any other status is a conflict, so a
    /// session can be analysed at most once.
    pub fn claim_for_analysis(&self, id: &SessionId) -> Result<SessionContext> {
        self.modify(id, |context| {
            if context.status() != SessionStatus::Initialized {
                return Err(HatsError::AnalysisConflict {
                    session_id: id.to_string(),
                    status: context.status(),
                });
            }
            context.begin_processing()?;
            Ok(context.clone())
        })
    }

    pub fn delete(&self, id: &SessionId) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    /// Evict every session whose last update is at least one TTL old.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Utc::now())
    }

    /// [`cleanup_expired`](Self::cleanup_expired) against an explicit clock.
    pub fn cleanup_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, context| now - context.updated_at() < self.ttl);
        let evicted = before - sessions.len();
        let remaining = sessions.len();
        drop(sessions);

        if evicted > 0 {
            METRICS.add_sessions_evicted(evicted as u64);
            obs::emit_sessions_evicted(evicted, remaining);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Ids of every live session, unordered.
    pub fn ids(&self) -> Vec<SessionId> {
        self.sessions.read().keys().cloned().collect()
    }
}

impl SessionSink for SessionStore {
    fn checkpoint(&self, context: &SessionContext) {
        self.update(&context.id, context.clone());
    }
}
