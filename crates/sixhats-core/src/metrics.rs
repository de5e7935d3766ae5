//! Global atomic counters for Six Hats observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event, or [`Metrics::snapshot`] to serve them.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters, no allocations, no locking.
pub struct Metrics {
    sessions_created: AtomicU64,
    sessions_evicted: AtomicU64,
    roles_succeeded: AtomicU64,
    roles_failed: AtomicU64,
    cycles_completed: AtomicU64,
    cycles_failed: AtomicU64,
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub sessions_created: u64,
    pub sessions_evicted: u64,
    pub roles_succeeded: u64,
    pub roles_failed: u64,
    pub cycles_completed: u64,
    pub cycles_failed: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            sessions_created: AtomicU64::new(0),
            sessions_evicted: AtomicU64::new(0),
            roles_succeeded: AtomicU64::new(0),
            roles_failed: AtomicU64::new(0),
            cycles_completed: AtomicU64::new(0),
            cycles_failed: AtomicU64::new(0),
        }
    }

    pub fn inc_sessions_created(&self) {
        self.sessions_created.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "sessions_created", "counter incremented");
    }

    /// Add `n` evictions from one sweep.
    pub fn add_sessions_evicted(&self, n: u64) {
        self.sessions_evicted.fetch_add(n, Ordering::Relaxed);
        tracing::trace!(metric = "sessions_evicted", n, "counter incremented");
    }

    pub fn inc_roles_succeeded(&self) {
        self.roles_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "roles_succeeded", "counter incremented");
    }

    pub fn inc_roles_failed(&self) {
        self.roles_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "roles_failed", "counter incremented");
    }

    pub fn inc_cycles_completed(&self) {
        self.cycles_completed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "cycles_completed", "counter incremented");
    }

    pub fn inc_cycles_failed(&self) {
        self.cycles_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "cycles_failed", "counter incremented");
    }

    /// Read every counter at once.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sessions_created: self.sessions_created.load(Ordering::Relaxed),
            sessions_evicted: self.sessions_evicted.load(Ordering::Relaxed),
            roles_succeeded: self.roles_succeeded.load(Ordering::Relaxed),
            roles_failed: self.roles_failed.load(Ordering::Relaxed),
            cycles_completed: self.cycles_completed.load(Ordering::Relaxed),
            cycles_failed: self.cycles_failed.load(Ordering::Relaxed),
        }
    }

    /// Emit all current counter values as a single `info!` event.
    ///
    /// Call this at natural boundaries (end of a cycle, sweeper tick)
    /// rather than on every increment.
    pub fn flush(&self) {
        let s = self.snapshot();
        tracing::info!(
            metric = "flush",
            sessions_created = s.sessions_created,
            sessions_evicted = s.sessions_evicted,
            roles_succeeded = s.roles_succeeded,
            roles_failed = s.roles_failed,
            cycles_completed = s.cycles_completed,
            cycles_failed = s.cycles_failed,
        );
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.sessions_created.store(0, Ordering::Relaxed);
        self.sessions_evicted.store(0, Ordering::Relaxed);
        self.roles_succeeded.store(0, Ordering::Relaxed);
        self.roles_failed.store(0, Ordering::Relaxed);
        self.cycles_completed.store(0, Ordering::Relaxed);
        self.cycles_failed.store(0, Ordering::Relaxed);
    }
}
