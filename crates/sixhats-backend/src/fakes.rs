//! In-memory fakes for [`ModelBackend`] (testing only)
//!
//! - [`FakeBackend`]: canned replies and failures selected by prompt substring,
//!   recording every prompt it receives
//! - [`BarrierBackend`]: blocks every call until `n` calls are in flight, so a
//!   test only completes when the caller really runs them concurrently

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Barrier;

use crate::error::{BackendError, BackendResult};
use crate::traits::ModelBackend;

// ---------------------------------------------------------------------------
// FakeBackend
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Rule {
    needle: String,
    outcome: BackendResult<String>,
}

/// Scripted backend: the first rule whose needle occurs in the prompt decides
/// the outcome, otherwise the default reply is returned.
#[derive(Debug)]
pub struct FakeBackend {
    default_reply: String,
    rules: Vec<Rule>,
    prompts: Mutex<Vec<String>>,
}

impl FakeBackend {
    /// Answer every prompt with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        FakeBackend {
            default_reply: reply.into(),
            rules: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fail every prompt with `err`.
    pub fn failing(err: BackendError) -> Self {
        Self::replying(String::new()).with_failure_when("", err)
    }

    /// Reply with `reply` when the prompt contains `needle`.
    pub fn with_reply_when(mut self, needle: impl Into<String>, reply: impl Into<String>) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            outcome: Ok(reply.into()),
        });
        self
    }

    /// Fail with `err` when the prompt contains `needle`.
    pub fn with_failure_when(mut self, needle: impl Into<String>, err: BackendError) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            outcome: Err(err),
        });
        self
    }

    /// Every prompt received so far, in arrival order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl ModelBackend for FakeBackend {
    fn name(&self) -> String {
        "fake".to_string()
    }

    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        self.prompts.lock().push(prompt.to_string());
        // Yield so sibling calls interleave the way real network calls do.
        tokio::task::yield_now().await;

        self.rules
            .iter()
            .find(|rule| prompt.contains(&rule.needle))
            .map(|rule| rule.outcome.clone())
            .unwrap_or_else(|| Ok(self.default_reply.clone()))
    }
}

// ---------------------------------------------------------------------------
// BarrierBackend
// ---------------------------------------------------------------------------

/// Backend whose first `parties` calls each wait until all of them have
/// arrived. Calls after the first batch go through immediately.
#[derive(Debug)]
pub struct BarrierBackend {
    barrier: Barrier,
    parties: usize,
    calls: AtomicUsize,
    reply: String,
}

impl BarrierBackend {
    pub fn new(parties: usize, reply: impl Into<String>) -> Self {
        BarrierBackend {
            barrier: Barrier::new(parties),
            parties,
            calls: AtomicUsize::new(0),
            reply: reply.into(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelBackend for BarrierBackend {
    fn name(&self) -> String {
        format!("barrier:{}", self.parties)
    }

    async fn generate(&self, _prompt: &str) -> BackendResult<String> {
        let seq = self.calls.fetch_add(1, Ordering::SeqCst);
        if seq < self.parties {
            self.barrier.wait().await;
        }
        Ok(self.reply.clone())
    }
}
