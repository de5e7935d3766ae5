//! The model backend contract consumed by role agents.

use async_trait::async_trait;

use crate::error::BackendResult;

/// A language model that turns a text prompt into a text completion.
///
/// Implementations enforce their own request timeout and classify failures
/// into [`BackendError`](crate::BackendError) variants. Callers never retry.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Short provider/model label, e.g. `lmstudio:ibm/granite-4-h-tiny`.
    fn name(&self) -> String;

    /// Send `prompt` and return the generated text.
    async fn generate(&self, prompt: &str) -> BackendResult<String>;
}
