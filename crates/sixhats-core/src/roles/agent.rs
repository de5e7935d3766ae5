//! Role agent: prompt, backend call, timing and extraction for one role.

use std::sync::Arc;
use std::time::Instant;

use sixhats_backend::{BackendResult, ModelBackend};
use tracing::{error, info, instrument};

use crate::domain::role::{RoleId, RoleResult};
use crate::domain::session::SessionContext;
use crate::roles::extract::extract;
use crate::roles::prompts::build_prompt;

/// Executes a single role against a model backend.
///
/// Agents never write to the session; they read a snapshot and return a
/// [`RoleResult`] for the orchestrator to record.
#[derive(Clone)]
pub struct RoleAgent {
    role: RoleId,
    backend: Arc<dyn ModelBackend>,
}

impl std::fmt::Debug for RoleAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAgent")
            .field("role", &self.role)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl RoleAgent {
    pub fn new(role: RoleId, backend: Arc<dyn ModelBackend>) -> Self {
        Self { role, backend }
    }

    pub fn role(&self) -> RoleId {
        self.role
    }

    pub fn display_name(&self) -> &'static str {
        self.role.display_name()
    }

    /// The prompt this agent would send for `context`.
    pub fn prompt_for(&self, context: &SessionContext) -> String {
        build_prompt(self.role, context)
    }

    /// Run the role once. Backend errors are logged and returned unchanged.
    #[instrument(skip_all, fields(role = %self.role, session_id = %context.id))]
    pub async fn execute(&self, context: &SessionContext) -> BackendResult<RoleResult> {
        let started = Instant::now();
        let prompt = self.prompt_for(context);
        info!("Executing {} agent", self.display_name());

        let raw_output = match self.backend.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!(kind = e.kind(), error = %e, "{} failed", self.display_name());
                return Err(e);
            }
        };

        let extraction = extract(self.role, &raw_output);
        let duration_ms = started.elapsed().as_millis() as u64;
        info!(duration_ms, "{} completed", self.display_name());

        Ok(RoleResult {
            role: self.role,
            display_name: self.display_name().to_string(),
            raw_output,
            insights: extraction.insights,
            recommendations: extraction.recommendations,
            confidence: extraction.confidence,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::role::Confidence;
    use crate::domain::session::SessionId;
    use sixhats_backend::fakes::FakeBackend;
    use sixhats_backend::BackendError;

    fn context() -> SessionContext {
        SessionContext::new(
            SessionId::from("agent-test"),
            "Should we rewrite the billing system?".to_string(),
            Some("Legacy code, 3 engineers".to_string()),
        )
    }

    #[tokio::test]
    async fn test_execute_builds_result_from_backend_text() {
        let backend = Arc::new(FakeBackend::replying("a\nb\nc\nd\ne\nf\ng"));
        let agent = RoleAgent::new(RoleId::Green, backend.clone());

        let result = agent.execute(&context()).await.unwrap();
        assert_eq!(result.role, RoleId::Green);
        assert_eq!(result.display_name, "Green Hat (Creativity & Innovation)");
        assert_eq!(result.raw_output, "a\nb\nc\nd\ne\nf\ng");
        assert_eq!(result.insights, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(result.recommendations, vec!["f", "g"]);
        assert_eq!(result.confidence, Confidence::Medium);

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Green Hat"));
        assert!(prompts[0].contains("Legacy code, 3 engineers"));
    }

    #[tokio::test]
    async fn test_execute_propagates_backend_error_unchanged() {
        let err = BackendError::timeout("request timed out after 300s");
        let agent = RoleAgent::new(RoleId::White, Arc::new(FakeBackend::failing(err.clone())));

        let got = agent.execute(&context()).await.unwrap_err();
        assert_eq!(got, err);
    }

    #[tokio::test]
    async fn test_duration_covers_the_backend_call() {
        use async_trait::async_trait;

        struct Slow;

        #[async_trait]
        impl ModelBackend for Slow {
            fn name(&self) -> String {
                "slow".to_string()
            }

            async fn generate(&self, _prompt: &str) -> BackendResult<String> {
                std::thread::sleep(std::time::Duration::from_millis(20));
                Ok("done".to_string())
            }
        }

        let agent = RoleAgent::new(RoleId::Black, Arc::new(Slow));
        let result = agent.execute(&context()).await.unwrap();
        assert!(result.duration_ms >= 20);
    }
}
