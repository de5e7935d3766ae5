use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sixhats_backend::fakes::{BarrierBackend, FakeBackend};
use sixhats_backend::{BackendError, BackendResult, ModelBackend};
use sixhats_core::{
    HatsError, Orchestrator, OrchestratorConfig, RoleId, SessionContext, SessionId, SessionSink,
    SessionStatus,
};

const SIX_LINES: &str = "one\ntwo\nthree\nfour\nfive\nsix";

fn context() -> SessionContext {
    SessionContext::new(
        SessionId::new(),
        "Should we launch a subscription tier?".to_string(),
        Some("B2B SaaS, 40 customers".to_string()),
    )
}

fn orchestrator(backend: impl ModelBackend + 'static) -> Orchestrator {
    Orchestrator::new(Arc::new(backend), OrchestratorConfig::default())
}

#[tokio::test]
async fn parallel_phase_all_succeed_fills_exactly_five_slots() {
    let orch = orchestrator(FakeBackend::replying(SIX_LINES));
    let mut ctx = context();

    let results = orch.execute_parallel(&mut ctx, None).await;

    assert_eq!(results.len(), 5);
    assert_eq!(ctx.results().completed(), RoleId::PARALLEL.to_vec());
    assert_eq!(ctx.results().pending(), vec![RoleId::Blue, RoleId::Solution]);
    assert!(ctx.role_errors().is_empty());
    assert_eq!(ctx.status(), SessionStatus::Initialized);
}

#[tokio::test]
async fn parallel_phase_tolerates_one_failure() {
    let backend = FakeBackend::replying(SIX_LINES)
        .with_failure_when("Black Hat", BackendError::timeout("request timed out after 300s"));
    let orch = orchestrator(backend);
    let mut ctx = context();

    let results = orch.execute_parallel(&mut ctx, None).await;

    assert_eq!(results.len(), 4);
    assert!(!results.contains_key(&RoleId::Black));
    assert!(!ctx.results().is_present(RoleId::Black));
    for role in [RoleId::White, RoleId::Red, RoleId::Yellow, RoleId::Green] {
        assert!(ctx.results().is_present(role), "{role} should be present");
    }

    let message = ctx.role_errors().get(&RoleId::Black).cloned().unwrap_or_default();
    assert_eq!(
        message,
        "Black Hat (Critical Analysis) failed: timeout: request timed out after 300s"
    );
    assert_eq!(ctx.role_errors().len(), 1);
}

#[tokio::test]
async fn parallel_phase_with_every_role_failing_still_settles() {
    let orch = orchestrator(FakeBackend::failing(BackendError::connection("unreachable")));
    let mut ctx = context();

    let results = orch.execute_parallel(&mut ctx, None).await;

    assert!(results.is_empty());
    assert_eq!(ctx.role_errors().len(), 5);
    assert!(ctx.results().completed().is_empty());
}

#[tokio::test]
async fn parallel_phase_runs_roles_concurrently() {
    // Every call blocks until all five are in flight, so a sequential
    // fan-out would never finish.
    let backend = Arc::new(BarrierBackend::new(5, SIX_LINES));
    let orch = Orchestrator::new(backend.clone(), OrchestratorConfig::default());
    let mut ctx = context();

    let results = tokio::time::timeout(
        Duration::from_secs(5),
        orch.execute_parallel(&mut ctx, None),
    )
    .await
    .expect("parallel roles must be in flight together");

    assert_eq!(results.len(), 5);
    assert_eq!(backend.call_count(), 5);
}

/// Records when each call starts and ends; parallel roles finish after
/// staggered delays.
struct TimelineBackend {
    events: Mutex<Vec<String>>,
}

#[async_trait]
impl ModelBackend for TimelineBackend {
    fn name(&self) -> String {
        "timeline".to_string()
    }

    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        let (label, delay_ms) = if prompt.contains("Blue Hat") {
            ("blue", 0)
        } else if prompt.contains("White Hat") {
            ("white", 300)
        } else if prompt.contains("Red Hat") {
            ("red", 10)
        } else if prompt.contains("Black Hat") {
            ("black", 200)
        } else if prompt.contains("Yellow Hat") {
            ("yellow", 50)
        } else {
            ("green", 100)
        };
        self.events.lock().push(format!("start:{label}"));
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        self.events.lock().push(format!("end:{label}"));
        if label == "black" {
            return Err(BackendError::backend("quota exhausted"));
        }
        Ok(format!("{label} analysis"))
    }
}

#[tokio::test(start_paused = true)]
async fn synthesis_starts_only_after_every_parallel_role_settles() {
    let backend = Arc::new(TimelineBackend {
        events: Mutex::new(Vec::new()),
    });
    let orch = Orchestrator::new(backend.clone(), OrchestratorConfig::default());
    let mut ctx = context();

    orch.execute_full_cycle(&mut ctx).await.unwrap();

    let events = backend.events.lock().clone();
    let blue_start = events.iter().position(|e| e == "start:blue").unwrap();
    let ends_before_blue = events[..blue_start]
        .iter()
        .filter(|e| e.starts_with("end:"))
        .count();
    assert_eq!(ends_before_blue, 5);
    // The failed role did not block synthesis.
    assert!(!ctx.results().is_present(RoleId::Black));
    assert_eq!(ctx.status(), SessionStatus::Completed);
}

#[tokio::test]
async fn synthesis_prompt_sees_only_successful_phase_one_output() {
    let backend = Arc::new(
        FakeBackend::replying("generic")
            .with_reply_when("Red Hat", "gut says yes")
            .with_failure_when("Green Hat", BackendError::backend("model overloaded")),
    );
    let orch = Orchestrator::new(backend.clone(), OrchestratorConfig::default());
    let mut ctx = context();

    orch.execute_full_cycle(&mut ctx).await.unwrap();

    let prompts = backend.prompts();
    let blue_prompt = prompts
        .iter()
        .find(|p| p.contains("Blue Hat"))
        .expect("synthesis prompt sent");
    assert!(blue_prompt.contains("red: gut says yes"));
    assert!(!blue_prompt.contains("green:"));
    assert_eq!(prompts.last(), Some(blue_prompt));
}

#[tokio::test]
async fn full_cycle_success_completes_with_six_results() {
    let orch = orchestrator(FakeBackend::replying(SIX_LINES));
    let mut ctx = context();

    orch.execute_full_cycle(&mut ctx).await.unwrap();

    assert_eq!(ctx.status(), SessionStatus::Completed);
    assert!(ctx.error_message().is_none());
    let mut expected = RoleId::PARALLEL.to_vec();
    expected.push(RoleId::Blue);
    assert_eq!(ctx.results().completed(), expected);
    assert_eq!(ctx.results().pending(), vec![RoleId::Solution]);

    let blue = ctx.result(RoleId::Blue).unwrap();
    assert_eq!(blue.display_name, "Blue Hat (Synthesis & Control)");
    assert_eq!(blue.recommendations, vec!["six"]);
}

#[tokio::test]
async fn full_cycle_synthesis_failure_marks_session_failed_and_propagates() {
    let cause = BackendError::backend("Gemini API error (500 Internal Server Error): boom");
    let backend = FakeBackend::replying(SIX_LINES).with_failure_when("Blue Hat", cause.clone());
    let orch = orchestrator(backend);
    let mut ctx = context();

    let err = orch.execute_full_cycle(&mut ctx).await.unwrap_err();

    assert!(matches!(&err, HatsError::Backend(e) if *e == cause));
    assert_eq!(ctx.status(), SessionStatus::Failed);
    assert_eq!(ctx.error_message(), Some(err.to_string().as_str()));
    assert_eq!(ctx.error_message(), Some(cause.to_string().as_str()));
    assert_eq!(ctx.results().completed(), RoleId::PARALLEL.to_vec());
    assert!(ctx.role_errors().contains_key(&RoleId::Blue));
}

#[tokio::test]
async fn full_cycle_with_solution_runs_it_last() {
    let backend = Arc::new(
        FakeBackend::replying(SIX_LINES)
            .with_reply_when("CONCRETE, ACTIONABLE SOLUTION", "Decision: go\nWe should hire"),
    );
    let orch = Orchestrator::new(
        backend.clone(),
        OrchestratorConfig {
            include_solution: true,
            ..OrchestratorConfig::default()
        },
    );
    let mut ctx = context();

    orch.execute_full_cycle(&mut ctx).await.unwrap();

    assert_eq!(ctx.status(), SessionStatus::Completed);
    assert_eq!(ctx.results().completed(), RoleId::ALL.to_vec());
    let solution = ctx.result(RoleId::Solution).unwrap();
    assert_eq!(solution.insights, vec!["Decision: go"]);
    assert_eq!(solution.recommendations, vec!["We should hire"]);

    let prompts = backend.prompts();
    assert_eq!(prompts.len(), 7);
    assert!(prompts[6].contains("BLUE HAT (Synthesis):"));
}

#[derive(Default)]
struct RecordingSink {
    checkpoints: Mutex<Vec<(SessionStatus, usize)>>,
}

impl SessionSink for RecordingSink {
    fn checkpoint(&self, context: &SessionContext) {
        self.checkpoints
            .lock()
            .push((context.status(), context.results().completed().len()));
    }
}

#[tokio::test]
async fn sink_receives_a_checkpoint_after_each_phase() {
    let sink = Arc::new(RecordingSink::default());
    let orch = orchestrator(FakeBackend::replying(SIX_LINES)).with_sink(sink.clone());
    let mut ctx = context();

    orch.execute_full_cycle(&mut ctx).await.unwrap();

    assert_eq!(
        *sink.checkpoints.lock(),
        vec![
            (SessionStatus::Processing, 0),
            (SessionStatus::Processing, 5),
            (SessionStatus::Processing, 6),
        ]
    );
}
