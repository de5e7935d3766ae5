use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};
use sixhats_backend::fakes::FakeBackend;
use sixhats_backend::{BackendError, ModelBackend};
use sixhats_core::OrchestratorConfig;
use sixhatsd::{run_server_with_listener, ServerOptions};

const REPLY: &str = "fact one\nfact two\nfact three\nfact four\nfact five\nverify data";

struct TestServer {
    port: u16,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    async fn start(backend: impl ModelBackend + 'static, options: ServerOptions) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral listener should bind");
        let port = listener
            .local_addr()
            .expect("listener should expose local address")
            .port();

        let backend: Arc<dyn ModelBackend> = Arc::new(backend);
        let handle =
            tokio::spawn(async move { run_server_with_listener(listener, backend, options).await });

        let server = Self {
            port,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .expect("reqwest client should be built"),
            handle,
        };
        server.wait_until_ready().await;
        server
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}/api{path}", self.port)
    }

    async fn wait_until_ready(&self) {
        for _ in 0..80 {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("server did not become ready");
    }

    async fn create(&self, problem: &str) -> String {
        let resp = self
            .client
            .post(self.url("/sessions"))
            .json(&json!({ "problem_statement": problem }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = resp.json().await.unwrap();
        body["session_id"].as_str().unwrap().to_string()
    }

    async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap_or(Value::Null))
    }

    async fn wait_for_terminal(&self, id: &str) -> Value {
        for _ in 0..200 {
            let (_, body) = self.get_json(&format!("/sessions/{id}/progress")).await;
            if body["status"] == "completed" || body["status"] == "failed" {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("session {id} never finished");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_reports_backend_and_session_count() {
    let server = TestServer::start(FakeBackend::replying(REPLY), ServerOptions::default()).await;
    server.create("Should we adopt a four-day week?").await;

    let (status, body) = server.get_json("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "fake");
    assert_eq!(body["sessions"], 1);
    assert!(body["metrics"]["sessions_created"].as_u64().unwrap() >= 1);
}

#[tokio::test]
async fn create_session_returns_initialized_status() {
    let server = TestServer::start(FakeBackend::replying(REPLY), ServerOptions::default()).await;

    let resp = server
        .client
        .post(server.url("/sessions"))
        .json(&json!({
            "problem_statement": "Should we open a second warehouse?",
            "background_context": "Demand grew 40% last year"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "initialized");
    assert_eq!(body["problem_statement"], "Should we open a second warehouse?");
    assert!(body["session_id"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn create_session_validates_body() {
    let server = TestServer::start(FakeBackend::replying(REPLY), ServerOptions::default()).await;

    let short = server
        .client
        .post(server.url("/sessions"))
        .json(&json!({ "problem_statement": "too short" }))
        .send()
        .await
        .unwrap();
    assert_eq!(short.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = short.json().await.unwrap();
    assert!(body["detail"].as_str().unwrap().contains("at least 10"));

    let missing = server
        .client
        .post(server.url("/sessions"))
        .json(&json!({ "background_context": "no problem given" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn full_analysis_flow_over_http() {
    let server = TestServer::start(FakeBackend::replying(REPLY), ServerOptions::default()).await;
    let id = server.create("Should we migrate to the cloud?").await;

    let resp = server
        .client
        .post(server.url(&format!("/sessions/{id}/analyze")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "initiated");
    assert_eq!(body["session_id"], id.as_str());

    let progress = server.wait_for_terminal(&id).await;
    assert_eq!(progress["status"], "completed");
    assert_eq!(
        progress["agents_completed"],
        json!(["white", "red", "black", "yellow", "green", "blue"])
    );
    assert_eq!(progress["agents_pending"], json!(["solution"]));

    let (status, results) = server.get_json(&format!("/sessions/{id}/results")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results["status"], "completed");
    let white = &results["results"]["white"];
    assert_eq!(white["agent_name"], "White Hat (Facts & Data)");
    assert_eq!(white["confidence_level"], "high");
    assert_eq!(white["recommendations"], json!(["verify data"]));
    assert_eq!(results["results"]["red"]["confidence_level"], "medium");
    assert!(results["results"].get("solution").is_none());

    // A finished session cannot be analysed again.
    let again = server
        .client
        .post(server.url(&format!("/sessions/{id}/analyze")))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn results_before_completion_is_bad_request() {
    let server = TestServer::start(FakeBackend::replying(REPLY), ServerOptions::default()).await;
    let id = server.create("Should we raise prices?").await;

    let (status, body) = server.get_json(&format!("/sessions/{id}/results")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["detail"],
        "Analysis not completed. Current status: initialized"
    );
}

#[tokio::test]
async fn unknown_session_is_404_everywhere() {
    let server = TestServer::start(FakeBackend::replying(REPLY), ServerOptions::default()).await;

    for path in ["/progress", "/results", "/debug"] {
        let (status, body) = server.get_json(&format!("/sessions/nope{path}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(body["detail"], "Session not found");
    }

    let analyze = server
        .client
        .post(server.url("/sessions/nope/analyze"))
        .send()
        .await
        .unwrap();
    assert_eq!(analyze.status(), StatusCode::NOT_FOUND);

    let delete = server
        .client
        .delete(server.url("/sessions/nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn synthesis_failure_is_visible_in_progress_and_debug() {
    let backend = FakeBackend::replying(REPLY)
        .with_failure_when("Black Hat", BackendError::timeout("request timed out after 300s"))
        .with_failure_when(
            "Blue Hat",
            BackendError::connection("Could not connect to LM Studio at http://127.0.0.1:1234"),
        );
    let server = TestServer::start(backend, ServerOptions::default()).await;
    let id = server.create("Should we spin off the hardware unit?").await;

    server
        .client
        .post(server.url(&format!("/sessions/{id}/analyze")))
        .send()
        .await
        .unwrap();

    let progress = server.wait_for_terminal(&id).await;
    assert_eq!(progress["status"], "failed");
    assert_eq!(
        progress["error_message"],
        "Could not connect to LM Studio at http://127.0.0.1:1234"
    );

    let (status, debug) = server.get_json(&format!("/sessions/{id}/debug")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(debug["overall_status"], "failed");
    assert_eq!(debug["agent_status"]["white"]["status"], "completed");
    assert_eq!(debug["agent_status"]["black"]["status"], "failed");
    assert_eq!(
        debug["agent_status"]["black"]["error"],
        "Black Hat (Critical Analysis) failed: timeout: request timed out after 300s"
    );
    assert_eq!(debug["agent_status"]["blue"]["status"], "failed");
    assert_eq!(debug["agent_status"]["solution"]["status"], "pending");

    let (status, _) = server.get_json(&format!("/sessions/{id}/results")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn solution_role_runs_when_enabled() {
    let backend = FakeBackend::replying(REPLY).with_reply_when(
        "CONCRETE, ACTIONABLE SOLUTION",
        "RECOMMENDED DECISION: proceed\nYou must hire a PM",
    );
    let options = ServerOptions {
        orchestrator: OrchestratorConfig {
            include_solution: true,
            ..OrchestratorConfig::default()
        },
        ..ServerOptions::default()
    };
    let server = TestServer::start(backend, options).await;
    let id = server.create("Should we build a mobile app?").await;

    server
        .client
        .post(server.url(&format!("/sessions/{id}/analyze")))
        .send()
        .await
        .unwrap();
    assert_eq!(server.wait_for_terminal(&id).await["status"], "completed");

    let (_, results) = server.get_json(&format!("/sessions/{id}/results")).await;
    let solution = &results["results"]["solution"];
    assert_eq!(solution["agent_name"], "Solution Generator");
    assert_eq!(solution["key_insights"], json!(["RECOMMENDED DECISION: proceed"]));
    assert_eq!(solution["recommendations"], json!(["You must hire a PM"]));
}

#[tokio::test]
async fn delete_removes_session() {
    let server = TestServer::start(FakeBackend::replying(REPLY), ServerOptions::default()).await;
    let id = server.create("Should we sponsor the conference?").await;

    let resp = server
        .client
        .delete(server.url(&format!("/sessions/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let (status, _) = server.get_json(&format!("/sessions/{id}/progress")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
