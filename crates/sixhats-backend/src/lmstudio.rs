//! LM Studio client
//!
//! LM Studio serves an OpenAI-compatible `/v1/chat/completions` endpoint on
//! the local machine. Requests ask for unbounded output (`max_tokens = -1`)
//! and run under a generous timeout because local models can be slow.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::LmStudioConfig;
use crate::error::{BackendError, BackendResult, ConfigError};
use crate::traits::ModelBackend;

const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    max_tokens: i64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// OpenAI-compatible local backend
pub struct LmStudioBackend {
    base_url: String,
    model: String,
    timeout: Duration,
    client: Client,
}

impl LmStudioBackend {
    pub fn new(config: &LmStudioConfig) -> Result<Self, ConfigError> {
        if config.base_url.trim().is_empty() {
            return Err(ConfigError::MissingSetting("LMSTUDIO_BASE_URL", "lmstudio"));
        }
        if config.model.trim().is_empty() {
            return Err(ConfigError::MissingSetting("LMSTUDIO_MODEL", "lmstudio"));
        }

        let client = Client::builder()
            .user_agent(concat!("sixhats/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        info!(model = %config.model, url = %base_url, "Initialized LM Studio client");

        Ok(LmStudioBackend {
            base_url,
            model: config.model.clone(),
            timeout: config.timeout,
            client,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> BackendError {
        let mapped = if err.is_timeout() {
            BackendError::timeout(format!(
                "LM Studio request timed out after {}s. The model might be too slow or overloaded.",
                self.timeout.as_secs()
            ))
        } else if err.is_connect() {
            BackendError::connection(format!(
                "Could not connect to LM Studio at {}. Make sure LM Studio is running.",
                self.base_url
            ))
        } else {
            BackendError::backend(format!("Error calling LM Studio API: {err}"))
        };
        error!(kind = mapped.kind(), error = %mapped, "LM Studio call failed");
        mapped
    }
}

#[async_trait]
impl ModelBackend for LmStudioBackend {
    fn name(&self) -> String {
        format!("lmstudio:{}", self.model)
    }

    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: -1,
            stream: false,
        };

        debug!(prompt_chars = prompt.chars().count(), "Sending prompt to LM Studio");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::from_status("LM Studio", status, &text));
        }

        // The body itself can stall past the timeout, so classify here too.
        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::backend(format!("Malformed LM Studio response: {e}")))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| BackendError::backend("LM Studio response contained no choices"))?;

        debug!("Received response from LM Studio");
        Ok(text)
    }
}
