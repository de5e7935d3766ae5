//! Hosted Google Gemini client
//!
//! Single request/response against `v1beta/{model}:generateContent`,
//! authenticated with an API key header. No explicit timeout beyond the
//! transport defaults.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GeminiConfig;
use crate::error::{BackendError, BackendResult, ConfigError};
use crate::traits::ModelBackend;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Gemini `generateContent` backend
pub struct GeminiBackend {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl GeminiBackend {
    /// Build a client; fails when no API key is configured.
    pub fn new(config: &GeminiConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingSetting("GOOGLE_API_KEY", "gemini"))?;

        let client = Client::builder()
            .user_agent(concat!("sixhats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(model = %config.model, "Initialized Gemini client");

        Ok(GeminiBackend {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            client,
        })
    }

    /// `v1beta` expects fully qualified names; bare ids get the `models/` prefix.
    fn endpoint(&self) -> String {
        let model = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!("{}/v1beta/{model}:generateContent", self.base_url)
    }

    fn transport_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::timeout(format!("Gemini request timed out: {err}"))
        } else if err.is_connect() {
            BackendError::connection(format!(
                "Could not connect to Gemini at {}: {err}",
                self.base_url
            ))
        } else {
            BackendError::backend(format!("Error calling Gemini API: {err}"))
        }
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    fn name(&self) -> String {
        format!("gemini:{}", self.model)
    }

    async fn generate(&self, prompt: &str) -> BackendResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(prompt_chars = prompt.chars().count(), "Sending prompt to Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(BackendError::from_status("Gemini", status, &text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BackendError::backend(format!("Malformed Gemini response: {e}")))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(BackendError::backend("Gemini returned no text candidates"));
        }

        debug!("Received response from Gemini");
        Ok(text)
    }
}
