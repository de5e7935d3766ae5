//! Error types for sixhats-backend

use thiserror::Error;

/// Longest upstream body excerpt kept in an error message.
const MAX_BODY_CHARS: usize = 200;

/// Failures of a single `generate` call.
///
/// The display text is the human-readable message only; the category is
/// available separately through [`BackendError::kind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Backend unreachable (connection refused, DNS failure, reset)
    #[error("{message}")]
    Connection { message: String },

    /// Backend did not answer within the configured ceiling
    #[error("{message}")]
    Timeout { message: String },

    /// Anything else: HTTP error status, malformed body, quota/auth failure
    #[error("{message}")]
    Backend { message: String },
}

impl BackendError {
    pub fn connection(message: impl Into<String>) -> Self {
        BackendError::Connection {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        BackendError::Timeout {
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        BackendError::Backend {
            message: message.into(),
        }
    }

    /// Short category label: `connection`, `timeout` or `backend`.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Connection { .. } => "connection",
            BackendError::Timeout { .. } => "timeout",
            BackendError::Backend { .. } => "backend",
        }
    }

    /// Build an error for a non-success HTTP status.
    pub(crate) fn from_status(provider: &str, status: reqwest::StatusCode, body: &str) -> Self {
        BackendError::backend(format!(
            "{provider} returned HTTP {}: {}",
            status.as_u16(),
            truncate_body(body)
        ))
    }
}

/// Result type for backend calls
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Errors raised while building a backend from configuration.
///
/// These are fatal at startup; no request is ever attempted.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required credential or connection parameter is missing
    #[error("{0} environment variable must be set when using the {1} provider")]
    MissingSetting(&'static str, &'static str),

    /// Unknown provider name
    #[error("Unsupported LLM provider: {0}. Supported providers are: gemini, lmstudio")]
    UnsupportedProvider(String),

    /// A setting could not be parsed
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    /// The HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),
}

impl From<reqwest::Error> for ConfigError {
    fn from(err: reqwest::Error) -> Self {
        ConfigError::ClientBuild(err.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(MAX_BODY_CHARS).collect();
    out.push_str("...");
    out
}
