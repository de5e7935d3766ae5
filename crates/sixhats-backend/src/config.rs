//! Backend configuration
//!
//! Values come from environment variables (optionally seeded from a `.env`
//! file by the daemon). [`BackendConfig::from_lookup`] takes any key lookup so
//! tests never touch the process environment.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "models/gemini-flash-lite-latest";
pub const DEFAULT_LMSTUDIO_BASE_URL: &str = "http://127.0.0.1:1234";
pub const DEFAULT_LMSTUDIO_MODEL: &str = "ibm/granite-4-h-tiny";
/// Local models can be slow; five minutes before a call is declared timed out.
pub const DEFAULT_LMSTUDIO_TIMEOUT_SECS: u64 = 300;

/// Which model provider the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    LmStudio,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::LmStudio => "lmstudio",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "lmstudio" => Ok(ProviderKind::LmStudio),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Hosted Gemini API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; required when Gemini is the active provider
    pub api_key: Option<String>,
    /// Fully qualified model name, e.g. `models/gemini-flash-lite-latest`
    pub model: String,
    /// API root, overridable for tests and proxies
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Local LM Studio (OpenAI-compatible) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LmStudioConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for LmStudioConfig {
    fn default() -> Self {
        LmStudioConfig {
            base_url: DEFAULT_LMSTUDIO_BASE_URL.to_string(),
            model: DEFAULT_LMSTUDIO_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_LMSTUDIO_TIMEOUT_SECS),
        }
    }
}

/// Full backend selection plus per-provider connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub provider: ProviderKind,
    pub gemini: GeminiConfig,
    pub lmstudio: LmStudioConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            provider: ProviderKind::Gemini,
            gemini: GeminiConfig::default(),
            lmstudio: LmStudioConfig::default(),
        }
    }
}

impl BackendConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = BackendConfig::default();

        let provider = match get("LLM_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => defaults.provider,
        };

        let timeout = match get("LMSTUDIO_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "LMSTUDIO_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.lmstudio.timeout,
        };

        Ok(BackendConfig {
            provider,
            gemini: GeminiConfig {
                api_key: get("GOOGLE_API_KEY"),
                model: get("GEMINI_MODEL").unwrap_or(defaults.gemini.model),
                base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini.base_url),
            },
            lmstudio: LmStudioConfig {
                base_url: get("LMSTUDIO_BASE_URL").unwrap_or(defaults.lmstudio.base_url),
                model: get("LMSTUDIO_MODEL").unwrap_or(defaults.lmstudio.model),
                timeout,
            },
        })
    }
}
