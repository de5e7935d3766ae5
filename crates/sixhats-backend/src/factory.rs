//! Provider selection

use std::sync::Arc;

use tracing::info;

use crate::config::{BackendConfig, ProviderKind};
use crate::error::ConfigError;
use crate::gemini::GeminiBackend;
use crate::lmstudio::LmStudioBackend;
use crate::traits::ModelBackend;

/// Build the backend named by `config.provider`.
///
/// Missing credentials or connection parameters fail here, at startup, rather
/// than on the first request.
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn ModelBackend>, ConfigError> {
    info!(provider = %config.provider, "Creating LLM client");

    let backend: Arc<dyn ModelBackend> = match config.provider {
        ProviderKind::Gemini => Arc::new(GeminiBackend::new(&config.gemini)?),
        ProviderKind::LmStudio => Arc::new(LmStudioBackend::new(&config.lmstudio)?),
    };
    Ok(backend)
}
