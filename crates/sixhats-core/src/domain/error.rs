//! Domain-level error taxonomy for Six Hats.

use sixhats_backend::BackendError;

use crate::domain::session::SessionStatus;

/// Six Hats domain errors.
#[derive(Debug, thiserror::Error)]
pub enum HatsError {
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("session {session_id} cannot start analysis while {status}")]
    AnalysisConflict {
        session_id: String,
        status: SessionStatus,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    /// Model backend failure, displayed as the backend's own message.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Result type for Six Hats domain operations.
pub type Result<T> = std::result::Result<T, HatsError>;
