//! Sixhats-Backend: Model Backend Clients for Six Hats
//!
//! Every role agent talks to a language model through the [`ModelBackend`]
//! trait: one prompt in, one completion out. This crate owns that seam and
//! the two providers behind it.
//!
//! ## Key Components
//!
//! - [`ModelBackend`]: async `generate(prompt) -> text` contract
//! - [`GeminiBackend`]: hosted Google Gemini `generateContent` API
//! - [`LmStudioBackend`]: local OpenAI-compatible chat completions endpoint
//! - [`create_backend`]: builds the configured provider from [`BackendConfig`]
//! - [`fakes`]: in-memory backends for tests

mod config;
mod error;
mod factory;
pub mod fakes;
mod gemini;
mod lmstudio;
mod traits;

pub use config::{BackendConfig, GeminiConfig, LmStudioConfig, ProviderKind};
pub use error::{BackendError, BackendResult, ConfigError};
pub use factory::create_backend;
pub use gemini::GeminiBackend;
pub use lmstudio::LmStudioBackend;
pub use traits::ModelBackend;
