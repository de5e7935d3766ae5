//! Role agents and their per-role configuration.

pub mod agent;
pub mod extract;
pub mod profile;
pub mod prompts;

pub use agent::RoleAgent;
pub use extract::{extract, Extraction};
pub use profile::{ExtractionStyle, RoleProfile};
pub use prompts::build_prompt;
