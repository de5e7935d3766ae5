//! Domain models for Six Hats.
//!
//! - `RoleId` / `RoleResult`: the seven perspectives and what each produces
//! - `SessionContext`: problem statement, per-role slots, lifecycle status
//! - `HatsError`: error taxonomy shared by store, orchestrator and runner

pub mod error;
pub mod role;
pub mod session;

pub use error::{HatsError, Result};
pub use role::{Confidence, RoleId, RoleResult};
pub use session::{RoleResults, SessionContext, SessionId, SessionStatus};
