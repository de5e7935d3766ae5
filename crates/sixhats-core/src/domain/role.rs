//! Role vocabulary: `RoleId`, `Confidence`, `RoleResult`.

use serde::{Deserialize, Serialize};

/// The seven analytical perspectives: six hats plus the final solution role.
///
/// Declaration order is the canonical display order and drives `Ord`, so
/// every map keyed by `RoleId` iterates white → solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleId {
    White,
    Red,
    Black,
    Yellow,
    Green,
    Blue,
    Solution,
}

impl RoleId {
    /// All seven roles in canonical order.
    pub const ALL: [RoleId; 7] = [
        RoleId::White,
        RoleId::Red,
        RoleId::Black,
        RoleId::Yellow,
        RoleId::Green,
        RoleId::Blue,
        RoleId::Solution,
    ];

    /// The independent perspectives that run concurrently in Phase 1.
    pub const PARALLEL: [RoleId; 5] = [
        RoleId::White,
        RoleId::Red,
        RoleId::Black,
        RoleId::Yellow,
        RoleId::Green,
    ];

    /// Wire token, e.g. `"white"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleId::White => "white",
            RoleId::Red => "red",
            RoleId::Black => "black",
            RoleId::Yellow => "yellow",
            RoleId::Green => "green",
            RoleId::Blue => "blue",
            RoleId::Solution => "solution",
        }
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RoleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleId::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown role: {s}"))
    }
}

/// Fixed per-role confidence label; never derived from model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Output of one role agent execution. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleResult {
    pub role: RoleId,
    /// Human-facing agent name, e.g. "White Hat (Facts & Data)".
    pub display_name: String,
    /// Untouched model completion.
    pub raw_output: String,
    /// At most five.
    pub insights: Vec<String>,
    /// At most five.
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
    /// Wall-clock time spent in the backend call and extraction.
    pub duration_ms: u64,
}
