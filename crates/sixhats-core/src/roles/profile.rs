//! Static per-role configuration.
//!
//! The seven variants differ only in data: display name, confidence label,
//! fallback strings and extraction style. Prompt templates live in
//! [`prompts`](super::prompts).

use crate::domain::role::{Confidence, RoleId};

/// How raw model text is split into insights and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStyle {
    /// First five lines are insights, lines six to ten recommendations.
    Positional,
    /// Lines are classified by action/obligation keywords, falling back to
    /// positional when a list comes out empty.
    Keyword,
}

/// Fixed configuration of one role.
#[derive(Debug)]
pub struct RoleProfile {
    pub role: RoleId,
    pub display_name: &'static str,
    pub confidence: Confidence,
    /// Sole insight when the model returned no text at all.
    pub fallback_insight: &'static str,
    /// Recommendations when the model returned five lines or fewer.
    pub fallback_recommendations: &'static [&'static str],
    pub extraction: ExtractionStyle,
}

static WHITE: RoleProfile = RoleProfile {
    role: RoleId::White,
    display_name: "White Hat (Facts & Data)",
    confidence: Confidence::High,
    fallback_insight: "Analyzed from factual perspective",
    fallback_recommendations: &["Gather missing data", "Verify assumptions"],
    extraction: ExtractionStyle::Positional,
};

static RED: RoleProfile = RoleProfile {
    role: RoleId::Red,
    display_name: "Red Hat (Emotions & Intuition)",
    confidence: Confidence::Medium,
    fallback_insight: "Analyzed from emotional perspective",
    fallback_recommendations: &["Address emotional concerns", "Foster enthusiasm"],
    extraction: ExtractionStyle::Positional,
};

static BLACK: RoleProfile = RoleProfile {
    role: RoleId::Black,
    display_name: "Black Hat (Critical Analysis)",
    confidence: Confidence::High,
    fallback_insight: "Identified critical risks",
    fallback_recommendations: &["Mitigate identified risks", "Plan contingencies"],
    extraction: ExtractionStyle::Positional,
};

static YELLOW: RoleProfile = RoleProfile {
    role: RoleId::Yellow,
    display_name: "Yellow Hat (Vision & Optimism)",
    confidence: Confidence::High,
    fallback_insight: "Identified opportunities",
    fallback_recommendations: &["Capitalize on opportunities", "Pursue initiatives"],
    extraction: ExtractionStyle::Positional,
};

static GREEN: RoleProfile = RoleProfile {
    role: RoleId::Green,
    display_name: "Green Hat (Creativity & Innovation)",
    confidence: Confidence::Medium,
    fallback_insight: "Generated creative alternatives",
    fallback_recommendations: &["Test creative ideas", "Combine best ideas"],
    extraction: ExtractionStyle::Positional,
};

static BLUE: RoleProfile = RoleProfile {
    role: RoleId::Blue,
    display_name: "Blue Hat (Synthesis & Control)",
    confidence: Confidence::High,
    fallback_insight: "Synthesized all perspectives",
    fallback_recommendations: &["Implement recommended actions", "Monitor outcomes"],
    extraction: ExtractionStyle::Positional,
};

static SOLUTION: RoleProfile = RoleProfile {
    role: RoleId::Solution,
    display_name: "Solution Generator",
    confidence: Confidence::High,
    fallback_insight: "Solution generated based on analysis",
    fallback_recommendations: &["Follow the implementation plan", "Monitor progress regularly"],
    extraction: ExtractionStyle::Keyword,
};

impl RoleId {
    /// The static profile of this role.
    pub fn profile(&self) -> &'static RoleProfile {
        match self {
            RoleId::White => &WHITE,
            RoleId::Red => &RED,
            RoleId::Black => &BLACK,
            RoleId::Yellow => &YELLOW,
            RoleId::Green => &GREEN,
            RoleId::Blue => &BLUE,
            RoleId::Solution => &SOLUTION,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.profile().display_name
    }
}
