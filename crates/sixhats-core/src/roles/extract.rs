//! Line-based response extraction.
//!
//! Deliberately naive: split the completion into trimmed non-empty lines and
//! slice or keyword-classify them. A pure function of the input text.

use crate::domain::role::{Confidence, RoleId};
use crate::roles::profile::{ExtractionStyle, RoleProfile};

/// Maximum entries in either list.
pub const MAX_ITEMS: usize = 5;

const INSIGHT_KEYWORDS: [&str; 4] = ["recommend", "decision", "action", "step"];
const RECOMMENDATION_KEYWORDS: [&str; 4] = ["should", "must", "need to", "implement"];

/// Structured view of a raw completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub confidence: Confidence,
}

/// Extract insights and recommendations from `raw` the way `role` does.
pub fn extract(role: RoleId, raw: &str) -> Extraction {
    let profile = role.profile();
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let (insights, recommendations) = match profile.extraction {
        ExtractionStyle::Positional => (
            positional_insights(profile, &lines),
            positional_recommendations(profile, &lines),
        ),
        ExtractionStyle::Keyword => keyword_split(profile, &lines),
    };

    Extraction {
        insights,
        recommendations,
        confidence: profile.confidence,
    }
}

fn positional_insights(profile: &RoleProfile, lines: &[&str]) -> Vec<String> {
    if lines.is_empty() {
        return vec![profile.fallback_insight.to_string()];
    }
    lines.iter().take(MAX_ITEMS).map(|l| l.to_string()).collect()
}

fn positional_recommendations(profile: &RoleProfile, lines: &[&str]) -> Vec<String> {
    if lines.len() <= MAX_ITEMS {
        return profile
            .fallback_recommendations
            .iter()
            .map(|s| s.to_string())
            .collect();
    }
    lines
        .iter()
        .skip(MAX_ITEMS)
        .take(MAX_ITEMS)
        .map(|l| l.to_string())
        .collect()
}

fn keyword_split(profile: &RoleProfile, lines: &[&str]) -> (Vec<String>, Vec<String>) {
    let mut insights = Vec::new();
    let mut recommendations = Vec::new();

    for line in lines {
        let lower = line.to_lowercase();
        // A line matching an insight keyword is never a recommendation, even
        // once the insight list is full.
        if INSIGHT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            if insights.len() < MAX_ITEMS {
                insights.push(line.to_string());
            }
        } else if RECOMMENDATION_KEYWORDS.iter().any(|k| lower.contains(k))
            && recommendations.len() < MAX_ITEMS
        {
            recommendations.push(line.to_string());
        }
    }

    if insights.is_empty() {
        insights = positional_insights(profile, lines);
    }
    if recommendations.is_empty() {
        recommendations = positional_recommendations(profile, lines);
    }
    (insights, recommendations)
}
