//! Prompt templates.
//!
//! Every template is a pure function of the session's problem statement,
//! background and, for the blue and solution roles, excerpts of results
//! already present in the session.

use crate::domain::role::RoleId;
use crate::domain::session::SessionContext;

/// Characters of each prior result the blue role sees.
pub const BLUE_EXCERPT_CHARS: usize = 500;
/// Characters of each prior result the solution role sees.
pub const SOLUTION_EXCERPT_CHARS: usize = 800;

const NO_BACKGROUND: &str = "None provided";

struct Brief {
    persona: &'static str,
    hat: &'static str,
    task: &'static str,
    points: &'static [&'static str],
    closing: &'static str,
}

const WHITE: Brief = Brief {
    persona: "a logical, objective analyst",
    hat: "White",
    task: "Examine the problem objectively and set out:",
    points: &[
        "Known facts and verifiable data",
        "Sources of information and how reliable they are",
        "Gaps in the data that must be closed",
        "Assumptions currently being made",
        "What remains unknown",
    ],
    closing: "Structure the answer with separate sections for Facts, Data Gaps and Key Assumptions.",
};

const RED: Brief = Brief {
    persona: "an intuitive, emotionally aware analyst",
    hat: "Red",
    task: "Examine the problem through feelings and intuition:",
    points: &[
        "Your gut reaction to the situation",
        "The emotional dimensions at play",
        "Fears or concerns stakeholders may hold",
        "Which possibilities create excitement",
        "How people are likely to feel about candidate solutions",
    ],
    closing: "Concentrate on emotions, hunches and intuitive reads.",
};

const BLACK: Brief = Brief {
    persona: "a critical, skeptical analyst",
    hat: "Black",
    task: "Examine the problem critically and identify:",
    points: &[
        "Risks and threats",
        "Weaknesses in the likely approaches",
        "What could go wrong",
        "Hidden obstacles",
        "Reasons this might fail",
        "The devil's advocate position",
    ],
    closing: "Be rigorous and surface every significant vulnerability.",
};

const YELLOW: Brief = Brief {
    persona: "an optimistic, forward-looking analyst",
    hat: "Yellow",
    task: "Examine the problem for value and opportunity:",
    points: &[
        "Benefits and opportunities",
        "Positive outcomes within reach",
        "Ways this could create value",
        "Best-case scenarios",
        "What success would look like",
        "How the situation could improve",
    ],
    closing: "Stay constructive and focus on positive potential.",
};

const GREEN: Brief = Brief {
    persona: "a creative, inventive analyst",
    hat: "Green",
    task: "Generate ideas and alternatives:",
    points: &[
        "Unconventional approaches that could work",
        "Ideas nobody has considered yet",
        "Ways to rethink the problem entirely",
        "What becomes possible if constraints are removed",
        "Lateral thinking moves that apply",
    ],
    closing: "Offer several distinct alternatives and think beyond the obvious.",
};

const BLUE: Brief = Brief {
    persona: "a strategic synthesizer and facilitator",
    hat: "Blue",
    task: "Synthesize every perspective above and provide:",
    points: &[
        "A summary of the key findings",
        "Common themes and points of agreement",
        "Key conflicts and tensions",
        "A combined risk assessment",
        "A combined opportunity assessment",
        "Recommended next steps and an action plan",
        "A decision framework for implementation",
    ],
    closing: "Integrate all thinking styles into one coherent, actionable summary.",
};

/// Build the full prompt `role` sends for `context`.
pub fn build_prompt(role: RoleId, context: &SessionContext) -> String {
    match role {
        RoleId::White => perspective(&WHITE, context, None),
        RoleId::Red => perspective(&RED, context, None),
        RoleId::Black => perspective(&BLACK, context, None),
        RoleId::Yellow => perspective(&YELLOW, context, None),
        RoleId::Green => perspective(&GREEN, context, None),
        RoleId::Blue => perspective(&BLUE, context, Some(&blue_digest(context))),
        RoleId::Solution => solution(context),
    }
}

/// First `max_chars` characters of `text`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn background(context: &SessionContext) -> &str {
    context.background.as_deref().unwrap_or(NO_BACKGROUND)
}

fn perspective(brief: &Brief, context: &SessionContext, prior: Option<&str>) -> String {
    let mut prompt = format!(
        "You are {} using the {} Hat thinking approach.\n\n\
         Problem Statement:\n{}\n\n\
         Background Context:\n{}\n\n",
        brief.persona,
        brief.hat,
        context.problem_statement,
        background(context),
    );
    if let Some(prior) = prior {
        prompt.push_str("Previous Analysis from Other Hats:\n");
        prompt.push_str(prior);
        prompt.push_str("\n\n");
    }
    prompt.push_str(brief.task);
    prompt.push('\n');
    for (i, point) in brief.points.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, point));
    }
    prompt.push('\n');
    prompt.push_str(brief.closing);
    prompt
}

/// `"{role}: {excerpt}"` for every present result except blue's own.
fn blue_digest(context: &SessionContext) -> String {
    context
        .results()
        .present()
        .filter(|r| r.role != RoleId::Blue)
        .map(|r| format!("{}: {}", r.role, excerpt(&r.raw_output, BLUE_EXCERPT_CHARS)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn solution_label(role: RoleId) -> Option<&'static str> {
    match role {
        RoleId::White => Some("WHITE HAT (Facts)"),
        RoleId::Red => Some("RED HAT (Emotions)"),
        RoleId::Black => Some("BLACK HAT (Risks)"),
        RoleId::Yellow => Some("YELLOW HAT (Opportunities)"),
        RoleId::Green => Some("GREEN HAT (Creativity)"),
        RoleId::Blue => Some("BLUE HAT (Synthesis)"),
        RoleId::Solution => None,
    }
}

fn solution(context: &SessionContext) -> String {
    let perspectives = context
        .results()
        .present()
        .filter_map(|r| {
            solution_label(r.role).map(|label| {
                format!(
                    "{label}:\n{}",
                    excerpt(&r.raw_output, SOLUTION_EXCERPT_CHARS)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "You are a strategic decision-making expert. Using the Six Thinking Hats analysis \
         below, produce a CONCRETE, ACTIONABLE SOLUTION to the problem.\n\n\
         ORIGINAL PROBLEM:\n{}\n\n\
         BACKGROUND:\n{}\n\n\
         ANALYSIS FROM ALL PERSPECTIVES:\n{}\n\n\
         Your answer must contain:\n\
         1. RECOMMENDED DECISION: yes, no or conditional, with the conditions spelled out\n\
         2. ACTION PLAN: step-by-step implementation with a timeline in months or quarters\n\
         3. RESOURCE REQUIREMENTS: people, budget and tooling needed\n\
         4. RISK MITIGATION: the top three risks and how to handle each\n\
         5. SUCCESS METRICS: specific KPIs that show the solution is working\n\
         6. NEXT STEPS: what to do in the next 30 days\n\n\
         Be specific and practical. Use clear sections and bullet points.",
        context.problem_statement,
        background(context),
        perspectives,
    )
}
