//! Prompt text and fallback replies
//!
//! Every advisory capability has fixed fallback text. "Empty" fallbacks are
//! used when the service answered with nothing; "failure" fallbacks when the
//! call itself failed (network, quota, timeout).

use crate::core::money::format_dollars;
use crate::models::project::Project;

pub const GUIDANCE_EMPTY_FALLBACK: &str =
    "Maintain steady liquidity reserves for your Decensat project.";
pub const GUIDANCE_FAILURE_FALLBACK: &str = "Decensat treasury protocol active.";

pub const TERMS_FALLBACK: &str = "Essential compliance rules apply to the Decensat platform.";

pub const CHAT_EMPTY_FALLBACK: &str = "I'm sorry, Decensat AI is temporarily unavailable.";
pub const CHAT_FAILURE_FALLBACK: &str = "Connection to Decensat Sovereign AI interrupted.";

pub const PROGRESS_CALL_BOOKED: &str =
    "Progress verification call automatically booked with the Decensat team.";

const TERMS_PROMPT: &str = "Create a short, reassuring 3-point summary of standard terms and conditions for Decensat, a high-stakes Web3 treasury and escrow platform. Make it sound professional and secure.";

/// Compact project description used for guidance notes
///
/// `"{name}, {days} days, budget ${budget}"`
pub fn project_summary(project: &Project) -> String {
    format!(
        "{}, {} days, budget ${}",
        project.name(),
        project.duration_days(),
        format_dollars(project.budget())
    )
}

/// Context line a chat session is scoped to
pub fn chat_context(project: &Project) -> String {
    format!(
        "Project: {}, Duration: {} days, Budget: ${}. This is a Decensat ecosystem project.",
        project.name(),
        project.duration_days(),
        format_dollars(project.budget())
    )
}

pub fn guidance_prompt(project_summary: &str) -> String {
    format!(
        "As an expert advisor for Decensat C3 project management, analyze these project details and provide a professional 3-sentence guidance note on how to manage the treasury and milestones effectively: {}",
        project_summary
    )
}

pub fn terms_prompt() -> &'static str {
    TERMS_PROMPT
}

pub fn chat_system_instruction(project_context: &str) -> String {
    format!(
        "You are the Sovereign Guidance AI for the Decensat C3 Portal. \
         You help clients manage high-value blockchain project treasuries for Decensat projects. \
         Context: {}. \
         Always provide professional, risk-aware, and actionable advice. \
         Keep answers concise and expert-level.",
        project_context
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn project() -> Project {
        Project::new(
            "Orbital Relay".to_string(),
            120,
            1_800_000,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_project_summary() {
        assert_eq!(project_summary(&project()), "Orbital Relay, 120 days, budget $18000");
    }

    #[test]
    fn test_chat_context() {
        assert_eq!(
            chat_context(&project()),
            "Project: Orbital Relay, Duration: 120 days, Budget: $18000. This is a Decensat ecosystem project."
        );
    }

    #[test]
    fn test_prompts_embed_input() {
        assert!(guidance_prompt("X, 1 days, budget $0").ends_with("X, 1 days, budget $0"));
        assert!(chat_system_instruction("CTX").contains("Context: CTX."));
    }
}
