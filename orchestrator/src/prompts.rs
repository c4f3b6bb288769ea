//! Prompt templates for every agent role
//!
//! Each template is a pure function: a fixed persona line, a fixed output
//! contract, then the interpolated content. Prompts always start with the
//! role's persona, so a prompt can be attributed to its role by prefix.

use crate::extraction::{FINAL_DRAFT_MARKER, ORIGINAL_DRAFT_MARKER};
use crate::types::{AgentRole, Task};

/// Glyph that starts every reviewer bullet
pub const ARROW_BULLET: &str = "➡️";

/// Upper bound on bullets per reviewer
pub const MAX_BULLETS: usize = 3;

/// Heading the consolidated feedback sits under
pub const CONSOLIDATED_FEEDBACK_HEADING: &str = "--- CONSOLIDATED FEEDBACK ---";

const REWRITE_INSTRUCTION: &str = "Please rewrite the following original draft based on the feedback provided.";

/// Opening line of every prompt for a role
pub fn persona(role: AgentRole) -> &'static str {
    match role {
        AgentRole::Writer => "You are a professional blog post writer.",
        AgentRole::SeoReviewer => "You are a professional SEO specialist.",
        AgentRole::LegalReviewer => "You are a professional legal expert.",
        AgentRole::EthicsReviewer => "You are a professional ethics expert.",
        AgentRole::PlagiarismChecker => "You are a professional plagiarism checker.",
        AgentRole::ReviewManager => "You are the review manager of an editorial team.",
        AgentRole::FinalEditor => "You are the professional final editor.",
    }
}

/// Bolded label a reviewer must open its feedback with
pub fn feedback_header(role: AgentRole) -> &'static str {
    match role {
        AgentRole::SeoReviewer => "SEO Reviewer:",
        AgentRole::LegalReviewer => "Legal Reviewer:",
        AgentRole::EthicsReviewer => "Ethical Reviewer:",
        AgentRole::PlagiarismChecker => "Plagiarism Checker:",
        AgentRole::ReviewManager => "Review Manager:",
        AgentRole::Writer => "Draft Writer:",
        AgentRole::FinalEditor => "Final Editor:",
    }
}

fn review_focus(role: AgentRole) -> &'static str {
    match role {
        AgentRole::SeoReviewer => "Review the original draft for search engine optimization: keywords, title, structure and readability.",
        AgentRole::LegalReviewer => "Review the original draft for legal issues such as defamation, unsupported claims, trademarks and privacy.",
        AgentRole::EthicsReviewer => "Review the original draft for ethical concerns such as bias, misleading statements and fairness.",
        AgentRole::PlagiarismChecker => "Check the original draft for plagiarism and originality, pointing out generic or likely copied phrasing.",
        _ => "Review the original draft.",
    }
}

pub fn writer_prompt(task: &Task) -> String {
    format!(
        r#"{persona}
Your only job is to write a first draft based on the provided topic.
Do not add any other commentary.

Write a concise yet engaging blog post about "{topic}".
The blog post should be under {word_limit} words."#,
        persona = persona(AgentRole::Writer),
        topic = task.topic(),
        word_limit = task.word_limit(),
    )
}

/// Prompt for one reviewer role bound to a draft
pub fn reviewer_prompt(role: AgentRole, draft: &str) -> String {
    format!(
        r#"{persona}
{focus}
Provide your feedback as separate bullet lines, each starting with {ARROW_BULLET}, with no more than {MAX_BULLETS} points.
For example:
{ARROW_BULLET} first observation
{ARROW_BULLET} second observation
Do not label the points as "point 1", "point 2" and so on.
Start your feedback with the bolded header '**{header}**'.

Here is the draft to review:

{draft}"#,
        persona = persona(role),
        focus = review_focus(role),
        header = feedback_header(role),
    )
}

/// Prompt asking a single agent to merge the reviewers' feedback
pub fn review_manager_prompt<'a>(draft: &str, feedback: impl IntoIterator<Item = &'a str>) -> String {
    let feedback = feedback.into_iter().collect::<Vec<_>>().join("\n\n");
    format!(
        r#"{persona}
Summarize the reviewers' feedback below into one consolidated report for the final editor.
Keep every actionable point, drop duplicates and do not add opinions of your own.
Write the report as bullet lines, each starting with {ARROW_BULLET}.
Start the report with the bolded header '**{header}**'.

{ORIGINAL_DRAFT_MARKER}

{draft}

--- REVIEWER FEEDBACK ---

{feedback}"#,
        persona = persona(AgentRole::ReviewManager),
        header = feedback_header(AgentRole::ReviewManager),
    )
}

/// The block handed to the final editor: the draft plus the feedback body
pub fn consolidated_feedback(draft: &str, feedback_body: &str) -> String {
    format!(
        "{REWRITE_INSTRUCTION}\n\n{ORIGINAL_DRAFT_MARKER}\n\n{draft}\n\n{CONSOLIDATED_FEEDBACK_HEADING}\n\n{feedback_body}"
    )
}

pub fn final_editor_prompt(consolidated: &str) -> String {
    format!(
        r#"{persona}
Rewrite the original draft solely based on the consolidated feedback provided, without any additional comments.
Your rewritten draft must contain the same number of words as the original draft.
Do not mention the word count in your draft.
Output two things, each clearly labeled: '{ORIGINAL_DRAFT_MARKER}' followed by the original draft, then '{FINAL_DRAFT_MARKER}' followed by your rewrite.

{consolidated}"#,
        persona = persona(AgentRole::FinalEditor),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [AgentRole; 7] = [
        AgentRole::Writer,
        AgentRole::SeoReviewer,
        AgentRole::LegalReviewer,
        AgentRole::EthicsReviewer,
        AgentRole::PlagiarismChecker,
        AgentRole::ReviewManager,
        AgentRole::FinalEditor,
    ];

    #[test]
    fn test_personas_are_unique() {
        for (i, a) in ALL_ROLES.iter().enumerate() {
            for b in &ALL_ROLES[i + 1..] {
                assert!(!persona(*a).starts_with(persona(*b)));
                assert!(!persona(*b).starts_with(persona(*a)));
            }
        }
    }

    #[test]
    fn test_writer_prompt_interpolates_task() {
        let task = Task::new("The Future of Space Exploration", 100).unwrap();
        let prompt = writer_prompt(&task);

        assert!(prompt.starts_with(persona(AgentRole::Writer)));
        assert!(prompt.contains("\"The Future of Space Exploration\""));
        assert!(prompt.contains("under 100 words"));
    }

    #[test]
    fn test_reviewer_prompts_share_output_contract() {
        for role in AgentRole::REVIEWERS {
            let prompt = reviewer_prompt(role, "DRAFT_A");

            assert!(prompt.starts_with(persona(role)));
            assert!(prompt.contains(&format!("'**{}**'", feedback_header(role))));
            assert!(prompt.contains(ARROW_BULLET));
            assert!(prompt.contains("no more than 3 points"));
            assert!(prompt.ends_with("Here is the draft to review:\n\nDRAFT_A"));
        }
    }

    #[test]
    fn test_consolidated_feedback_layout() {
        let block = consolidated_feedback("DRAFT_A", "FEEDBACK_SEO\n\nFEEDBACK_LEGAL");

        let rewrite = block.find(REWRITE_INSTRUCTION).unwrap();
        let original = block.find(ORIGINAL_DRAFT_MARKER).unwrap();
        let draft = block.find("DRAFT_A").unwrap();
        let heading = block.find(CONSOLIDATED_FEEDBACK_HEADING).unwrap();
        let seo = block.find("FEEDBACK_SEO").unwrap();

        assert!(rewrite < original && original < draft && draft < heading && heading < seo);
        assert!(!block.contains(FINAL_DRAFT_MARKER));
    }

    #[test]
    fn test_final_editor_prompt_names_both_markers() {
        let prompt = final_editor_prompt("BLOCK");

        assert!(prompt.starts_with(persona(AgentRole::FinalEditor)));
        assert!(prompt.contains(ORIGINAL_DRAFT_MARKER));
        assert!(prompt.contains(FINAL_DRAFT_MARKER));
        assert!(prompt.ends_with("BLOCK"));
    }

    #[test]
    fn test_review_manager_prompt_includes_all_feedback() {
        let prompt = review_manager_prompt("DRAFT_A", ["F1", "F2", "F3", "F4"]);

        assert!(prompt.starts_with(persona(AgentRole::ReviewManager)));
        assert!(prompt.contains("DRAFT_A"));
        assert!(prompt.contains("F1\n\nF2\n\nF3\n\nF4"));
    }
}
