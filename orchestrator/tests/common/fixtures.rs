//! Test fixtures and canned model responses

use orchestrator::{AgentRole, Task};

/// Standard test data
pub struct TestFixtures;

impl TestFixtures {
    pub const TOPIC: &'static str = "The Future of Space Exploration";
    pub const WORD_LIMIT: u32 = 100;

    pub const DRAFT: &'static str = "DRAFT_A";
    pub const FEEDBACK_SEO: &'static str = "**SEO Reviewer:**\n➡️ **Keywords:** add 'space exploration' to the title";
    pub const FEEDBACK_LEGAL: &'static str = "**Legal Reviewer:**\n➡️ **Claims:** cite the launch cost figures";
    pub const FEEDBACK_ETHICS: &'static str = "**Ethical Reviewer:**\n➡️ **Balance:** mention public funding debates";
    pub const FEEDBACK_PLAGIARISM: &'static str = "**Plagiarism Checker:**\n➡️ **Originality:** no copied phrasing found";
    pub const REVIEW_SUMMARY: &'static str = "**Review Manager:**\n➡️ **Summary:** tighten the title and cite sources";

    /// Editor output that follows the labeled format
    pub const LABELED_EDIT: &'static str =
        "--- ORIGINAL DRAFT ---\nDRAFT_A\n--- FINAL REWRITTEN DRAFT ---\nFINAL_A";
    /// Editor output that ignores the format
    pub const UNLABELED_EDIT: &'static str = "JUST_TEXT";

    pub const FINAL_POST: &'static str = "FINAL_A";

    pub fn task() -> Task {
        Task::new(Self::TOPIC, Self::WORD_LIMIT).unwrap()
    }

    /// Canned reply for each role under the happy path
    pub fn reply_for(role: AgentRole) -> &'static str {
        match role {
            AgentRole::Writer => Self::DRAFT,
            AgentRole::SeoReviewer => Self::FEEDBACK_SEO,
            AgentRole::LegalReviewer => Self::FEEDBACK_LEGAL,
            AgentRole::EthicsReviewer => Self::FEEDBACK_ETHICS,
            AgentRole::PlagiarismChecker => Self::FEEDBACK_PLAGIARISM,
            AgentRole::ReviewManager => Self::REVIEW_SUMMARY,
            AgentRole::FinalEditor => Self::LABELED_EDIT,
        }
    }
}
