//! Turning four reviewer outputs into the single block the editor reads

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use provider::ModelClient;
use shared::{stage_info, TokenUsage};

use crate::error::OrchestratorResult;
use crate::invoker::invoke;
use crate::prompts;
use crate::types::{AgentRole, ReviewFeedback, WorkflowStage};

/// Consolidation strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consolidation {
    /// Verbatim feedback joined in reviewer order; no model call
    #[default]
    Concatenate,
    /// A review manager agent summarizes the feedback first
    ReviewManager,
}

impl FromStr for Consolidation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "concatenate" | "concat" => Ok(Consolidation::Concatenate),
            "review-manager" | "manager" => Ok(Consolidation::ReviewManager),
            _ => Err(format!(
                "Unknown consolidation strategy '{s}'. Valid options: concatenate, review-manager"
            )),
        }
    }
}

/// The editor input plus who produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consolidated {
    pub text: String,
    /// `None` when no model call was involved
    pub agent: Option<AgentRole>,
    pub usage: TokenUsage,
}

/// Reviewer feedback, verbatim, in fixed order, separated by blank lines
pub fn concatenate_feedback(feedback: &ReviewFeedback) -> String {
    feedback
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub async fn consolidate<C>(
    client: &C,
    strategy: Consolidation,
    draft: &str,
    feedback: &ReviewFeedback,
) -> OrchestratorResult<Consolidated>
where
    C: ModelClient + ?Sized,
{
    stage_info!(WorkflowStage::Consolidating, strategy = ?strategy, "Consolidating feedback");

    match strategy {
        Consolidation::Concatenate => Ok(Consolidated {
            text: prompts::consolidated_feedback(draft, &concatenate_feedback(feedback)),
            agent: None,
            usage: TokenUsage::default(),
        }),
        Consolidation::ReviewManager => {
            let prompt = prompts::review_manager_prompt(draft, feedback.iter().map(|f| f.text.as_str()));
            let response = invoke(client, WorkflowStage::Consolidating, AgentRole::ReviewManager, &prompt).await?;

            Ok(Consolidated {
                text: prompts::consolidated_feedback(draft, response.content.trim()),
                agent: Some(AgentRole::ReviewManager),
                usage: response.usage,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ORIGINAL_DRAFT_MARKER;
    use crate::prompts::{persona, CONSOLIDATED_FEEDBACK_HEADING};
    use crate::types::Feedback;
    use provider::{MockModelClient, ModelResponse};

    fn feedback() -> ReviewFeedback {
        let make = |role: AgentRole, text: &str| Feedback {
            role,
            text: text.to_string(),
            usage: TokenUsage::default(),
        };
        ReviewFeedback {
            seo: make(AgentRole::SeoReviewer, "FEEDBACK_SEO"),
            legal: make(AgentRole::LegalReviewer, "FEEDBACK_LEGAL"),
            ethics: make(AgentRole::EthicsReviewer, "FEEDBACK_ETHICS"),
            plagiarism: make(AgentRole::PlagiarismChecker, "FEEDBACK_PLAG"),
        }
    }

    #[test]
    fn test_concatenation_preserves_order() {
        assert_eq!(
            concatenate_feedback(&feedback()),
            "FEEDBACK_SEO\n\nFEEDBACK_LEGAL\n\nFEEDBACK_ETHICS\n\nFEEDBACK_PLAG"
        );
    }

    #[tokio::test]
    async fn test_concatenate_makes_no_model_call() {
        let mut client = MockModelClient::new();
        client.expect_generate().never();

        let consolidated = consolidate(&client, Consolidation::Concatenate, "DRAFT_A", &feedback())
            .await
            .unwrap();

        assert_eq!(consolidated.agent, None);
        assert!(consolidated.text.contains(&format!("{ORIGINAL_DRAFT_MARKER}\n\nDRAFT_A")));
        assert!(consolidated
            .text
            .ends_with(&format!("{CONSOLIDATED_FEEDBACK_HEADING}\n\nFEEDBACK_SEO\n\nFEEDBACK_LEGAL\n\nFEEDBACK_ETHICS\n\nFEEDBACK_PLAG")));
    }

    #[tokio::test]
    async fn test_review_manager_summary_replaces_verbatim_feedback() {
        let mut client = MockModelClient::new();
        client
            .expect_generate()
            .withf(|prompt: &str| prompt.starts_with(persona(AgentRole::ReviewManager)) && prompt.contains("FEEDBACK_PLAG"))
            .times(1)
            .returning(|_| Ok(ModelResponse::text("  SUMMARY  ").with_usage(TokenUsage::new(40, 10))));

        let consolidated = consolidate(&client, Consolidation::ReviewManager, "DRAFT_A", &feedback())
            .await
            .unwrap();

        assert_eq!(consolidated.agent, Some(AgentRole::ReviewManager));
        assert_eq!(consolidated.usage.total(), 50);
        assert!(consolidated.text.ends_with(&format!("{CONSOLIDATED_FEEDBACK_HEADING}\n\nSUMMARY")));
        assert!(!consolidated.text.contains("FEEDBACK_SEO"));
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("review_manager".parse::<Consolidation>().unwrap(), Consolidation::ReviewManager);
        assert_eq!("Concatenate".parse::<Consolidation>().unwrap(), Consolidation::Concatenate);
        assert!("vote".parse::<Consolidation>().is_err());
    }
}
