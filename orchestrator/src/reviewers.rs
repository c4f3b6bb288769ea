//! Review aggregation: one feedback per reviewer role for a draft

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use provider::ModelClient;
use shared::stage_info;

use crate::error::OrchestratorResult;
use crate::invoker::invoke;
use crate::prompts;
use crate::types::{AgentRole, Feedback, ReviewFeedback, WorkflowStage};

/// How the four reviewer requests are issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDispatch {
    /// All four in flight at once; results still assembled in fixed order
    #[default]
    Concurrent,
    /// One after another in fixed order
    Sequential,
}

impl FromStr for ReviewDispatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concurrent" | "parallel" => Ok(ReviewDispatch::Concurrent),
            "sequential" => Ok(ReviewDispatch::Sequential),
            _ => Err(format!("Unknown review dispatch '{s}'. Valid options: concurrent, sequential")),
        }
    }
}

/// Collects SEO, legal, ethics and plagiarism feedback for a draft
pub struct ReviewAggregator<'a, C: ?Sized> {
    client: &'a C,
    dispatch: ReviewDispatch,
}

impl<'a, C> ReviewAggregator<'a, C>
where
    C: ModelClient + ?Sized,
{
    pub fn new(client: &'a C, dispatch: ReviewDispatch) -> Self {
        Self { client, dispatch }
    }

    /// Invoke each reviewer exactly once against the same draft.
    ///
    /// The first failure aborts the whole collection.
    pub async fn collect_feedback(&self, draft: &str) -> OrchestratorResult<ReviewFeedback> {
        stage_info!(WorkflowStage::Reviewing, dispatch = ?self.dispatch, "Collecting reviewer feedback");

        let (seo, legal, ethics, plagiarism) = match self.dispatch {
            ReviewDispatch::Concurrent => tokio::try_join!(
                self.review(AgentRole::SeoReviewer, draft),
                self.review(AgentRole::LegalReviewer, draft),
                self.review(AgentRole::EthicsReviewer, draft),
                self.review(AgentRole::PlagiarismChecker, draft),
            )?,
            ReviewDispatch::Sequential => (
                self.review(AgentRole::SeoReviewer, draft).await?,
                self.review(AgentRole::LegalReviewer, draft).await?,
                self.review(AgentRole::EthicsReviewer, draft).await?,
                self.review(AgentRole::PlagiarismChecker, draft).await?,
            ),
        };

        Ok(ReviewFeedback {
            seo,
            legal,
            ethics,
            plagiarism,
        })
    }

    async fn review(&self, role: AgentRole, draft: &str) -> OrchestratorResult<Feedback> {
        let prompt = prompts::reviewer_prompt(role, draft);
        let response = invoke(self.client, WorkflowStage::Reviewing, role, &prompt).await?;

        Ok(Feedback {
            role,
            text: response.content,
            usage: response.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrchestratorError;
    use crate::prompts::persona;
    use provider::{MockModelClient, ModelResponse};
    use shared::{ApiFailure, TokenUsage};
    use std::sync::{Arc, Mutex};

    fn role_of(prompt: &str) -> AgentRole {
        AgentRole::REVIEWERS
            .into_iter()
            .find(|role| prompt.starts_with(persona(*role)))
            .expect("prompt should belong to a reviewer")
    }

    fn echo_client(calls: Arc<Mutex<Vec<AgentRole>>>) -> MockModelClient {
        let mut client = MockModelClient::new();
        client.expect_generate().times(4).returning(move |prompt| {
            let role = role_of(prompt);
            calls.lock().unwrap().push(role);
            Ok(ModelResponse::text(format!("FEEDBACK_{}", role.name())).with_usage(TokenUsage::new(2, 1)))
        });
        client
    }

    #[tokio::test]
    async fn test_concurrent_dispatch_keeps_fixed_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let client = echo_client(calls.clone());

        let feedback = ReviewAggregator::new(&client, ReviewDispatch::Concurrent)
            .collect_feedback("DRAFT_A")
            .await
            .unwrap();

        assert_eq!(feedback.seo.text, "FEEDBACK_SEO_Reviewer");
        assert_eq!(feedback.legal.text, "FEEDBACK_Legal_Reviewer");
        assert_eq!(feedback.ethics.text, "FEEDBACK_Ethics_Reviewer");
        assert_eq!(feedback.plagiarism.text, "FEEDBACK_Plagiarism_Checker");
        assert_eq!(feedback.usage(), TokenUsage::new(8, 4));
        assert_eq!(calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_sequential_dispatch_calls_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let client = echo_client(calls.clone());

        ReviewAggregator::new(&client, ReviewDispatch::Sequential)
            .collect_feedback("DRAFT_A")
            .await
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), AgentRole::REVIEWERS.to_vec());
    }

    #[tokio::test]
    async fn test_every_reviewer_sees_the_same_draft() {
        let mut client = MockModelClient::new();
        client
            .expect_generate()
            .withf(|prompt: &str| prompt.ends_with("\n\nA very long draft"))
            .times(4)
            .returning(|_| Ok(ModelResponse::text("ok")));

        let result = ReviewAggregator::new(&client, ReviewDispatch::Concurrent)
            .collect_feedback("A very long draft")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_sequential_stops_at_first_failure() {
        let mut client = MockModelClient::new();
        client
            .expect_generate()
            .times(2)
            .returning(|prompt| {
                if prompt.starts_with(persona(AgentRole::LegalReviewer)) {
                    Err(ApiFailure::ServiceUnavailable)
                } else {
                    Ok(ModelResponse::text("ok"))
                }
            });

        let error = ReviewAggregator::new(&client, ReviewDispatch::Sequential)
            .collect_feedback("DRAFT_A")
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            OrchestratorError::BackendError { agent: AgentRole::LegalReviewer, stage: WorkflowStage::Reviewing, .. }
        ));
    }

    #[test]
    fn test_dispatch_parsing() {
        assert_eq!("parallel".parse::<ReviewDispatch>().unwrap(), ReviewDispatch::Concurrent);
        assert_eq!("Sequential".parse::<ReviewDispatch>().unwrap(), ReviewDispatch::Sequential);
        assert!("random".parse::<ReviewDispatch>().is_err());
    }
}
