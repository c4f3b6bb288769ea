//! Pipeline data types: the task, the agent roles, stage identifiers and the
//! values each stage hands to the next.

use serde::{Deserialize, Serialize};
use std::fmt;

use shared::{RunId, TokenUsage};

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::extraction::MarkerCheck;
use crate::transcript::{ConversationLog, TranscriptFormat};

/// Topic plus target word limit. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    topic: String,
    word_limit: u32,
}

impl Task {
    /// Validate and build a task. The topic is trimmed.
    pub fn new(topic: impl Into<String>, word_limit: u32) -> OrchestratorResult<Self> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(OrchestratorError::InvalidTask {
                message: "topic must not be empty".to_string(),
            });
        }
        if word_limit == 0 {
            return Err(OrchestratorError::InvalidTask {
                message: "word limit must be a positive integer".to_string(),
            });
        }
        Ok(Self { topic, word_limit })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn word_limit(&self) -> u32 {
        self.word_limit
    }
}

/// Every role the model is asked to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    Writer,
    SeoReviewer,
    LegalReviewer,
    EthicsReviewer,
    PlagiarismChecker,
    ReviewManager,
    FinalEditor,
}

impl AgentRole {
    /// Reviewer roles in the order their feedback is logged and consolidated
    pub const REVIEWERS: [AgentRole; 4] = [
        AgentRole::SeoReviewer,
        AgentRole::LegalReviewer,
        AgentRole::EthicsReviewer,
        AgentRole::PlagiarismChecker,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AgentRole::Writer => "Draft_Writer",
            AgentRole::SeoReviewer => "SEO_Reviewer",
            AgentRole::LegalReviewer => "Legal_Reviewer",
            AgentRole::EthicsReviewer => "Ethics_Reviewer",
            AgentRole::PlagiarismChecker => "Plagiarism_Checker",
            AgentRole::ReviewManager => "Review_Manager",
            AgentRole::FinalEditor => "Final_Editor",
        }
    }

    pub fn is_reviewer(&self) -> bool {
        Self::REVIEWERS.contains(self)
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Linear pipeline state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowStage {
    Writing,
    Reviewing,
    Consolidating,
    Editing,
    Done,
}

impl WorkflowStage {
    /// The stage that follows this one; `Done` is terminal
    pub fn next(self) -> Option<WorkflowStage> {
        match self {
            WorkflowStage::Writing => Some(WorkflowStage::Reviewing),
            WorkflowStage::Reviewing => Some(WorkflowStage::Consolidating),
            WorkflowStage::Consolidating => Some(WorkflowStage::Editing),
            WorkflowStage::Editing => Some(WorkflowStage::Done),
            WorkflowStage::Done => None,
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::Writing => "Writing",
            WorkflowStage::Reviewing => "Reviewing",
            WorkflowStage::Consolidating => "Consolidating",
            WorkflowStage::Editing => "Editing",
            WorkflowStage::Done => "Done",
        };
        f.write_str(name)
    }
}

/// One reviewer's verbatim output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub role: AgentRole,
    pub text: String,
    pub usage: TokenUsage,
}

/// Feedback from all four reviewers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFeedback {
    pub seo: Feedback,
    pub legal: Feedback,
    pub ethics: Feedback,
    pub plagiarism: Feedback,
}

impl ReviewFeedback {
    /// Feedback in fixed order: SEO, legal, ethics, plagiarism
    pub fn iter(&self) -> impl Iterator<Item = &Feedback> {
        [&self.seo, &self.legal, &self.ethics, &self.plagiarism].into_iter()
    }

    pub fn usage(&self) -> TokenUsage {
        let mut usage = TokenUsage::default();
        for feedback in self.iter() {
            usage += feedback.usage;
        }
        usage
    }
}

/// Everything a finished run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowOutput {
    pub run_id: RunId,
    pub task: Task,
    pub final_post: String,
    pub conversation_log: ConversationLog,
    pub marker: MarkerCheck,
    pub draft_words: usize,
    pub final_words: usize,
    pub usage: TokenUsage,
    pub elapsed_ms: u64,
    pub transcript_format: TranscriptFormat,
}

impl WorkflowOutput {
    /// Transcript rendered with the run's configured separator
    pub fn transcript(&self) -> String {
        self.conversation_log.render(self.transcript_format)
    }
}
