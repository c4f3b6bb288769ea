//! Multi-agent blog post pipeline
//!
//! A writer drafts a post on a topic, four reviewers (SEO, legal, ethics,
//! plagiarism) comment on the draft, their feedback is consolidated, and a
//! final editor rewrites the draft. The rewrite is pulled out of the editor's
//! labeled response and returned together with a conversation log of every
//! stage.
//!
//! The model backend is injected through [`provider::ModelClient`], so the
//! whole pipeline runs against a mock in tests.

pub mod config;
pub mod consolidation;
pub mod error;
pub mod extraction;
pub mod invoker;
pub mod orchestrator;
pub mod output;
pub mod prompts;
pub mod reviewers;
pub mod transcript;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigOverrides, WorkflowConfig};
pub use consolidation::Consolidation;
pub use error::{OrchestratorError, OrchestratorResult};
pub use extraction::{extract_final_draft, ExtractionPolicy, MarkerCheck, FINAL_DRAFT_MARKER, ORIGINAL_DRAFT_MARKER};
pub use orchestrator::{run_workflow, run_workflow_with, Orchestrator, WorkflowSettings};
pub use output::save_output;
pub use reviewers::{ReviewAggregator, ReviewDispatch};
pub use transcript::{ConversationLog, TranscriptFormat};
pub use types::{AgentRole, Feedback, ReviewFeedback, Task, WorkflowOutput, WorkflowStage};
