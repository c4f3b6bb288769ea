//! Human-readable conversation log of a pipeline run

use serde::{Deserialize, Serialize};

use crate::types::{AgentRole, WorkflowStage};

const FIRST_DRAFT_BANNER: &str = "--------------- FIRST DRAFT ----------------";
const CONSOLIDATED_BANNER: &str = "---------- Consolidated Feedback for Editor ----------";
const FINAL_EDITOR_BANNER: &str = "---------- Final Editor's Output ----------";

/// Separator used when joining entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptFormat {
    /// Blank line between entries
    #[default]
    Text,
    /// `<br><br>` between entries, for HTML/Markdown renderers
    Html,
}

impl TranscriptFormat {
    pub fn separator(&self) -> &'static str {
        match self {
            TranscriptFormat::Text => "\n\n",
            TranscriptFormat::Html => "<br><br>",
        }
    }
}

/// What a transcript entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Draft,
    Feedback,
    Consolidated,
    FinalOutput,
}

/// One stage output as it appears in the log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub stage: WorkflowStage,
    pub agent: Option<AgentRole>,
    pub kind: EntryKind,
    pub content: String,
}

impl TranscriptEntry {
    /// Entry text with its banner, as displayed
    pub fn render(&self) -> String {
        match self.kind {
            EntryKind::Draft => format!("{FIRST_DRAFT_BANNER}\n\n{}", self.content),
            EntryKind::Feedback => self.content.clone(),
            EntryKind::Consolidated => format!("{CONSOLIDATED_BANNER}\n{}", self.content),
            EntryKind::FinalOutput => format!("{FINAL_EDITOR_BANNER}\n\n{}", self.content),
        }
    }
}

/// Ordered stage outputs; append-only for the length of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationLog {
    entries: Vec<TranscriptEntry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_draft(&mut self, draft: &str) {
        self.push(WorkflowStage::Writing, Some(AgentRole::Writer), EntryKind::Draft, draft);
    }

    pub fn record_feedback(&mut self, role: AgentRole, feedback: &str) {
        self.push(WorkflowStage::Reviewing, Some(role), EntryKind::Feedback, feedback);
    }

    pub fn record_consolidated(&mut self, agent: Option<AgentRole>, consolidated: &str) {
        self.push(WorkflowStage::Consolidating, agent, EntryKind::Consolidated, consolidated);
    }

    pub fn record_final_output(&mut self, raw: &str) {
        self.push(WorkflowStage::Editing, Some(AgentRole::FinalEditor), EntryKind::FinalOutput, raw);
    }

    fn push(&mut self, stage: WorkflowStage, agent: Option<AgentRole>, kind: EntryKind, content: &str) {
        self.entries.push(TranscriptEntry {
            stage,
            agent,
            kind,
            content: content.to_string(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries joined with the format's separator
    pub fn render(&self, format: TranscriptFormat) -> String {
        self.entries
            .iter()
            .map(TranscriptEntry::render)
            .collect::<Vec<_>>()
            .join(format.separator())
    }
}
