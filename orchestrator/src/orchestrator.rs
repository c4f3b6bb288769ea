//! Workflow orchestrator: writer → reviewers → consolidation → final editor
//!
//! The orchestrator owns its model client and runs one task at a time through
//! the linear stage sequence. Each stage's output is appended to the
//! conversation log before the next stage starts; a backend failure anywhere
//! ends the run with no partial result.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::Instrument;

use provider::{ModelClient, RealModelClient};
use shared::{logging, stage_info, stage_warn, ApiKey, ProviderConfig, ProviderId, RequestConfig, RunId, TokenUsage};

use crate::consolidation::{consolidate, Consolidation};
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::extraction::{extract_with_policy, word_count, ExtractionPolicy, MarkerCheck, FINAL_DRAFT_MARKER};
use crate::invoker::invoke;
use crate::prompts;
use crate::reviewers::{ReviewAggregator, ReviewDispatch};
use crate::transcript::{ConversationLog, TranscriptFormat};
use crate::types::{AgentRole, Task, WorkflowOutput, WorkflowStage};

/// Per-run behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    pub dispatch: ReviewDispatch,
    pub consolidation: Consolidation,
    pub extraction: ExtractionPolicy,
    pub transcript_format: TranscriptFormat,
}

/// Runs blog tasks against a model client
pub struct Orchestrator<C: ModelClient> {
    client: C,
    settings: WorkflowSettings,
}

impl<C: ModelClient> Orchestrator<C> {
    pub fn new(client: C, settings: WorkflowSettings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run one task through every stage
    pub async fn run(&self, task: &Task) -> OrchestratorResult<WorkflowOutput> {
        let run_id = RunId::new();
        let span = tracing::info_span!("workflow", run_id = %run_id);
        self.run_stages(run_id, task).instrument(span).await
    }

    async fn run_stages(&self, run_id: RunId, task: &Task) -> OrchestratorResult<WorkflowOutput> {
        let started = Instant::now();
        let mut log = ConversationLog::new();
        let mut usage = TokenUsage::default();

        logging::log_progress(
            "orchestrator",
            "Starting workflow",
            &format!("topic '{}', word limit {}", task.topic(), task.word_limit()),
        );

        let mut stage = WorkflowStage::Writing;
        stage_info!(stage, agent = %AgentRole::Writer, "Drafting");
        let draft = invoke(&self.client, stage, AgentRole::Writer, &prompts::writer_prompt(task)).await?;
        usage += draft.usage;
        let draft = draft.content;
        log.record_draft(&draft);

        stage = advance(stage);
        let feedback = ReviewAggregator::new(&self.client, self.settings.dispatch)
            .collect_feedback(&draft)
            .await?;
        for entry in feedback.iter() {
            log.record_feedback(entry.role, &entry.text);
        }
        usage += feedback.usage();
        stage_info!(stage, tokens = feedback.usage().total(), "Collected feedback from all reviewers");

        stage = advance(stage);
        let consolidated = consolidate(&self.client, self.settings.consolidation, &draft, &feedback).await?;
        log.record_consolidated(consolidated.agent, &consolidated.text);
        usage += consolidated.usage;

        stage = advance(stage);
        stage_info!(stage, agent = %AgentRole::FinalEditor, "Rewriting draft");
        let edited = invoke(
            &self.client,
            stage,
            AgentRole::FinalEditor,
            &prompts::final_editor_prompt(&consolidated.text),
        )
        .await?;
        usage += edited.usage;
        log.record_final_output(&edited.content);

        let (final_post, marker) = extract_with_policy(&edited.content, self.settings.extraction)?;
        match marker {
            MarkerCheck::Single => {}
            MarkerCheck::Missing => {
                stage_warn!(stage, marker = FINAL_DRAFT_MARKER, "Marker missing; using the full editor response");
            }
            MarkerCheck::Repeated { count } => {
                stage_warn!(stage, marker = FINAL_DRAFT_MARKER, count, "Marker repeated; using the last section");
            }
        }

        stage = advance(stage);
        let output = WorkflowOutput {
            run_id,
            task: task.clone(),
            final_post: final_post.to_string(),
            draft_words: word_count(&draft),
            final_words: word_count(final_post),
            conversation_log: log,
            marker,
            usage,
            elapsed_ms: started.elapsed().as_millis() as u64,
            transcript_format: self.settings.transcript_format,
        };

        stage_info!(
            stage,
            draft_words = output.draft_words,
            final_words = output.final_words,
            tokens = output.usage.total(),
            elapsed_ms = output.elapsed_ms,
            "Workflow complete"
        );
        logging::log_success("orchestrator", &format!("Final post ready ({} words)", output.final_words));

        Ok(output)
    }
}

fn advance(stage: WorkflowStage) -> WorkflowStage {
    stage.next().unwrap_or(WorkflowStage::Done)
}

/// Run the whole pipeline with the default provider and settings.
///
/// Returns the final post and the rendered conversation log. The credential
/// is checked before any request is made.
pub async fn run_workflow(topic: &str, word_limit: u32, api_key: &str) -> OrchestratorResult<(String, String)> {
    let api_key = ApiKey::new(api_key)
        .map_err(|_| OrchestratorError::config("API key must not be empty"))?;
    let task = Task::new(topic, word_limit)?;

    let client = RealModelClient::new(
        ProviderConfig::with_default_model(ProviderId::Gemini),
        Some(api_key),
        RequestConfig::default(),
    )?;

    run_workflow_with(client, task.topic(), task.word_limit()).await
}

/// [`run_workflow`] over an already built client, with default settings
pub async fn run_workflow_with<C: ModelClient>(client: C, topic: &str, word_limit: u32) -> OrchestratorResult<(String, String)> {
    let task = Task::new(topic, word_limit)?;
    let output = Orchestrator::new(client, WorkflowSettings::default()).run(&task).await?;
    let transcript = output.transcript();
    Ok((output.final_post, transcript))
}
