//! Single model call with stage/agent attribution

use std::time::Instant;

use provider::{ModelClient, ModelResponse};
use shared::{stage_debug, stage_error};

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::types::{AgentRole, WorkflowStage};

/// Send one prompt on behalf of `agent`.
///
/// Backend failures are wrapped with the stage and agent they happened in and
/// returned as-is; nothing is retried.
pub async fn invoke<C>(client: &C, stage: WorkflowStage, agent: AgentRole, prompt: &str) -> OrchestratorResult<ModelResponse>
where
    C: ModelClient + ?Sized,
{
    stage_debug!(stage, agent = %agent, prompt_chars = prompt.len(), "Invoking model");
    let started = Instant::now();

    match client.generate(prompt).await {
        Ok(response) => {
            stage_debug!(
                stage,
                agent = %agent,
                elapsed_ms = started.elapsed().as_millis() as u64,
                tokens = response.usage.total(),
                response_chars = response.content.len(),
                "Model responded"
            );
            Ok(response)
        }
        Err(reason) => {
            stage_error!(stage, agent = %agent, failure = %reason, "Model invocation failed");
            Err(OrchestratorError::BackendError { stage, agent, reason })
        }
    }
}
