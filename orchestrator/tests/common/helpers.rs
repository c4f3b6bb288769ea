//! Test helpers and builder patterns for orchestrator tests
//!
//! The mock backend attributes every prompt to its role by the persona line
//! the prompt starts with, answers from a script, and records the calls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use orchestrator::prompts::persona;
use orchestrator::{AgentRole, Consolidation, Orchestrator, ReviewDispatch, WorkflowSettings};
use provider::{MockModelClient, ModelResponse};
use shared::{ApiFailure, TokenUsage};

use super::fixtures::TestFixtures;

const ALL_ROLES: [AgentRole; 7] = [
    AgentRole::Writer,
    AgentRole::SeoReviewer,
    AgentRole::LegalReviewer,
    AgentRole::EthicsReviewer,
    AgentRole::PlagiarismChecker,
    AgentRole::ReviewManager,
    AgentRole::FinalEditor,
];

/// Type alias for an orchestrator backed by the mock client
pub type TestOrchestrator = Orchestrator<MockModelClient>;

/// Calls seen by the mock, in arrival order
pub type CallLog = Arc<Mutex<Vec<(AgentRole, String)>>>;

/// Builder for orchestrators over a scripted mock backend
pub struct OrchestratorBuilder {
    replies: HashMap<AgentRole, String>,
    failures: HashMap<AgentRole, ApiFailure>,
    usage: TokenUsage,
    settings: WorkflowSettings,
    calls: CallLog,
}

impl OrchestratorBuilder {
    /// Happy-path script with default settings
    pub fn new() -> Self {
        Self {
            replies: ALL_ROLES
                .iter()
                .map(|role| (*role, TestFixtures::reply_for(*role).to_string()))
                .collect(),
            failures: HashMap::new(),
            usage: TokenUsage::default(),
            settings: WorkflowSettings::default(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reply(mut self, role: AgentRole, reply: &str) -> Self {
        self.replies.insert(role, reply.to_string());
        self
    }

    pub fn failing_at(mut self, role: AgentRole, failure: ApiFailure) -> Self {
        self.failures.insert(role, failure);
        self
    }

    /// Usage reported with every response
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Handle on the call log, shared with the built mock
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }

    /// The scripted mock on its own
    pub fn build_client(self) -> MockModelClient {
        self.into_parts().0
    }

    pub fn build(self) -> TestOrchestrator {
        let (client, settings) = self.into_parts();
        Orchestrator::new(client, settings)
    }

    fn into_parts(self) -> (MockModelClient, WorkflowSettings) {
        let mut client = MockModelClient::new();
        let Self {
            replies,
            failures,
            usage,
            settings,
            calls,
        } = self;

        client.expect_generate().times(0..).returning(move |prompt| {
            let role = TestHelpers::role_of(prompt);
            calls.lock().unwrap().push((role, prompt.to_string()));

            if let Some(failure) = failures.get(&role) {
                return Err(failure.clone());
            }
            let reply = replies.get(&role).cloned().unwrap_or_default();
            Ok(ModelResponse::text(reply).with_usage(usage))
        });

        (client, settings)
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Role whose persona opens the prompt
    pub fn role_of(prompt: &str) -> AgentRole {
        ALL_ROLES
            .into_iter()
            .find(|role| prompt.starts_with(persona(*role)))
            .unwrap_or_else(|| panic!("Prompt does not start with a known persona: {prompt}"))
    }

    /// Roles in the order they were called
    pub fn roles(calls: &CallLog) -> Vec<AgentRole> {
        calls.lock().unwrap().iter().map(|(role, _)| *role).collect()
    }

    /// Number of calls made for reviewer roles
    pub fn reviewer_calls(calls: &CallLog) -> usize {
        Self::roles(calls).iter().filter(|role| role.is_reviewer()).count()
    }

    /// The prompt sent to `role`, if any
    pub fn prompt_for(calls: &CallLog, role: AgentRole) -> Option<String> {
        calls
            .lock()
            .unwrap()
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, prompt)| prompt.clone())
    }

    pub fn settings_with(dispatch: ReviewDispatch, consolidation: Consolidation) -> WorkflowSettings {
        WorkflowSettings {
            dispatch,
            consolidation,
            ..Default::default()
        }
    }
}
