//! Orchestrator-specific error types

use thiserror::Error;
use shared::{ApiFailure, SharedError};
use provider::ProviderError;

use crate::types::{AgentRole, WorkflowStage};

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Invalid task: {message}")]
    InvalidTask { message: String },

    #[error("{stage} stage failed while calling {agent}: {reason}")]
    BackendError {
        stage: WorkflowStage,
        agent: AgentRole,
        reason: ApiFailure,
    },

    #[error("Final editor output does not contain the marker '{marker}'")]
    MarkerMissing { marker: &'static str },

    #[error("Final editor output contains the marker '{marker}' {count} times")]
    MarkerRepeated { marker: &'static str, count: usize },

    #[error("Provider setup failed: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OrchestratorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError { message: message.into() }
    }

    /// True for errors raised before any model call was made
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationError { .. } | Self::InvalidTask { .. } | Self::ProviderError(_) | Self::SharedError(_)
        )
    }

    /// True for failures reported by the model backend
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::BackendError { .. })
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
