//! Common test utilities and infrastructure
//!
//! Shared fixtures and a scripted mock backend used across the orchestrator
//! test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::TestFixtures;
pub use helpers::{OrchestratorBuilder, TestHelpers, TestOrchestrator};
