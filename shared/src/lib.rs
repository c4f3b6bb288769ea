//! Shared types for the reviewed blog post pipeline
//!
//! Contains the types that cross crate boundaries: provider identity and
//! request configuration, credentials, run identifiers and the failure
//! reasons reported by model backends.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
