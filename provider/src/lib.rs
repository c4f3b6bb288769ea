//! Model invocation library for the blog post pipeline
//!
//! This library wraps a single call to a text-generation backend behind the
//! [`ModelClient`] trait: a prompt goes in, the response text comes out.
//! No retries, no streaming.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{ProviderError, ProviderResult};
pub use services::*;
pub use traits::*;
pub use types::*;
