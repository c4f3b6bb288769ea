//! Final draft extraction from the editor's labeled output
//!
//! The editor is instructed to emit two sections, each introduced by a
//! literal marker line. Nothing guarantees it does; the extraction therefore
//! takes whatever follows the last rewritten-draft marker and falls back to
//! the whole response when the marker is absent.

use serde::{Deserialize, Serialize};

use crate::error::{OrchestratorError, OrchestratorResult};

/// Label that introduces the untouched writer draft
pub const ORIGINAL_DRAFT_MARKER: &str = "--- ORIGINAL DRAFT ---";

/// Label that introduces the editor's rewrite
pub const FINAL_DRAFT_MARKER: &str = "--- FINAL REWRITTEN DRAFT ---";

/// How often the rewritten-draft marker occurs in an editor response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MarkerCheck {
    Single,
    Missing,
    Repeated { count: usize },
}

/// What to do when the marker is not present exactly once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPolicy {
    /// Fall back to the trimmed full response (missing) or the last segment (repeated)
    #[default]
    Lenient,
    /// Reject anything but exactly one marker
    Strict,
}

pub fn inspect_marker(raw: &str) -> MarkerCheck {
    match raw.matches(FINAL_DRAFT_MARKER).count() {
        0 => MarkerCheck::Missing,
        1 => MarkerCheck::Single,
        count => MarkerCheck::Repeated { count },
    }
}

/// Text after the last rewritten-draft marker, trimmed.
///
/// Markers are matched left to right without overlap, the same way
/// [`inspect_marker`] counts them. Without a marker the whole response is
/// returned, trimmed.
pub fn extract_final_draft(raw: &str) -> &str {
    raw.split(FINAL_DRAFT_MARKER).last().unwrap_or(raw).trim()
}

/// Apply a policy to an editor response, returning the post and the marker check
pub fn extract_with_policy(raw: &str, policy: ExtractionPolicy) -> OrchestratorResult<(&str, MarkerCheck)> {
    let check = inspect_marker(raw);

    if policy == ExtractionPolicy::Strict {
        match check {
            MarkerCheck::Single => {}
            MarkerCheck::Missing => {
                return Err(OrchestratorError::MarkerMissing {
                    marker: FINAL_DRAFT_MARKER,
                })
            }
            MarkerCheck::Repeated { count } => {
                return Err(OrchestratorError::MarkerRepeated {
                    marker: FINAL_DRAFT_MARKER,
                    count,
                })
            }
        }
    }

    Ok((extract_final_draft(raw), check))
}

/// Whitespace-separated word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
