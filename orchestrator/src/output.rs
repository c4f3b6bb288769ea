//! Persisting a finished run to disk

use std::path::Path;
use tokio::fs;

use crate::error::OrchestratorResult;
use crate::types::WorkflowOutput;

/// Write the final post as Markdown, or the whole run as pretty JSON.
///
/// Parent directories are created as needed; an existing file is replaced.
pub async fn save_output(path: &Path, output: &WorkflowOutput, as_json: bool) -> OrchestratorResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let contents = if as_json {
        let document = serde_json::json!({
            "saved_at": chrono::Utc::now().to_rfc3339(),
            "output": output,
        });
        serde_json::to_string_pretty(&document)?
    } else {
        format!("# {}\n\n{}\n", output.task.topic(), output.final_post)
    };

    fs::write(path, contents).await?;
    tracing::debug!(path = %path.display(), as_json, "Saved workflow output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::MarkerCheck;
    use crate::transcript::{ConversationLog, TranscriptFormat};
    use crate::types::Task;
    use shared::{RunId, TokenUsage};
    use tempfile::TempDir;

    fn output() -> WorkflowOutput {
        let mut log = ConversationLog::new();
        log.record_draft("DRAFT_A");
        WorkflowOutput {
            run_id: RunId::new(),
            task: Task::new("The Future of Space Exploration", 100).unwrap(),
            final_post: "FINAL_A".to_string(),
            conversation_log: log,
            marker: MarkerCheck::Single,
            draft_words: 1,
            final_words: 1,
            usage: TokenUsage::new(10, 5),
            elapsed_ms: 42,
            transcript_format: TranscriptFormat::Text,
        }
    }

    #[tokio::test]
    async fn test_saves_markdown_post() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("post.md");

        save_output(&path, &output(), false).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# The Future of Space Exploration\n\nFINAL_A\n");
    }

    #[tokio::test]
    async fn test_saves_json_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.json");

        save_output(&path, &output(), true).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["output"]["final_post"], "FINAL_A");
        assert_eq!(value["output"]["marker"]["status"], "single");
        assert_eq!(value["output"]["usage"]["input_tokens"], 10);
        assert!(value["saved_at"].is_string());
    }

    #[tokio::test]
    async fn test_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("post.md");
        std::fs::write(&path, "old contents").unwrap();

        save_output(&path, &output(), false).await.unwrap();

        assert!(!std::fs::read_to_string(&path).unwrap().contains("old contents"));
    }
}
