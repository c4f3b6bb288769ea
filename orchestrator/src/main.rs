//! Command line entry point for the blog post pipeline

use clap::Parser;
use std::path::PathBuf;

use orchestrator::{
    save_output, ConfigOverrides, Consolidation, ExtractionPolicy, Orchestrator, OrchestratorResult,
    ReviewDispatch, Task, TranscriptFormat, WorkflowConfig, WorkflowSettings,
};
use shared::{logging, ProviderId};

/// Write a blog post with a writer, four reviewers and a final editor
#[derive(Parser)]
#[command(name = "blog-writer")]
#[command(about = "Drafts, reviews and edits a blog post with a team of LLM agents")]
pub struct Args {
    /// Topic of the blog post
    #[arg(long)]
    pub topic: String,

    /// Target word limit for the draft
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
    pub word_limit: u32,

    /// Provider (openai, anthropic, gemini, random); defaults to BLOG_PROVIDER or gemini
    #[arg(long)]
    pub provider: Option<ProviderId>,

    /// Model name; defaults to BLOG_MODEL or the provider's default
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature (0.0 to 2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Maximum tokens per response
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Feedback consolidation (concatenate, review-manager)
    #[arg(long, default_value = "concatenate")]
    pub consolidation: Consolidation,

    /// Call the reviewers one after another instead of concurrently
    #[arg(long)]
    pub sequential_reviews: bool,

    /// Fail when the editor output lacks exactly one final draft marker
    #[arg(long)]
    pub strict_marker: bool,

    /// Print only the final post
    #[arg(long)]
    pub hide_conversation: bool,

    /// Join conversation entries with <br><br>
    #[arg(long)]
    pub html: bool,

    /// Print the whole run as JSON
    #[arg(long)]
    pub json: bool,

    /// Save the final post (or the JSON document with --json) to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            provider: self.provider,
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            ..Default::default()
        }
    }

    fn settings(&self) -> WorkflowSettings {
        WorkflowSettings {
            dispatch: if self.sequential_reviews {
                ReviewDispatch::Sequential
            } else {
                ReviewDispatch::Concurrent
            },
            consolidation: self.consolidation,
            extraction: if self.strict_marker {
                ExtractionPolicy::Strict
            } else {
                ExtractionPolicy::Lenient
            },
            transcript_format: if self.html {
                TranscriptFormat::Html
            } else {
                TranscriptFormat::Text
            },
        }
    }
}

#[tokio::main]
async fn main() -> OrchestratorResult<()> {
    let args = Args::parse();
    logging::init_tracing(Some(&args.log_level));

    if let Err(error) = run(&args).await {
        logging::log_error("blog-writer", "Workflow", &error);
        return Err(error);
    }
    Ok(())
}

async fn run(args: &Args) -> OrchestratorResult<()> {
    let config = WorkflowConfig::from_env(&args.overrides())?.with_settings(args.settings());
    logging::log_startup("blog-writer", &format!("blog workflow with {}", config.provider));

    let task = Task::new(args.topic.as_str(), args.word_limit)?;
    let client = config.build_client()?;
    let output = Orchestrator::new(client, config.settings).run(&task).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", output.final_post);
        if !args.hide_conversation {
            println!("\n==================== Conversation ====================\n");
            println!("{}", output.transcript());
        }
    }

    if let Some(path) = &args.output {
        save_output(path, &output, args.json).await?;
        logging::log_success("blog-writer", &format!("Saved output to {}", path.display()));
    }

    Ok(())
}
