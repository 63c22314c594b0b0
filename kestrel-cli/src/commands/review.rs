//! Review command - run the review pipeline against a pull request

use std::sync::Arc;

use clap::Args;
use kestrel_core::review::{PostOutcome, ReviewPipeline};
use kestrel_core::Config;
use kestrel_engine::OllamaEngine;
use kestrel_github::{parse_repo, GitHubClient};

/// Arguments for the review command
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Repository to review, as owner/repo or a GitHub URL
    #[arg(required = true)]
    pub repo: String,

    /// Pull request number
    #[arg(required = true)]
    pub pr: u64,

    /// Emit results as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Skip pulling the model before reviewing
    #[arg(long)]
    pub no_pull: bool,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let repo = parse_repo(&self.repo)?;

        // Credentials and model availability are startup concerns: fail
        // here, before any PR processing begins.
        let host = GitHubClient::new()?;
        host.test_connection(&repo).await?;

        let engine = OllamaEngine::new(&config.engine)?;
        if !self.no_pull {
            engine.ensure_model().await?;
        }

        if verbose {
            let pr = host.get_pull_request(&repo, self.pr).await?;
            tracing::info!(
                number = pr.number,
                title = %pr.title,
                head = %pr.head_branch,
                base = %pr.base_branch,
                "Reviewing pull request"
            );
        }

        let pipeline = ReviewPipeline::new(Arc::new(host), Arc::new(engine))
            .with_window(config.review.clone())
            .with_call_timeout(config.engine.timeout);

        let results = pipeline.review_pull_request(&repo, self.pr).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
            return Ok(());
        }

        if results.is_empty() {
            println!("No comments for {}#{}", repo, self.pr);
            return Ok(());
        }

        let posted = results.iter().filter(|r| r.is_success()).count();
        println!(
            "Review of {}#{}: {} comment(s), {} posted",
            repo,
            self.pr,
            results.len(),
            posted
        );
        println!();

        for result in &results {
            let line = result
                .line
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string());
            match &result.outcome {
                PostOutcome::Success { id } => {
                    println!("  posted  {}:{} (comment {})", result.path, line, id);
                }
                PostOutcome::Error { message } => {
                    println!("  failed  {}:{} ({})", result.path, line, message);
                }
            }
        }

        Ok(())
    }
}
