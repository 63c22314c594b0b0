//! Kestrel CLI - Automated pull-request review with a local model
//!
//! Extracts hunks from a pull request's patches, reviews each one with an
//! Ollama-backed engine, and posts the resulting inline comments back to
//! GitHub.

mod commands;

use clap::{Parser, Subcommand};
use kestrel_core::{Config, Secrets};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::ReviewArgs;

/// Kestrel: automated pull-request patch review
#[derive(Parser, Debug)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Ollama endpoint URL (overrides config and env)
    #[arg(long, global = true, env = "KESTREL_OLLAMA_ENDPOINT")]
    endpoint: Option<String>,

    /// Model to use (overrides config and env)
    #[arg(long, global = true, env = "KESTREL_OLLAMA_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Review a pull request and post inline comments
    #[command(visible_alias = "r")]
    Review(ReviewArgs),

    /// Show current configuration
    Config,

    /// Create a secrets file template
    Init,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.endpoint.clone(), cli.model.clone())?;

    if cli.verbose {
        tracing::info!(
            endpoint = %config.engine.endpoint,
            model = %config.engine.model,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("kestrel {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Review(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Config) => {
            println!("Kestrel Configuration");
            println!("=====================");
            println!();
            println!("Engine Settings:");
            println!("  endpoint: {}", config.engine.endpoint);
            println!("  model: {}", config.engine.model);
            println!("  timeout: {:?}", config.engine.timeout);
            println!();
            println!("Review Settings:");
            println!("  max_lines: {}", config.review.max_lines);
            println!("  context_lines: {}", config.review.context_lines);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        Some(Commands::Init) => {
            let path = Secrets::create_template()?;
            println!("Created secrets template at {}", path.display());
            println!("Edit it and add your GitHub token before reviewing.");
        }
        None => {
            println!("Kestrel - Automated pull-request patch review");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
