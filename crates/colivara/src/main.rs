//! ColiVara - command-line client for the ColiVara document retrieval API.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{collections, config, documents, embed, filter, health, helpers, search, webhook};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// ColiVara - visual document retrieval from the command line
#[derive(Parser)]
#[command(name = "colivara")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// API key (default: COLIVARA_API_KEY, then config file)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL (default: COLIVARA_BASE_URL, then config file, then production)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check service health
    Health,

    /// Manage collections
    Collections(collections::CollectionsArgs),

    /// Manage documents
    Documents(documents::DocumentsArgs),

    /// Search pages by text
    Search(search::SearchArgs),

    /// Search pages with an image
    SearchImage(search::SearchImageArgs),

    /// Generate query or image embeddings
    Embed(embed::EmbedArgs),

    /// Find documents or collections by metadata
    Filter(filter::FilterArgs),

    /// Register and validate webhooks
    Webhook(webhook::WebhookArgs),

    /// File conversion helpers
    Helpers(helpers::HelpersArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = colivara_config::load_config(None)?;
    let logging = loaded.config.logging.clone().unwrap_or_default();

    // Console logs go to stderr so --json output stays clean.
    let filter = console_filter(cli.verbose, &logging.level);

    let file_layer = if logging.file {
        colivara_config::user_config_dir().map(|dir| {
            let appender = tracing_appender::rolling::daily(dir.join("logs"), "colivara.log");
            tracing_appender::non_blocking(appender)
        })
    } else {
        None
    };

    use tracing_subscriber::prelude::*;
    let (file_writer, _guard) = match file_layer {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "colivara=trace,colivara_client=trace,info",
                ))
        }))
        .init();

    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }

    let ctx = commands::Context {
        api_key: cli.api_key,
        base_url: cli.base_url,
        config: loaded,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Health => health::run(&ctx).await,
        Commands::Collections(args) => collections::run(args, &ctx).await,
        Commands::Documents(args) => documents::run(args, &ctx).await,
        Commands::Search(args) => search::run(args, &ctx).await,
        Commands::SearchImage(args) => search::run_image(args, &ctx).await,
        Commands::Embed(args) => embed::run(args, &ctx).await,
        Commands::Filter(args) => filter::run(args, &ctx).await,
        Commands::Webhook(args) => webhook::run(args, &ctx).await,
        Commands::Helpers(args) => helpers::run(args, &ctx).await,
        Commands::Config(args) => config::run(args, &ctx).await,
    }
}

/// Console filter directives.
///
/// A bare level from `[logging] level` applies to the colivara crates, with
/// everything else kept at `warn`; anything else is used as directives.
fn console_filter(verbose: bool, level: &str) -> String {
    if verbose {
        return "colivara=debug,colivara_client=debug,colivara_config=debug,info".to_string();
    }
    match level.trim().parse::<tracing_subscriber::filter::LevelFilter>() {
        Ok(level) => format!(
            "warn,colivara={level},colivara_client={level},colivara_config={level}"
        ),
        Err(_) => format!("warn,{level}"),
    }
}
