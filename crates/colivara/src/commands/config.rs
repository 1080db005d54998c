//! Config command - configuration management.

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use colivara_config::ColivaraConfig;
use console::{Style, style};

use super::{Context, print_json, success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved connection settings
    Show,

    /// Show which config files were checked and loaded
    Which,

    /// Show the user configuration file path
    Path,

    /// Write settings to the user configuration file
    #[command(arg_required_else_help = true)]
    Set {
        /// API base URL
        #[arg(long)]
        url: Option<String>,

        /// API key (stored in plaintext)
        #[arg(long)]
        key: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Console log level or filter directives
        #[arg(long)]
        level: Option<String>,
    },
}

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();

    match args.command {
        ConfigCommand::Show => {
            let resolved = colivara_config::resolve_client(
                ctx.api_key.as_deref(),
                ctx.base_url.as_deref(),
                &ctx.config.config,
            )?;
            if ctx.json_output {
                return print_json(&serde_json::json!({
                    "base_url": resolved.base_url,
                    "base_url_source": resolved.base_url_source.to_string(),
                    "api_key_source": resolved.api_key_source.to_string(),
                    "timeout_secs": resolved.timeout.map(|t| t.as_secs()),
                }));
            }
            println!("{}", style("Connection").bold());
            println!(
                "  {} {} {}",
                dim.apply_to("Base URL:"),
                resolved.base_url,
                dim.apply_to(format!("({})", resolved.base_url_source))
            );
            println!(
                "  {} set {}",
                dim.apply_to("API key:"),
                dim.apply_to(format!("({})", resolved.api_key_source))
            );
        }
        ConfigCommand::Set {
            url,
            key,
            timeout,
            level,
        } => {
            let path = colivara_config::user_config_path()
                .context("no config directory available")?;
            let mut config = if path.exists() {
                colivara_config::load_config_file(&path)?
            } else {
                ColivaraConfig::default()
            };

            if url.is_some() || key.is_some() || timeout.is_some() {
                let api = config.api.get_or_insert_with(Default::default);
                if url.is_some() {
                    api.base_url = url;
                }
                if key.is_some() {
                    api.api_key = key;
                }
                if timeout.is_some() {
                    api.timeout_secs = timeout;
                }
            }
            if let Some(level) = level {
                config.logging.get_or_insert_with(Default::default).level = level;
            }

            colivara_config::save_config(&config, &path)?;
            if ctx.json_output {
                return print_json(&serde_json::json!({ "path": path }));
            }
            success(format!("Saved {}", path.display()));
            if config.has_plaintext_api_key() {
                println!(
                    "{}",
                    Style::new()
                        .yellow()
                        .apply_to("The API key is stored in plaintext; COLIVARA_API_KEY is safer.")
                );
            }
        }
        ConfigCommand::Which => {
            for source in &ctx.config.sources {
                let marker = if source.loaded { "✓" } else { "·" };
                println!("{} {}", marker, source.path.display());
            }
            for warning in &ctx.config.warnings {
                println!("{} {}", Style::new().yellow().apply_to("!"), warning);
            }
        }
        ConfigCommand::Path => match colivara_config::user_config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", dim.apply_to("No config directory available")),
        },
    }

    Ok(())
}
