//! Webhook command - registration and signature checks.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use colivara_client::SvixVerifier;
use colivara_client::webhook::validate_webhook;
use console::Style;

use super::{Context, print_json, success};

/// Arguments for the webhook command.
#[derive(Args, Debug)]
pub struct WebhookArgs {
    #[command(subcommand)]
    pub command: WebhookCommand,
}

#[derive(Subcommand, Debug)]
pub enum WebhookCommand {
    /// Register a webhook endpoint
    Add {
        /// URL that receives deliveries
        url: String,
    },

    /// Check the signature of a received delivery
    Validate {
        /// Secret returned when the webhook was added
        #[arg(long)]
        secret: String,

        /// File holding the raw request body
        #[arg(long)]
        payload: PathBuf,

        /// Delivery header as name=value (repeatable)
        #[arg(long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,
    },
}

fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

/// Run the webhook command.
pub async fn run(args: WebhookArgs, ctx: &Context) -> Result<()> {
    match args.command {
        WebhookCommand::Add { url } => {
            let hook = ctx.client()?.webhooks().add(url).await?;
            if ctx.json_output {
                return print_json(&hook);
            }
            success(format!("Webhook registered: {}", hook.endpoint_id));
            println!(
                "  {} {}",
                Style::new().dim().apply_to("Secret:"),
                hook.webhook_secret
            );
            println!(
                "{}",
                Style::new()
                    .yellow()
                    .apply_to("Store this secret; it is needed to validate deliveries.")
            );
        }
        WebhookCommand::Validate {
            secret,
            payload,
            headers,
        } => {
            let body = std::fs::read_to_string(&payload)
                .with_context(|| format!("reading {}", payload.display()))?;
            let headers: HashMap<String, String> = headers.into_iter().collect();

            // Verification is local; no API key needed.
            let valid = validate_webhook(&SvixVerifier, &secret, &body, &headers);
            if ctx.json_output {
                print_json(&serde_json::json!({ "valid": valid }))?;
            }
            if !valid {
                bail!("webhook signature is not valid");
            }
            if !ctx.json_output {
                success("Webhook signature is valid");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("svix-id=msg_1").unwrap(),
            ("svix-id".to_string(), "msg_1".to_string())
        );
        assert_eq!(
            parse_header("svix-signature = v1,abc=").unwrap().1,
            "v1,abc="
        );
        assert!(parse_header("no-separator").is_err());
    }
}
