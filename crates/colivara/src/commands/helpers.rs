//! Helpers command - file conversion.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use super::{Context, print_json};

/// Arguments for the helpers command.
#[derive(Args, Debug)]
pub struct HelpersArgs {
    #[command(subcommand)]
    pub command: HelpersCommand,
}

#[derive(Subcommand, Debug)]
pub enum HelpersCommand {
    /// Render a file into one base64 image per page
    ToImages {
        /// File to convert
        file: PathBuf,
    },
}

/// Run the helpers command.
pub async fn run(args: HelpersArgs, ctx: &Context) -> Result<()> {
    match args.command {
        HelpersCommand::ToImages { file } => {
            let pages = ctx.client()?.helpers().file_to_img_base64(&file).await?;
            if ctx.json_output {
                return print_json(&pages);
            }
            for page in &pages {
                println!(
                    "page {}: {} bytes of base64",
                    page.page_number,
                    page.img_base64.len()
                );
            }
        }
    }
    Ok(())
}
