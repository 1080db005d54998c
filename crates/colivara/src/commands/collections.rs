//! Collections command - collection management.

use anyhow::Result;
use clap::{Args, Subcommand};
use colivara_client::PatchCollectionRequest;
use console::{Style, style};

use super::{Context, parse_metadata, print_json, success};

/// Arguments for the collections command.
#[derive(Args, Debug)]
pub struct CollectionsArgs {
    #[command(subcommand)]
    pub command: CollectionsCommand,
}

#[derive(Subcommand, Debug)]
pub enum CollectionsCommand {
    /// List all collections
    List,

    /// Show one collection
    Get {
        /// Collection name
        name: String,
    },

    /// Create a collection
    Create {
        /// Collection name
        name: String,

        /// Metadata as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,
    },

    /// Rename a collection or replace its metadata
    Update {
        /// Current collection name
        name: String,

        /// New name
        #[arg(long)]
        new_name: Option<String>,

        /// Replacement metadata as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,
    },

    /// Delete a collection and its documents
    Delete {
        /// Collection name
        name: String,
    },
}

/// Run the collections command.
pub async fn run(args: CollectionsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client()?.collections();
    let dim = Style::new().dim();

    match args.command {
        CollectionsCommand::List => {
            let collections = api.list().await?;
            if ctx.json_output {
                return print_json(&collections);
            }
            println!("{}", style("Collections").bold());
            println!("{}", dim.apply_to("─".repeat(50)));
            if collections.is_empty() {
                println!("{}", dim.apply_to("No collections found"));
            }
            for c in &collections {
                println!(
                    "{} {} {}",
                    dim.apply_to(format!("[{}]", c.id)),
                    c.name,
                    dim.apply_to(format!("({} documents)", c.num_documents))
                );
            }
        }
        CollectionsCommand::Get { name } => {
            let collection = api.get(&name).await?;
            if ctx.json_output {
                return print_json(&collection);
            }
            println!("{}", style(&collection.name).bold());
            println!("  {} {}", dim.apply_to("ID:"), collection.id);
            println!("  {} {}", dim.apply_to("Documents:"), collection.num_documents);
            println!(
                "  {} {}",
                dim.apply_to("Metadata:"),
                serde_json::Value::Object(collection.metadata)
            );
        }
        CollectionsCommand::Create { name, metadata } => {
            let metadata = parse_metadata(metadata.as_deref())?;
            let collection = api.create(name, metadata).await?;
            if ctx.json_output {
                return print_json(&collection);
            }
            success(format!("Collection created: {}", collection.name));
        }
        CollectionsCommand::Update {
            name,
            new_name,
            metadata,
        } => {
            let request = PatchCollectionRequest {
                name: new_name,
                metadata: parse_metadata(metadata.as_deref())?,
            };
            let collection = api.update(&name, request).await?;
            if ctx.json_output {
                return print_json(&collection);
            }
            success(format!("Collection updated: {}", collection.name));
        }
        CollectionsCommand::Delete { name } => {
            api.delete(&name).await?;
            if !ctx.json_output {
                success(format!("Collection deleted: {}", name));
            }
        }
    }

    Ok(())
}
