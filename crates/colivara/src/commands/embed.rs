//! Embed command - query and image embeddings.

use anyhow::Result;
use clap::Args;

use super::{Context, print_json};

/// Arguments for the embed command.
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Queries, image files or base64 images
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Task: query or image
    #[arg(short, long, default_value = "query")]
    pub task: String,
}

/// Run the embed command.
pub async fn run(args: EmbedArgs, ctx: &Context) -> Result<()> {
    let out = ctx
        .client()?
        .embeddings()
        .create(args.inputs, args.task.as_str())
        .await?;

    if ctx.json_output {
        return print_json(&out);
    }

    println!("model: {}", out.model);
    for item in &out.data {
        let dims = item.embedding.first().map(Vec::len).unwrap_or(0);
        println!(
            "  [{}] {} vectors x {} dims",
            item.index,
            item.embedding.len(),
            dims
        );
    }
    println!("tokens: {}", out.usage.total_tokens);
    Ok(())
}
