//! Filter command - metadata lookups.

use anyhow::{Result, bail};
use clap::Args;
use colivara_client::{Expand, FilterResults};
use console::{Style, style};

use super::{Context, FilterOpts, print_json};

/// Arguments for the filter command.
#[derive(Args, Debug)]
pub struct FilterArgs {
    #[command(flatten)]
    pub filter: FilterOpts,

    /// Include rendered pages of matching documents
    #[arg(long)]
    pub pages: bool,
}

/// Run the filter command.
pub async fn run(args: FilterArgs, ctx: &Context) -> Result<()> {
    let Some(filter) = args.filter.to_filter()? else {
        bail!("at least one --key is required");
    };
    let expand = args.pages.then_some(Expand::Pages);

    let results = ctx.client()?.filter().query(filter, expand).await?;
    if ctx.json_output {
        return print_json(&results);
    }

    let dim = Style::new().dim();
    println!("{}", style(format!("{} matches", results.len())).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    match results {
        FilterResults::Documents(docs) => {
            for doc in docs {
                println!("{} / {}", doc.collection_name, doc.name);
            }
        }
        FilterResults::Collections(collections) => {
            for c in collections {
                println!("{}", c.name);
            }
        }
    }
    Ok(())
}
