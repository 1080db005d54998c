//! Search commands - text and image search.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use colivara_client::defaults::{ALL_COLLECTIONS, DEFAULT_TOP_K};
use colivara_client::{PageOutQuery, SearchImage, SearchRequest};
use console::{Style, style};

use super::{Context, FilterOpts, print_json};

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Collection to search ("all" searches every collection)
    #[arg(short, long, default_value = ALL_COLLECTIONS)]
    pub collection: String,

    /// Number of pages to return
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: u32,

    #[command(flatten)]
    pub filter: FilterOpts,
}

/// Arguments for the search-image command.
#[derive(Args, Debug)]
pub struct SearchImageArgs {
    /// Image file to search with
    #[arg(required_unless_present = "base64")]
    pub image: Option<PathBuf>,

    /// Inline base64 image instead of a file
    #[arg(long, conflicts_with = "image")]
    pub base64: Option<String>,

    /// Collection to search ("all" searches every collection)
    #[arg(short, long, default_value = ALL_COLLECTIONS)]
    pub collection: String,

    /// Number of pages to return
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: u32,

    #[command(flatten)]
    pub filter: FilterOpts,
}

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let mut request = SearchRequest::new(&args.query)
        .collection(args.collection)
        .top_k(args.top_k);
    if let Some(filter) = args.filter.to_filter()? {
        request = request.filter(filter);
    }

    let out = ctx.client()?.search().query(request).await?;
    if ctx.json_output {
        return print_json(&out);
    }
    print_results(&format!("Results for \"{}\"", out.query), &out.results);
    Ok(())
}

/// Run the search-image command.
pub async fn run_image(args: SearchImageArgs, ctx: &Context) -> Result<()> {
    let mut request = match (args.image, args.base64) {
        (Some(path), _) => SearchImage::from_path(path),
        (None, Some(content)) => SearchImage::from_base64(content),
        (None, None) => bail!("an image file or --base64 is required"),
    }
    .collection(args.collection)
    .top_k(args.top_k);
    if let Some(filter) = args.filter.to_filter()? {
        request = request.filter(filter);
    }

    let out = ctx.client()?.search().image(request).await?;
    if ctx.json_output {
        return print_json(&out);
    }
    print_results("Image search results", &out.results);
    Ok(())
}

fn print_results(title: &str, results: &[PageOutQuery]) {
    let dim = Style::new().dim();
    println!("{}", style(title).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
    if results.is_empty() {
        println!("{}", dim.apply_to("No matching pages"));
    }
    for (rank, hit) in results.iter().enumerate() {
        println!(
            "{:>2}. {} / {} {} {}",
            rank + 1,
            hit.collection_name,
            hit.document_name,
            dim.apply_to(format!("p.{}", hit.page_number)),
            dim.apply_to(format!("score {:.3}", hit.normalized_score))
        );
    }
}
