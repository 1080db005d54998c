//! Health command - checks the service.

use anyhow::Result;
use console::{Style, style};

use super::{Context, print_json};

/// Run the health command.
pub async fn run(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let status = client.health().check().await?;

    if ctx.json_output {
        return print_json(&status);
    }

    let dim = Style::new().dim();
    println!();
    println!("{}", style("ColiVara Service Health").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!(
        "  {} {}",
        dim.apply_to("Status:"),
        Style::new().green().apply_to("● healthy")
    );
    println!("  {} {}", dim.apply_to("Server:"), client.base_url());
    if ctx.verbose {
        println!("  {} {}", dim.apply_to("Response:"), status);
    }
    println!();
    Ok(())
}
