//! Documents command - document management.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use colivara_client::defaults::DEFAULT_COLLECTION;
use colivara_client::{DocumentOut, DocumentQuery, PatchDocument, UpsertDocument, UpsertOutcome};
use console::{Style, style};

use super::{Context, parse_metadata, print_json, success};

/// Arguments for the documents command.
#[derive(Args, Debug)]
pub struct DocumentsArgs {
    #[command(subcommand)]
    pub command: DocumentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DocumentsCommand {
    /// Insert or replace a document
    Upsert {
        /// Document name
        name: String,

        /// Target collection
        #[arg(short, long, default_value = DEFAULT_COLLECTION)]
        collection: String,

        /// Remote URL of the document
        #[arg(long, conflicts_with_all = ["file", "base64"])]
        url: Option<String>,

        /// Local file to upload
        #[arg(long, conflicts_with = "base64")]
        file: Option<PathBuf>,

        /// Inline base64 content
        #[arg(long)]
        base64: Option<String>,

        /// Metadata as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,

        /// Wait for processing to finish
        #[arg(long)]
        wait: bool,

        /// Fetch the URL through the service proxy
        #[arg(long)]
        use_proxy: bool,
    },

    /// Show one document
    Get {
        /// Document name
        name: String,

        /// Collection holding the document
        #[arg(short, long, default_value = DEFAULT_COLLECTION)]
        collection: String,

        /// Include rendered pages
        #[arg(long)]
        pages: bool,
    },

    /// List documents of a collection
    List {
        /// Collection to list
        #[arg(short, long, default_value = DEFAULT_COLLECTION)]
        collection: String,

        /// Include rendered pages
        #[arg(long)]
        pages: bool,
    },

    /// Update a document's name, metadata or content
    Update {
        /// Current document name
        name: String,

        /// Collection holding the document
        #[arg(short, long, default_value = DEFAULT_COLLECTION)]
        collection: String,

        /// New name
        #[arg(long)]
        new_name: Option<String>,

        /// Replacement metadata as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,

        /// New remote URL
        #[arg(long)]
        url: Option<String>,

        /// New local file
        #[arg(long)]
        file: Option<PathBuf>,

        /// Fetch the URL through the service proxy
        #[arg(long)]
        use_proxy: bool,
    },

    /// Delete a document
    Delete {
        /// Document name
        name: String,

        /// Collection holding the document
        #[arg(short, long, default_value = DEFAULT_COLLECTION)]
        collection: String,
    },
}

/// Run the documents command.
pub async fn run(args: DocumentsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client()?.documents();

    match args.command {
        DocumentsCommand::Upsert {
            name,
            collection,
            url,
            file,
            base64,
            metadata,
            wait,
            use_proxy,
        } => {
            let mut document = UpsertDocument::new(name)
                .collection(collection)
                .metadata(parse_metadata(metadata.as_deref())?.unwrap_or_default())
                .wait(wait)
                .use_proxy(use_proxy);
            document.url = url;
            document.base64 = base64;
            document.document_path = file;

            let outcome = api.upsert(document).await?;
            if ctx.json_output {
                return print_json(&outcome);
            }
            match outcome {
                UpsertOutcome::Processed(doc) => {
                    success(format!("Document processed: {} ({} pages)", doc.name, doc.num_pages))
                }
                UpsertOutcome::Accepted(msg) => success(msg.detail),
            }
        }
        DocumentsCommand::Get {
            name,
            collection,
            pages,
        } => {
            let mut query = DocumentQuery::collection(collection);
            if pages {
                query = query.with_pages();
            }
            let document = api.get(&name, query).await?;
            if ctx.json_output {
                return print_json(&document);
            }
            print_document(&document);
        }
        DocumentsCommand::List { collection, pages } => {
            let mut query = DocumentQuery::collection(collection);
            if pages {
                query = query.with_pages();
            }
            let documents = api.list(query).await?;
            if ctx.json_output {
                return print_json(&documents);
            }
            let dim = Style::new().dim();
            println!("{}", style("Documents").bold());
            println!("{}", dim.apply_to("─".repeat(50)));
            if documents.is_empty() {
                println!("{}", dim.apply_to("No documents found"));
            }
            for doc in &documents {
                println!(
                    "{} {} {}",
                    dim.apply_to(format!("[{}]", doc.id)),
                    doc.name,
                    dim.apply_to(format!("({} pages)", doc.num_pages))
                );
            }
        }
        DocumentsCommand::Update {
            name,
            collection,
            new_name,
            metadata,
            url,
            file,
            use_proxy,
        } => {
            let patch = PatchDocument {
                collection_name: collection,
                name: new_name,
                metadata: parse_metadata(metadata.as_deref())?,
                url,
                base64: None,
                document_path: file,
                use_proxy,
            };
            let document = api.update(&name, patch).await?;
            if ctx.json_output {
                return print_json(&document);
            }
            success(format!("Document updated: {}", document.name));
        }
        DocumentsCommand::Delete { name, collection } => {
            api.delete(&name, &collection).await?;
            if !ctx.json_output {
                success(format!("Document deleted: {}", name));
            }
        }
    }

    Ok(())
}

fn print_document(doc: &DocumentOut) {
    let dim = Style::new().dim();
    println!("{}", style(&doc.name).bold());
    println!("  {} {}", dim.apply_to("ID:"), doc.id);
    println!("  {} {}", dim.apply_to("Collection:"), doc.collection_name);
    println!("  {} {}", dim.apply_to("Pages:"), doc.num_pages);
    if let Some(url) = &doc.url {
        println!("  {} {}", dim.apply_to("URL:"), url);
    }
    println!(
        "  {} {}",
        dim.apply_to("Metadata:"),
        serde_json::Value::Object(doc.metadata.clone())
    );
    if let Some(pages) = &doc.pages {
        for page in pages {
            println!(
                "    {} {} bytes of image data",
                dim.apply_to(format!("p.{}", page.page_number)),
                page.img_base64.len()
            );
        }
    }
}
