//! HTTP client SDK for the ColiVara document retrieval API.
//!
//! This crate provides a typed async client for collections, documents,
//! visual search, embeddings, metadata filtering and webhooks.
//!
//! # Example
//!
//! ```no_run
//! use colivara_client::{ColivaraClient, QueryFilter, Result, SearchRequest, UpsertDocument};
//!
//! # async fn example() -> Result<()> {
//! let client = ColivaraClient::builder()
//!     .api_key("secret")
//!     .build()?;
//!
//! client.collections().create("research", None).await?;
//!
//! client
//!     .documents()
//!     .upsert(
//!         UpsertDocument::new("attention")
//!             .collection("research")
//!             .url("https://arxiv.org/pdf/1706.03762")
//!             .wait(true),
//!     )
//!     .await?;
//!
//! let results = client
//!     .search()
//!     .query(
//!         SearchRequest::new("what is multi-head attention?")
//!             .collection("research")
//!             .filter(QueryFilter::new("year").value(Some(2017.into()))),
//!     )
//!     .await?;
//!
//! for page in results.results {
//!     println!("{} p.{} ({:.2})", page.document_name, page.page_number, page.normalized_score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Collections**: create, get, list, update, delete
//! - **Documents**: upsert (url, base64 or local file), get, list, update, delete
//! - **Search**: text and image queries with optional metadata filters
//! - **Embeddings**: query and image embeddings
//! - **Filter**: metadata lookups over documents or collections
//! - **Webhooks**: registration and signature validation
//! - **Helpers**: file to per-page image conversion
//! - **Health**: service health checks

pub mod api;
pub mod client;
pub mod defaults;
pub mod encode;
pub mod error;
pub mod types;
pub mod webhook;

pub use client::{ClientBuilder, ColivaraClient};
pub use error::{Error, Result};
pub use types::*;
pub use webhook::{SvixVerifier, WebhookError, WebhookVerifier};

pub use api::FilterQuery;
