//! API endpoint implementations.

mod collections;
mod documents;
mod embeddings;
mod filter;
mod health;
mod helpers;
mod search;
mod webhooks;

pub use collections::CollectionsApi;
pub use documents::DocumentsApi;
pub use embeddings::EmbeddingsApi;
pub use filter::{FilterApi, FilterQuery};
pub use health::HealthApi;
pub use helpers::HelpersApi;
pub use search::SearchApi;
pub use webhooks::WebhooksApi;
