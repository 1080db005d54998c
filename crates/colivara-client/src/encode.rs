//! Content encoding for document and image inputs.
//!
//! The API only accepts remote URLs or inline base64. Local files are read
//! here and encoded with the standard padded alphabet before any request is
//! built.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Resolved document content: what goes into the `url` and `base64` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentContent {
    pub url: Option<String>,
    pub base64: Option<String>,
}

/// Base64-encode raw bytes.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Read a local file and base64-encode its contents.
///
/// I/O failures map to [`Error::FileNotFound`], [`Error::PermissionDenied`]
/// or [`Error::FileReadError`].
pub async fn encode_file(path: &Path) -> Result<String> {
    let shown = path.display().to_string();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::from_io(&shown, e))?;
    debug!(path = %shown, bytes = bytes.len(), "encoded local file");
    Ok(encode_bytes(&bytes))
}

/// Resolve the content source of a document.
///
/// A `path` is read and its encoding replaces `base64`. Fails with
/// [`Error::MissingDocumentSource`] when neither a url nor base64 content is
/// left.
pub async fn resolve_document_content(
    url: Option<&str>,
    base64: Option<&str>,
    path: Option<&Path>,
) -> Result<DocumentContent> {
    let base64 = match path {
        Some(path) => Some(encode_file(path).await?),
        None => base64.map(str::to_string),
    };
    let url = url.map(str::to_string);

    if url.is_none() && base64.is_none() {
        return Err(Error::MissingDocumentSource);
    }

    Ok(DocumentContent { url, base64 })
}

/// Resolve image inputs for the image embedding task.
///
/// Each item that names a regular local file is replaced by the file's
/// base64 encoding. Everything else, including paths that cannot be
/// inspected or read, is passed through unchanged as already-encoded
/// content. Output order matches input order.
pub async fn resolve_embedding_image_inputs(items: &[String]) -> Vec<String> {
    join_all(items.iter().map(|item| resolve_image_item(item))).await
}

async fn resolve_image_item(item: &str) -> String {
    let path = Path::new(item);
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => match tokio::fs::read(path).await {
            Ok(bytes) => encode_bytes(&bytes),
            Err(e) => {
                warn!(path = %item, error = %e, "image file unreadable, sending input as-is");
                item.to_string()
            }
        },
        _ => item.to_string(),
    }
}
