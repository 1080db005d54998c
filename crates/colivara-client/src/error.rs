//! Client error types.
//!
//! Every failure on the network path (HTTP error status, connection failure,
//! undecodable body) surfaces as [`Error::Api`]. Validation failures raised
//! locally before a request is sent keep their own variants and are never
//! folded into `Api`.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A local file given as document or image content does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// A local file exists but could not be opened for reading.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path that was requested.
        path: String,
    },

    /// Any other failure while reading a local file.
    #[error("Error reading file {path}: {message}")]
    FileReadError {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },

    /// A document upsert carried no url, base64 or path.
    #[error("Either url, base64, or document_path must be provided")]
    MissingDocumentSource,

    /// An image search carried neither a path nor base64 content.
    #[error("Either img_path or img_base64 must be provided")]
    MissingImageSource,

    /// An embedding task name other than "query" or "image".
    #[error("Invalid task: {0}. Must be 'query' or 'image'.")]
    InvalidTask(String),

    /// The remote service or the transport reported a failure.
    #[error("API Error ({}): {message}", display_status(.status))]
    Api {
        /// HTTP status code, absent when no response was received.
        status: Option<u16>,
        /// Server-supplied detail or transport message.
        message: String,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A collection or document name that cannot be addressed in a URL path.
    #[error("Invalid name: {0:?}")]
    InvalidName(String),
}

fn display_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "undefined".to_string(),
    }
}

impl Error {
    /// HTTP status code of an API error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }

    /// True for errors raised before any request was issued.
    pub fn is_client_side(&self) -> bool {
        !matches!(self, Error::Api { .. })
    }

    /// Map a local file read failure onto the file error variants.
    pub(crate) fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::FileNotFound {
                path: path.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path: path.to_string(),
            },
            _ => Error::FileReadError {
                path: path.to_string(),
                message: err.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Api {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the server.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    /// Render the detail as a message; string details are used verbatim.
    pub(crate) fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
