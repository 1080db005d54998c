//! Named default values applied when a request leaves a field unset.

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.colivara.com";

/// Collection used by single-collection document operations.
pub const DEFAULT_COLLECTION: &str = "default_collection";

/// Sentinel collection name meaning "every collection of the account".
pub const ALL_COLLECTIONS: &str = "all";

/// Number of results returned by search when not overridden.
pub const DEFAULT_TOP_K: u32 = 3;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "COLIVARA_API_KEY";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "COLIVARA_BASE_URL";
