//! Configuration for the ColiVara command-line client.
//!
//! Provides TOML-based configuration with:
//! - Config file layering (user config dir + project-local `colivara.toml`)
//! - API key and base URL resolution (flag → env var → config file → default)

pub mod discovery;
pub mod error;
pub mod resolver;
pub mod types;

pub use discovery::{
    LoadedConfig, load_config, load_config_file, load_config_with_options, save_config,
    user_config_dir, user_config_path,
};
pub use error::{ConfigError, Result};
pub use resolver::{ResolvedClient, Source, resolve_client};
pub use types::{ApiConfig, ColivaraConfig, LoggingConfig};
