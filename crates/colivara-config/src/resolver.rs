//! Connection settings resolution.
//!
//! Each setting is taken from the first place it is found: CLI flag,
//! environment variable, merged config file, built-in default.

use std::fmt;
use std::time::Duration;

use colivara_client::defaults::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};

use crate::{ColivaraConfig, ConfigError, Result};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Flag,
    Env,
    ConfigFile,
    Default,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Flag => f.write_str("command-line flag"),
            Source::Env => f.write_str("environment"),
            Source::ConfigFile => f.write_str("config file"),
            Source::Default => f.write_str("default"),
        }
    }
}

/// Fully resolved client settings.
#[derive(Clone)]
pub struct ResolvedClient {
    pub api_key: String,
    pub api_key_source: Source,
    pub base_url: String,
    pub base_url_source: Source,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ResolvedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedClient")
            .field("api_key", &"<redacted>")
            .field("api_key_source", &self.api_key_source)
            .field("base_url", &self.base_url)
            .field("base_url_source", &self.base_url_source)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ResolvedClient {
    /// Build an SDK client from these settings.
    pub fn builder(&self) -> colivara_client::ClientBuilder {
        let mut builder = colivara_client::ColivaraClient::builder()
            .api_key(&self.api_key)
            .base_url(&self.base_url);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }
}

/// Resolve client settings from flags, the process environment and config.
pub fn resolve_client(
    api_key_flag: Option<&str>,
    base_url_flag: Option<&str>,
    config: &ColivaraConfig,
) -> Result<ResolvedClient> {
    resolve_with_env(api_key_flag, base_url_flag, config, |name| {
        std::env::var(name).ok()
    })
}

fn resolve_with_env(
    api_key_flag: Option<&str>,
    base_url_flag: Option<&str>,
    config: &ColivaraConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedClient> {
    let api = config.api.clone().unwrap_or_default();

    let (api_key, api_key_source) = pick(api_key_flag, env(API_KEY_ENV), api.api_key)
        .ok_or_else(|| ConfigError::ApiKeyNotFound {
            env_var: API_KEY_ENV.to_string(),
            file: "config.toml".to_string(),
        })?;

    let (base_url, base_url_source) = pick(base_url_flag, env(BASE_URL_ENV), api.base_url)
        .unwrap_or_else(|| (DEFAULT_BASE_URL.to_string(), Source::Default));

    Ok(ResolvedClient {
        api_key,
        api_key_source,
        base_url,
        base_url_source,
        timeout: api.timeout_secs.map(Duration::from_secs),
    })
}

fn pick(
    flag: Option<&str>,
    env: Option<String>,
    file: Option<String>,
) -> Option<(String, Source)> {
    let non_empty = |v: &String| !v.is_empty();
    flag.map(str::to_string)
        .filter(non_empty)
        .map(|v| (v, Source::Flag))
        .or_else(|| env.filter(non_empty).map(|v| (v, Source::Env)))
        .or_else(|| file.filter(non_empty).map(|v| (v, Source::ConfigFile)))
}
