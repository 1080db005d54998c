//! CLI command handlers.

pub mod collections;
pub mod config;
pub mod documents;
pub mod embed;
pub mod filter;
pub mod health;
pub mod helpers;
pub mod search;
pub mod webhook;

use anyhow::{Context as _, Result, bail};
use clap::Args;
use colivara_client::{
    ColivaraClient, FilterKey, FilterTarget, LookupOperator, Metadata, QueryFilter,
};
use colivara_config::LoadedConfig;
use console::Style;
use serde::Serialize;

/// Shared context for all commands.
#[derive(Debug)]
pub struct Context {
    /// `--api-key` flag, if given.
    pub api_key: Option<String>,
    /// `--base-url` flag, if given.
    pub base_url: Option<String>,
    /// Merged configuration files.
    pub config: LoadedConfig,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Resolve settings and build an API client.
    pub fn client(&self) -> Result<ColivaraClient> {
        let resolved = colivara_config::resolve_client(
            self.api_key.as_deref(),
            self.base_url.as_deref(),
            &self.config.config,
        )?;
        tracing::debug!(
            base_url = %resolved.base_url,
            key_from = %resolved.api_key_source,
            "resolved client settings"
        );
        Ok(resolved.builder().build()?)
    }
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a green check line.
pub fn success(message: impl std::fmt::Display) {
    let green = Style::new().green();
    println!("{} {}", green.apply_to("✓"), message);
}

/// Parse `--metadata` as a JSON object.
pub fn parse_metadata(raw: Option<&str>) -> Result<Option<Metadata>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_str::<serde_json::Value>(raw).context("metadata must be JSON")? {
        serde_json::Value::Object(map) => Ok(Some(map)),
        _ => bail!("metadata must be a JSON object"),
    }
}

/// Interpret a CLI value as JSON when it parses, else as a plain string.
pub fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

/// Metadata filter flags shared by `search`, `search-image` and `filter`.
#[derive(Args, Debug, Default)]
pub struct FilterOpts {
    /// Metadata key to filter on (repeat for several keys)
    #[arg(long = "key")]
    pub keys: Vec<String>,

    /// Value to compare against (JSON or plain string)
    #[arg(long)]
    pub value: Option<String>,

    /// Lookup operator: key_lookup, contains, contained_by, has_key, has_keys, has_any_keys
    #[arg(long, default_value = "key_lookup")]
    pub lookup: String,

    /// Filter target: document or collection
    #[arg(long, default_value = "document")]
    pub on: String,
}

impl FilterOpts {
    /// Build a filter, or `None` when no key was given.
    pub fn to_filter(&self) -> Result<Option<QueryFilter>> {
        let key = match self.keys.as_slice() {
            [] => return Ok(None),
            [single] => FilterKey::Single(single.clone()),
            many => FilterKey::Many(many.to_vec()),
        };
        let lookup: LookupOperator = self.lookup.parse()?;
        let on: FilterTarget = self.on.parse()?;

        Ok(Some(
            QueryFilter::new(key)
                .on(on)
                .lookup(lookup)
                .value(self.value.as_deref().map(parse_value)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metadata() {
        assert!(parse_metadata(None).unwrap().is_none());
        let map = parse_metadata(Some(r#"{"year": 2017}"#)).unwrap().unwrap();
        assert_eq!(map["year"], 2017);
        assert!(parse_metadata(Some("[1, 2]")).is_err());
        assert!(parse_metadata(Some("{nope")).is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), serde_json::json!(42));
        assert_eq!(parse_value("vaswani"), serde_json::json!("vaswani"));
    }

    #[test]
    fn test_filter_opts() {
        assert!(FilterOpts::default().to_filter().unwrap().is_none());

        let opts = FilterOpts {
            keys: vec!["a".into(), "b".into()],
            value: None,
            lookup: "has_any_keys".into(),
            on: "collection".into(),
        };
        let filter = opts.to_filter().unwrap().unwrap();
        assert_eq!(filter.key, FilterKey::Many(vec!["a".into(), "b".into()]));
        assert_eq!(filter.value, serde_json::json!(""));
        assert_eq!(filter.on, FilterTarget::Collection);

        let bad = FilterOpts {
            keys: vec!["a".into()],
            lookup: "near".into(),
            on: "document".into(),
            value: None,
        };
        assert!(bad.to_filter().is_err());
    }
}
