//! Configuration file types.
//!
//! ```toml
//! [api]
//! base_url = "https://api.colivara.com"
//! api_key = "..."
//! timeout_secs = 120
//!
//! [logging]
//! level = "info"
//! file = true
//! ```

use serde::{Deserialize, Serialize};

use crate::Result;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColivaraConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

/// Connection settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Plaintext key; prefer the `COLIVARA_API_KEY` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Logging settings for the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Console filter directive, e.g. `info` or `colivara_client=debug`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Also write JSON logs to a daily rolling file under the config dir.
    #[serde(default)]
    pub file: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: false,
        }
    }
}

impl ColivaraConfig {
    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge a later layer into this one. Set fields in `other` win.
    pub fn merge(&mut self, other: ColivaraConfig) {
        match (&mut self.api, other.api) {
            (Some(base), Some(layer)) => {
                if layer.base_url.is_some() {
                    base.base_url = layer.base_url;
                }
                if layer.api_key.is_some() {
                    base.api_key = layer.api_key;
                }
                if layer.timeout_secs.is_some() {
                    base.timeout_secs = layer.timeout_secs;
                }
            }
            (None, Some(layer)) => self.api = Some(layer),
            (_, None) => {}
        }

        if other.logging.is_some() {
            self.logging = other.logging;
        }
    }

    /// True when an API key is stored in plaintext.
    pub fn has_plaintext_api_key(&self) -> bool {
        self.api
            .as_ref()
            .and_then(|a| a.api_key.as_deref())
            .is_some_and(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = ColivaraConfig::from_toml(
            r#"
[api]
base_url = "http://localhost:8001"
api_key = "abc"
timeout_secs = 30

[logging]
level = "debug"
file = true
"#,
        )
        .unwrap();

        let api = config.api.as_ref().unwrap();
        assert_eq!(api.base_url.as_deref(), Some("http://localhost:8001"));
        assert_eq!(api.timeout_secs, Some(30));
        assert_eq!(config.logging.as_ref().unwrap().level, "debug");
        assert!(config.has_plaintext_api_key());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = ColivaraConfig::from_toml("").unwrap();
        assert_eq!(config, ColivaraConfig::default());
        assert!(!config.has_plaintext_api_key());
    }

    #[test]
    fn test_logging_defaults() {
        let config = ColivaraConfig::from_toml("[logging]\n").unwrap();
        assert_eq!(config.logging.unwrap(), LoggingConfig::default());
    }

    #[test]
    fn test_merge_field_by_field() {
        let mut base = ColivaraConfig::from_toml(
            r#"
[api]
base_url = "https://api.colivara.com"
api_key = "user-key"
"#,
        )
        .unwrap();
        let layer = ColivaraConfig::from_toml(
            r#"
[api]
base_url = "http://localhost:8001"
"#,
        )
        .unwrap();

        base.merge(layer);
        let api = base.api.unwrap();
        assert_eq!(api.base_url.as_deref(), Some("http://localhost:8001"));
        assert_eq!(api.api_key.as_deref(), Some("user-key"));
    }

    #[test]
    fn test_roundtrip_toml() {
        let config = ColivaraConfig {
            api: Some(ApiConfig {
                base_url: Some("http://localhost:8001".into()),
                ..Default::default()
            }),
            logging: None,
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("[api]"));
        assert_eq!(ColivaraConfig::from_toml(&text).unwrap(), config);
    }
}
