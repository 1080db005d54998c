//! Config file discovery and layered merging.
//!
//! Resolution order (later overrides earlier):
//! 1. `~/.config/colivara/config.toml` (user config, or `COLIVARA_CONFIG_DIR`)
//! 2. `./colivara.toml` (project-local)
//! 3. Environment variables and CLI flags (see [`crate::resolver`])

use std::path::{Path, PathBuf};

use crate::{ColivaraConfig, ConfigError, Result};

/// Default config filename for project-local config.
const PROJECT_CONFIG_FILE: &str = "colivara.toml";

/// Default config filename within the user config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for config directory resolution.
const APP_NAME: &str = "colivara";

/// Environment variable to override the config directory.
const CONFIG_DIR_ENV: &str = "COLIVARA_CONFIG_DIR";

/// Tracks where each config layer was loaded from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub loaded: bool,
}

/// Result of config discovery and loading.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// The merged configuration.
    pub config: ColivaraConfig,
    /// Sources that were checked, lowest precedence first.
    pub sources: Vec<ConfigSource>,
    /// Warnings generated during loading (e.g. plaintext API keys).
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Get paths of sources that were actually loaded.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.loaded)
            .map(|s| s.path.as_path())
            .collect()
    }
}

/// Load configuration by discovering and merging all config layers.
pub fn load_config(project_dir: Option<&Path>) -> Result<LoadedConfig> {
    load_config_with_options(project_dir, None)
}

/// Load configuration with explicit control over the user config directory.
///
/// `config_dir` overrides both `COLIVARA_CONFIG_DIR` and the platform default.
pub fn load_config_with_options(
    project_dir: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<LoadedConfig> {
    let mut loaded = LoadedConfig::default();

    let user_config_path = match config_dir {
        Some(dir) => Some(dir.join(USER_CONFIG_FILE)),
        None => user_config_path(),
    };
    if let Some(path) = user_config_path {
        load_layer(&mut loaded, &path);
    }

    let project_path = project_dir
        .map(|d| d.join(PROJECT_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));
    load_layer(&mut loaded, &project_path);

    if loaded.config.has_plaintext_api_key() {
        loaded.warnings.push(format!(
            "[api] contains a plaintext API key. \
             Consider setting {} instead.",
            colivara_client::defaults::API_KEY_ENV
        ));
    }

    Ok(loaded)
}

/// Load config from a specific file path (no discovery).
pub fn load_config_file(path: &Path) -> Result<ColivaraConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    ColivaraConfig::from_toml(&contents)
}

/// Save configuration to a file, creating parent directories.
pub fn save_config(config: &ColivaraConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let contents = config.to_toml()?;
    std::fs::write(path, contents).map_err(|e| ConfigError::WriteFile {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Path of the user config file.
pub fn user_config_path() -> Option<PathBuf> {
    user_config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// The user config directory: `COLIVARA_CONFIG_DIR`, else the platform default.
pub fn user_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Merge one file into `loaded`. Missing files are skipped; malformed ones
/// become warnings.
fn load_layer(loaded: &mut LoadedConfig, path: &Path) {
    if !path.is_file() {
        loaded.sources.push(ConfigSource {
            path: path.to_path_buf(),
            loaded: false,
        });
        return;
    }

    let ok = match load_config_file(path) {
        Ok(layer) => {
            loaded.config.merge(layer);
            true
        }
        Err(e) => {
            loaded
                .warnings
                .push(format!("Failed to load {}: {}", path.display(), e));
            false
        }
    };
    loaded.sources.push(ConfigSource {
        path: path.to_path_buf(),
        loaded: ok,
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_file_not_found() {
        let dir = TempDir::new().unwrap();
        let result = load_config_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbroken").unwrap();
        assert!(matches!(load_config_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_no_files() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.config, ColivaraConfig::default());
        assert!(loaded.loaded_from().is_empty());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_project_overrides_user() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            user.path().join("config.toml"),
            "[api]\nbase_url = \"https://api.colivara.com\"\ntimeout_secs = 60\n",
        )
        .unwrap();
        fs::write(
            project.path().join("colivara.toml"),
            "[api]\nbase_url = \"http://localhost:8001\"\n",
        )
        .unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        let api = loaded.config.api.as_ref().unwrap();
        assert_eq!(api.base_url.as_deref(), Some("http://localhost:8001"));
        assert_eq!(api.timeout_secs, Some(60));
        assert_eq!(loaded.loaded_from().len(), 2);
    }

    #[test]
    fn test_plaintext_key_warning() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), "[api]\napi_key = \"k\"\n").unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("COLIVARA_API_KEY"));
    }

    #[test]
    fn test_malformed_config_warns_but_continues() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), "not = [valid").unwrap();

        let loaded = load_config_with_options(Some(project.path()), Some(user.path())).unwrap();
        assert!(loaded.loaded_from().is_empty());
        assert!(loaded.warnings[0].starts_with("Failed to load"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ColivaraConfig {
            api: Some(crate::ApiConfig {
                timeout_secs: Some(5),
                ..Default::default()
            }),
            logging: None,
        };

        save_config(&config, &path).unwrap();
        assert_eq!(load_config_file(&path).unwrap(), config);
    }
}
