use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding [`RegistryConfig::base_url`].
pub const REGISTRY_URL_ENV: &str = "PLATE_CHECKR_REGISTRY_URL";

const DEFAULT_BASE_URL: &str =
    "https://firestore.googleapis.com/v1/projects/informasisamsat/databases/(default)/documents";

/// Root configuration structure, deserialized from `.plate-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Registration database connection.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Batch processing of many plates.
    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Document-store root; region documents live under `nopol/…`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout for the region lookup.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Number of plates looked up concurrently.
    #[serde(default = "default_batch_size")]
    pub size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: default_batch_size(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

fn default_user_agent() -> String {
    format!("plate-checkr/{}", env!("CARGO_PKG_VERSION"))
}

fn default_batch_size() -> usize {
    75
}

impl Config {
    /// Replace the registry URL when the override is set and non-empty.
    pub fn apply_registry_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.registry.base_url = url;
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.plate-checkr/config.toml`
/// 3. `~/.config/plate-checkr/config.toml`
/// 4. Built-in [`Config::default`]
///
/// [`REGISTRY_URL_ENV`] is applied on top of whichever source won.
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    let mut config = read_config(project_path, config_override)?;
    config.apply_registry_url(std::env::var(REGISTRY_URL_ENV).ok());
    Ok(config)
}

fn read_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return parse_file(path);
    }

    let project_config = project_path.join(".plate-checkr").join("config.toml");
    if project_config.exists() {
        return parse_file(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("plate-checkr").join("config.toml");
        if home_config.exists() {
            return parse_file(&home_config);
        }
    }

    Ok(Config::default())
}

fn parse_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.registry.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.registry.timeout_secs, 20);
        assert!(cfg.registry.user_agent.starts_with("plate-checkr/"));
        assert_eq!(cfg.batch.size, 75);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[registry]\ntimeout_secs = 5\n").unwrap();
        let cfg = read_config(Path::new("."), Some(f.path())).unwrap();
        assert_eq!(cfg.registry.timeout_secs, 5);
        assert_eq!(cfg.registry.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.batch.size, 75);
    }

    #[test]
    fn test_project_config_discovered() {
        let dir = TempDir::new().unwrap();
        let cfg_dir = dir.path().join(".plate-checkr");
        std::fs::create_dir(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("config.toml"),
            "[registry]\nbase_url = \"http://localhost:9000/docs\"\n\n[batch]\nsize = 10\n",
        )
        .unwrap();

        let cfg = read_config(dir.path(), None).unwrap();
        assert_eq!(cfg.registry.base_url, "http://localhost:9000/docs");
        assert_eq!(cfg.batch.size, 10);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "[registry]\ntimeout_secs = \"soon\"\n").unwrap();
        assert!(read_config(Path::new("."), Some(f.path())).is_err());
    }

    #[test]
    fn test_registry_url_override() {
        let mut cfg = Config::default();
        cfg.apply_registry_url(Some("  ".to_string()));
        assert_eq!(cfg.registry.base_url, DEFAULT_BASE_URL);
        cfg.apply_registry_url(Some("http://mirror.local".to_string()));
        assert_eq!(cfg.registry.base_url, "http://mirror.local");
        cfg.apply_registry_url(None);
        assert_eq!(cfg.registry.base_url, "http://mirror.local");
    }
}
