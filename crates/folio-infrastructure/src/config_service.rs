//! Configuration service implementation.
//!
//! Builds a [`RelayConfig`] once at startup. Priority, highest first:
//! 1. Environment variables (`FOLIO_*`, `AZURE_OPENAI_*`)
//! 2. `config.toml` (explicit path, or `~/.config/folio/config.toml`)
//! 3. Built-in defaults

use folio_core::{FolioError, RelayConfig, Result};
use std::path::{Path, PathBuf};

use crate::paths::FolioPaths;

pub const ENV_USE_REMOTE: &str = "FOLIO_USE_REMOTE";
pub const ENV_ENDPOINT: &str = "AZURE_OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "AZURE_OPENAI_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "FOLIO_REQUEST_TIMEOUT_SECS";
pub const ENV_BIND_ADDR: &str = "FOLIO_BIND_ADDR";
pub const ENV_PROFILE_PATH: &str = "FOLIO_PROFILE_PATH";

/// Loads relay configuration from file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    config_file: Option<PathBuf>,
    required: bool,
}

impl ConfigService {
    /// Uses the platform default config file location.
    pub fn new() -> Self {
        Self {
            config_file: FolioPaths::config_file(),
            required: false,
        }
    }

    /// Uses an explicit config file. A missing file is an error here,
    /// unlike the default location.
    pub fn with_config_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_file: Some(path.into()),
            required: true,
        }
    }

    /// Loads configuration from the process environment.
    pub fn load(&self) -> Result<RelayConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Loads configuration using `env` as the variable lookup.
    pub fn load_with_env<F>(&self, env: F) -> Result<RelayConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config_file {
            Some(path) => self.read_file(path)?,
            None => RelayConfig::default(),
        };
        apply_env_overrides(&mut config, env)?;

        tracing::info!(
            use_remote = config.use_remote,
            remote_enabled = config.remote_enabled(),
            has_endpoint = config.endpoint.is_some(),
            has_api_key = config.api_key.is_some(),
            timeout_secs = config.request_timeout_secs,
            "Loaded relay configuration"
        );
        Ok(config)
    }

    fn read_file(&self, path: &Path) -> Result<RelayConfig> {
        if !path.exists() {
            if self.required {
                return Err(FolioError::not_found("config file", path.display().to_string()));
            }
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(RelayConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: RelayConfig = toml::from_str(&content)?;
        tracing::debug!("Read config file {}", path.display());
        Ok(config)
    }
}

fn apply_env_overrides<F>(config: &mut RelayConfig, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).map(|value| value.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(value) = lookup(ENV_USE_REMOTE) {
        config.use_remote = parse_bool(ENV_USE_REMOTE, &value)?;
    }
    if let Some(value) = lookup(ENV_ENDPOINT) {
        config.endpoint = Some(value);
    }
    if let Some(value) = lookup(ENV_API_KEY) {
        config.api_key = Some(value);
    }
    if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
        config.request_timeout_secs = value.parse().map_err(|_| {
            FolioError::config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{value}'"))
        })?;
    }
    if let Some(value) = lookup(ENV_BIND_ADDR) {
        config.bind_addr = value;
    }
    if let Some(value) = lookup(ENV_PROFILE_PATH) {
        config.profile_path = PathBuf::from(value);
    }
    Ok(())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FolioError::config(format!(
            "{key} must be a boolean (true/false), got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let service = ConfigService::default();
        let config = service.load_with_env(env_from(&[])).unwrap();
        assert_eq!(config, RelayConfig::default());
        assert!(!config.remote_enabled());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
use_remote = false
endpoint = "https://file.example.com/chat"
request_timeout_secs = 10
"#
        )
        .unwrap();

        let service = ConfigService::with_config_file(file.path());
        let config = service
            .load_with_env(env_from(&[
                (ENV_USE_REMOTE, "true"),
                (ENV_API_KEY, "from-env"),
                (ENV_TIMEOUT_SECS, "15"),
            ]))
            .unwrap();

        assert!(config.use_remote);
        assert_eq!(config.endpoint.as_deref(), Some("https://file.example.com/chat"));
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.request_timeout_secs, 15);
        assert!(config.remote_enabled());
    }

    #[test]
    fn test_invalid_bool_is_config_error() {
        let err = ConfigService::default()
            .load_with_env(env_from(&[(ENV_USE_REMOTE, "maybe")]))
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = ConfigService::default()
            .load_with_env(env_from(&[(ENV_ENDPOINT, "   "), (ENV_BIND_ADDR, "")]))
            .unwrap();
        assert!(config.endpoint.is_none());
        assert_eq!(config.bind_addr, "127.0.0.1:7071");
    }

    #[test]
    fn test_explicit_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::with_config_file(dir.path().join("absent.toml"));
        let err = service.load_with_env(env_from(&[])).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "use_remote = [").unwrap();
        let err = ConfigService::with_config_file(file.path())
            .load_with_env(env_from(&[]))
            .unwrap_err();
        assert!(err.is_serialization());
    }
}
