//! Runtime configuration model.
//!
//! Values are read once at process start and are immutable afterwards.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7071";
pub const DEFAULT_PROFILE_PATH: &str = "data/profile.json";

/// Configuration for the relay gateway and server.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayConfig {
    /// Master switch for remote completion calls.
    #[serde(default = "default_use_remote")]
    pub use_remote: bool,
    /// Full provider URL, including deployment path and api-version.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Provider secret sent as the `api-key` header.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_profile_path")]
    pub profile_path: PathBuf,
}

fn default_use_remote() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_profile_path() -> PathBuf {
    PathBuf::from(DEFAULT_PROFILE_PATH)
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            use_remote: default_use_remote(),
            endpoint: None,
            api_key: None,
            request_timeout_secs: default_request_timeout_secs(),
            bind_addr: default_bind_addr(),
            profile_path: default_profile_path(),
        }
    }
}

impl RelayConfig {
    /// Provider endpoint and key, when both are present and non-blank.
    pub fn credentials(&self) -> Option<ProviderCredentials<'_>> {
        let endpoint = self.endpoint.as_deref().filter(|v| !v.trim().is_empty())?;
        let api_key = self.api_key.as_deref().filter(|v| !v.trim().is_empty())?;
        Some(ProviderCredentials { endpoint, api_key })
    }

    /// Whether the gateway may attempt a network call at all.
    pub fn remote_enabled(&self) -> bool {
        self.use_remote && self.credentials().is_some()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

// The API key must never reach the logs.
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("use_remote", &self.use_remote)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("bind_addr", &self.bind_addr)
            .field("profile_path", &self.profile_path)
            .finish()
    }
}

/// Borrowed view of a complete provider credential pair.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ProviderCredentials<'a> {
    pub endpoint: &'a str,
    pub api_key: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_requires_switch_and_credentials() {
        let mut config = RelayConfig::default();
        assert!(!config.remote_enabled());

        config.endpoint = Some("https://example.openai.azure.com/chat".into());
        config.api_key = Some("secret".into());
        assert!(config.remote_enabled());

        config.use_remote = false;
        assert!(!config.remote_enabled());
    }

    #[test]
    fn test_blank_key_is_missing() {
        let config = RelayConfig {
            endpoint: Some("https://example.com".into()),
            api_key: Some("   ".into()),
            ..RelayConfig::default()
        };
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = RelayConfig {
            api_key: Some("super-secret".into()),
            ..RelayConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_toml_defaults() {
        let config: RelayConfig = toml::from_str("use_remote = false").unwrap();
        assert!(!config.use_remote);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.bind_addr, "127.0.0.1:7071");
    }
}
