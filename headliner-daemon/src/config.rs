//! Daemon configuration loading from `headliner.toml`.
//!
//! Configuration is optional; the daemon runs with defaults when no file exists.
//! The API key is never read from the file, only from the environment variable
//! the file names.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 9130
//!
//! [openai]
//! api_base = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//! api_key_env = "OPENAI_API_KEY"
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "headliner.toml";

/// Errors raised while reading a config file in strict mode.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration structure.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct DaemonConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Upstream chat-completion provider.
    #[serde(default)]
    pub openai: OpenAiSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9130
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Upstream provider settings.
#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiSettings {
    /// Base URL of an OpenAI-compatible API; `/chat/completions` is appended.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Chat model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable holding the secret key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    headliner_core::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl DaemonConfig {
    /// Load configuration from `path`, falling back to defaults.
    ///
    /// Read and parse failures are logged as warnings, never returned.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }

    /// Load configuration from `path`, reporting read or parse failures.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })
    }

    /// Read the API key from the configured environment variable.
    ///
    /// Unset and blank values both count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.openai.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DaemonConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:9130");
        assert_eq!(config.openai.api_base, "https://api.openai.com/v1");
        assert_eq!(config.openai.model, "gpt-4o-mini");
        assert_eq!(config.openai.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[server]
port = 8080

[openai]
model = "gpt-4o"
"#;
        let config: DaemonConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.openai.model, "gpt-4o");
        assert_eq!(config.openai.api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DaemonConfig::try_load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_file_strict_vs_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[server\nport = ").unwrap();

        assert!(matches!(
            DaemonConfig::try_load(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(DaemonConfig::load(&path).server.port, 9130);
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let mut config = DaemonConfig::default();
        config.openai.api_key_env = "HEADLINER_TEST_BLANK_KEY".to_string();
        std::env::set_var("HEADLINER_TEST_BLANK_KEY", "   ");
        assert_eq!(config.api_key(), None);

        config.openai.api_key_env = "HEADLINER_TEST_UNSET_KEY".to_string();
        assert_eq!(config.api_key(), None);
    }
}
