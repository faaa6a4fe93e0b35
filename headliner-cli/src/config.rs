//! Headliner CLI configuration loading from `.headlinerrc.toml`.
//!
//! Configuration is optional. Command-line flags and environment variables
//! override anything set here.
//!
//! # Example Configuration
//!
//! ```toml
//! [server]
//! url = "http://127.0.0.1:9130"
//!
//! [output]
//! format = "table"
//! color = true
//!
//! [session]
//! file = "~/.config/headliner/session.json"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_SERVER_URL};

/// Root configuration structure loaded from `.headlinerrc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct HeadlinerConfig {
    /// Where the title daemon lives.
    #[serde(default)]
    pub server: ServerConfig,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Session file location.
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Default)]
pub struct ServerConfig {
    /// Base URL of the daemon, without the route path.
    #[serde(default)]
    pub url: Option<String>,
}

/// Output formatting preferences.
///
/// `--format` overrides `format`.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Valid values: `table`, `json`
    #[serde(default)]
    pub format: Option<String>,

    /// Defaults to auto-detection on the TTY.
    #[serde(default)]
    pub color: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub file: Option<String>,
}

impl HeadlinerConfig {
    /// Load configuration from `.headlinerrc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE_NAME, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE_NAME, e);
                }
            }
        }
        Self::default()
    }

    /// Daemon URL: explicit override, then config, then the built-in default.
    pub fn server_url(&self, cli_override: Option<&str>) -> String {
        cli_override
            .or(self.server.url.as_deref())
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
            .to_string()
    }

    /// Session file: explicit override, then config, then the user config dir.
    ///
    /// A leading `~/` in the configured path expands to the home directory.
    pub fn session_file(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = cli_override {
            return Some(path.to_path_buf());
        }
        if let Some(file) = self.session.file.as_deref() {
            return Some(expand_home(file));
        }
        crate::session::SessionStore::default_path()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
