//! Shared constants for the Headliner CLI.

/// Daemon address used when neither flag, env nor config names one.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:9130";

/// Per-project config file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".headlinerrc.toml";

/// Spinner tick interval in milliseconds.
pub const SPINNER_TICK_MS: u64 = 100;
