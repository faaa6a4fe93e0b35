//! Command implementations for the Headliner CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod generate;
pub mod login;
pub mod logout;
pub mod status;

use crate::output::OutputFormat;
use crate::session::SessionStore;

/// Settings resolved from flags, environment and config, shared by all commands.
pub struct CommandContext {
    /// Daemon base URL
    pub server_url: String,
    /// Session gate
    pub session: SessionStore,
    /// Output format for results
    pub format: OutputFormat,
}
