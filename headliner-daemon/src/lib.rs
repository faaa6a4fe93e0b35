//! Headliner daemon library - the title request handler and its collaborators.
//!
//! This library provides:
//! - HTTP router (`POST /generate-titles`, CORS preflight, health)
//! - Upstream chat-completion client
//! - Configuration loading from `headliner.toml`

pub mod config;
pub mod error;
pub mod llm;
pub mod server;

pub use config::DaemonConfig;
pub use error::GenerateError;
pub use llm::OpenAiClient;
pub use server::{create_router, AppState};
