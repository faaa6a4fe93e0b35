//! Headliner core - the request/response contract shared by the daemon and the CLI.
//!
//! # Features
//!
//! - **Title parsing**: Turn an LLM's numbered list into an ordered `Vec<String>`
//! - **Prompt construction**: The fixed system/user prompts and the outbound chat body
//! - **Context validation**: The client-side submit guard
//! - **Secret redaction**: Mask credentials before upstream errors are logged or echoed

pub mod prompt;
pub mod redact;
pub mod titles;
pub mod types;
pub mod validate;

pub use prompt::{system_prompt, user_prompt, DEFAULT_MODEL};
pub use redact::redact_secrets;
pub use titles::parse_titles;
pub use types::*;
pub use validate::{validate_context, ValidationError};

/// Message returned to callers when the upstream provider reports `insufficient_quota`.
pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "OpenAI API quota exceeded. Please check your billing details or try again later.";

/// Message surfaced when no API credential is available to the handler.
pub const MISSING_API_KEY_MESSAGE: &str = "OpenAI API key not configured";

/// Check whether an error message describes upstream quota exhaustion.
pub fn is_quota_message(message: &str) -> bool {
    message.to_lowercase().contains("quota exceeded")
}
