//! Fixed prompts sent to the chat-completion provider.

/// Model used when no override is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Number of titles the prompts ask for.
pub const REQUESTED_TITLES: usize = 20;

const SYSTEM_PROMPT: &str = "You are a creative newsletter title generator. Generate 20 engaging, creative newsletter titles based on the provided context. Return them as a numbered list, with each title on a new line.";

/// The system instruction. It never varies between requests.
pub fn system_prompt() -> &'static str {
    SYSTEM_PROMPT
}

/// The user message, with the caller's context embedded verbatim.
pub fn user_prompt(context: &str) -> String {
    format!(
        "Generate {} newsletter titles for a newsletter about: {}",
        REQUESTED_TITLES, context
    )
}
