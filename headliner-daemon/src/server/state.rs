//! Shared application state for the server.

use std::time::Instant;

use crate::llm::OpenAiClient;

/// Shared application state.
///
/// Read-only after startup; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    /// Upstream chat-completion client
    pub llm: OpenAiClient,
    /// When the daemon started
    pub start_time: Instant,
}

impl AppState {
    pub fn new(llm: OpenAiClient) -> Self {
        Self {
            llm,
            start_time: Instant::now(),
        }
    }

    /// Seconds since the daemon started.
    pub fn uptime_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
