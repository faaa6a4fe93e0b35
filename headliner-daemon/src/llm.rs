//! Upstream chat-completion client.
//!
//! One request per call: no retries, no timeout beyond reqwest's defaults.

use headliner_core::{
    parse_titles, redact_secrets, ChatCompletionRequest, ChatCompletionResponse,
    UpstreamErrorBody,
};
use reqwest::StatusCode;
use tracing::{error, info};

use crate::config::OpenAiSettings;
use crate::error::{GenerateError, Result};

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    /// Create a client. A `None` or blank key makes every request fail fast.
    pub fn new(settings: &OpenAiSettings, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Ask the model for titles about `context` and parse its reply.
    pub async fn generate_titles(&self, context: &str) -> Result<Vec<String>> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("OpenAI API key not found");
            return Err(GenerateError::MissingApiKey);
        };

        let body = ChatCompletionRequest::for_context(&self.model, context);

        info!("Making request to OpenAI API...");
        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let err = classify_upstream_error(status, &text);
            error!("OpenAI API error ({}): {}", status, redact_secrets(&text));
            return Err(err);
        }

        let completion: ChatCompletionResponse = response.json().await?;
        info!("OpenAI response received");

        let content = completion
            .first_content()
            .ok_or(GenerateError::EmptyCompletion)?;
        let titles = parse_titles(content);
        info!(count = titles.len(), "Processed titles");

        Ok(titles)
    }
}

/// Map a non-success upstream reply to an error.
///
/// Quota exhaustion gets its own variant; everything else carries the
/// provider's body (compacted if JSON, redacted either way).
pub fn classify_upstream_error(status: StatusCode, text: &str) -> GenerateError {
    let parsed: UpstreamErrorBody = serde_json::from_str(text).unwrap_or_default();
    if parsed.is_insufficient_quota() {
        return GenerateError::QuotaExceeded;
    }

    let detail = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => value.to_string(),
        Err(_) => text.trim().to_string(),
    };

    GenerateError::Upstream {
        status: status.as_u16(),
        body: redact_secrets(&detail),
    }
}
