//! HTTP client for the title daemon.

use headliner_core::{is_quota_message, ErrorResponse, GenerateRequest, GenerateResponse};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

/// Route the daemon serves title requests on.
pub const GENERATE_PATH: &str = "/generate-titles";

/// Failures of a single title request.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The daemon reported upstream quota exhaustion.
    #[error("{message}")]
    QuotaExceeded { message: String },

    /// The daemon answered with any other non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The request never completed or the reply was undecodable.
    #[error("{0}")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    pub fn is_quota(&self) -> bool {
        matches!(self, ClientError::QuotaExceeded { .. })
    }

    /// HTTP status of a non-quota server failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sends `{ context }` to the daemon and returns its titles.
#[derive(Debug, Clone)]
pub struct TitleClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl TitleClient {
    /// `server_url` is the daemon's base URL, e.g. `http://127.0.0.1:9130`.
    pub fn new(server_url: &str, access_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), GENERATE_PATH),
            access_token,
        }
    }

    /// One awaited round trip: no timeout, no retry.
    pub async fn generate(&self, context: &str) -> Result<Vec<String>, ClientError> {
        let mut request = self.http.post(&self.endpoint).json(&GenerateRequest::new(context));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        debug!("POST {}", self.endpoint);
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body: GenerateResponse = response.json().await?;
            return Ok(body.titles);
        }

        let text = response.text().await?;
        Err(classify_failure(status, &text))
    }
}

/// Map a non-success daemon reply to a client error.
///
/// Quota is recognised by status 402 or by the message itself.
fn classify_failure(status: StatusCode, text: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorResponse>(text)
        .map(|body| body.error)
        .unwrap_or_else(|_| text.trim().to_string());

    if status == StatusCode::PAYMENT_REQUIRED || is_quota_message(&message) {
        ClientError::QuotaExceeded { message }
    } else {
        ClientError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_joins_cleanly() {
        let client = TitleClient::new("http://localhost:9130/", None);
        assert_eq!(client.endpoint, "http://localhost:9130/generate-titles");
    }

    #[test]
    fn test_classify_failure() {
        assert!(classify_failure(StatusCode::PAYMENT_REQUIRED, r#"{"error":"x"}"#).is_quota());
        assert!(classify_failure(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"OpenAI API quota exceeded. Please check your billing details or try again later."}"#
        )
        .is_quota());

        match classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "upstream died\n") {
            ClientError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream died");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Serve one response whose body ends before its declared length.
    async fn truncated_body_server(status_line: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\ncontent-type: application/json\r\ncontent-length: 200\r\n\r\n{{\"error\":",
                status_line
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_unreadable_error_body_is_network_failure() {
        let server = truncated_body_server("HTTP/1.1 500 Internal Server Error").await;
        let client = TitleClient::new(&server, None);

        let err = client.generate("x").await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_generate_sends_context_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate-titles"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({ "context": "indie games" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "titles": ["A", "B"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = TitleClient::new(&server.uri(), Some("tok".to_string()));
        let titles = client.generate("indie games").await.unwrap();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_generate_quota_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate-titles"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": "OpenAI API quota exceeded. Please check your billing details or try again later."
            })))
            .mount(&server)
            .await;

        let client = TitleClient::new(&server.uri(), None);
        let err = client.generate("x").await.unwrap_err();
        assert!(err.is_quota());
    }

    #[tokio::test]
    async fn test_generate_server_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate-titles"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "error": "OpenAI API key not configured" })),
            )
            .mount(&server)
            .await;

        let client = TitleClient::new(&server.uri(), None);
        let err = client.generate("x").await.unwrap_err();
        assert!(!err.is_quota());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "OpenAI API key not configured");
    }
}
