//! Integration tests for the Headliner CLI
//!
//! Drives the `headliner` binary in isolated temp directories. Daemon
//! responses come from a wiremock server.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Utilities
// ============================================================================

fn headliner_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_headliner"))
}

fn session_file(dir: &Path) -> PathBuf {
    dir.join("session").join("session.json")
}

/// Run headliner with the given args, a session file inside `dir` and an
/// unreachable default server.
fn run_headliner(dir: &Path, server: &str, args: &[&str]) -> Output {
    headliner_binary()
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("HEADLINER_SERVER", server)
        .env("HEADLINER_SESSION_FILE", session_file(dir))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute headliner command")
}

fn run_offline(dir: &Path, args: &[&str]) -> Output {
    run_headliner(dir, "http://127.0.0.1:9", args)
}

/// Same as `run_headliner`, off the async runtime so the mock server keeps
/// serving while the binary blocks.
async fn run_against(dir: &Path, server: &MockServer, args: &[&str]) -> Output {
    let dir = dir.to_path_buf();
    let uri = server.uri();
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_headliner(&dir, &uri, &args)
    })
    .await
    .expect("headliner task panicked")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn sign_in(dir: &Path) {
    let output = run_offline(dir, &["login", "--token", "test-token", "--email", "ed@example.com"]);
    assert!(output.status.success(), "login failed: {}", stderr(&output));
}

// ============================================================================
// Session gate
// ============================================================================

#[test]
fn test_generate_without_session_redirects_to_login() {
    let temp = TempDir::new().unwrap();

    let output = run_offline(temp.path(), &["generate", "weekly rust news"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("headliner login"));
}

#[test]
fn test_login_logout_roundtrip() {
    let temp = TempDir::new().unwrap();

    sign_in(temp.path());
    assert!(session_file(temp.path()).exists());

    let output = run_offline(temp.path(), &["logout"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Signed out"));
    assert!(!session_file(temp.path()).exists());

    let output = run_offline(temp.path(), &["logout"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No active session"));
}

#[test]
fn test_login_rejects_blank_token() {
    let temp = TempDir::new().unwrap();

    let output = run_offline(temp.path(), &["login", "--token", "   "]);

    assert!(!output.status.success());
    assert!(!session_file(temp.path()).exists());
}

// ============================================================================
// Generate
// ============================================================================

#[test]
fn test_generate_blank_context_is_rejected_locally() {
    let temp = TempDir::new().unwrap();
    sign_in(temp.path());

    // The server is unreachable, so any request would surface as a
    // network failure instead of the validation notice.
    let output = run_offline(temp.path(), &["generate", "   "]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Please enter some context about your newsletter"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_prints_titles_as_json() {
    let temp = TempDir::new().unwrap();
    sign_in(temp.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-titles"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "titles": ["Rust Weekly Digest", "Borrowed Time", "The Crate Escape"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(
        temp.path(),
        &server,
        &["--format", "json", "generate", "a weekly rust newsletter"],
    )
    .await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["titles"][0], "Rust Weekly Digest");
    assert_eq!(body["titles"].as_array().unwrap().len(), 3);
    assert!(stderr(&output).contains("Generated 3 newsletter titles for you!"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_sends_context_to_daemon() {
    let temp = TempDir::new().unwrap();
    sign_in(temp.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-titles"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "titles": ["One"] })),
        )
        .mount(&server)
        .await;

    let output = run_against(temp.path(), &server, &["generate", "gardening tips"]).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("One"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["context"], "gardening tips");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_quota_exceeded_shows_limit_notice() {
    let temp = TempDir::new().unwrap();
    sign_in(temp.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-titles"))
        .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
            "error": "OpenAI API quota exceeded. Please check your billing details or try again later."
        })))
        .mount(&server)
        .await;

    let output = run_against(temp.path(), &server, &["generate", "travel deals"]).await;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("OpenAI API Limit Reached"));
    assert!(err.contains("The OpenAI API quota has been exceeded. Please try again later."));
    assert!(stdout(&output).is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_generate_server_error_surfaces_message() {
    let temp = TempDir::new().unwrap();
    sign_in(temp.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/generate-titles"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "OpenAI API key not configured"
        })))
        .mount(&server)
        .await;

    let output = run_against(temp.path(), &server, &["generate", "travel deals"]).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("OpenAI API key not configured"));
}

#[test]
fn test_generate_rejects_copy_zero() {
    let temp = TempDir::new().unwrap();
    sign_in(temp.path());

    let output = run_offline(temp.path(), &["generate", "food", "--copy", "0"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("title numbers start at 1"));
}

// ============================================================================
// Misc
// ============================================================================

#[test]
fn test_status_reports_signed_out() {
    let temp = TempDir::new().unwrap();

    let output = run_offline(temp.path(), &["--format", "json", "status"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let body: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["signed_in"], false);
}
