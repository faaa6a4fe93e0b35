//! Status command - show session state and daemon health

use anyhow::Result;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::CommandContext;
use crate::output::{Output, TableDisplay};

/// What the daemon's `/health` route reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonHealth {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key_configured: bool,
}

/// Status information for the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct StatusInfo {
    pub signed_in: bool,
    pub email: Option<String>,
    pub session_file: String,
    pub server_url: String,
    /// `None` when the daemon could not be reached
    pub daemon: Option<DaemonHealth>,
    /// Recommended next action
    pub next_action: Option<String>,
}

impl TableDisplay for StatusInfo {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        let session = if self.signed_in {
            match &self.email {
                Some(email) => format!("signed in as {}", email).green(),
                None => "signed in".green(),
            }
        } else {
            "signed out".yellow()
        };
        lines.push(format!("  {}: {}", "Session".cyan(), session));
        lines.push(format!("  {}: {}", "Session file".cyan(), self.session_file));
        lines.push(format!("  {}: {}", "Daemon".cyan(), self.server_url));

        match &self.daemon {
            Some(health) => {
                lines.push(format!("  {}: {}", "Health".cyan(), health.status.green()));
                if let Some(model) = &health.model {
                    lines.push(format!("  {}: {}", "Model".cyan(), model));
                }
                let key = if health.api_key_configured {
                    "configured".green()
                } else {
                    "missing".red()
                };
                lines.push(format!("  {}: {}", "API key".cyan(), key));
            }
            None => lines.push(format!("  {}: {}", "Health".cyan(), "unreachable".red())),
        }

        if let Some(next) = &self.next_action {
            lines.push(String::new());
            lines.push(format!("{} {}", "Next:".bold(), next));
        }

        lines.join("\n")
    }
}

async fn check_daemon(server_url: &str) -> Option<DaemonHealth> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
        .ok()?;
    let response = client
        .get(format!("{}/health", server_url))
        .send()
        .await
        .ok()?;
    if !response.status().is_success() {
        return None;
    }
    response.json().await.ok()
}

/// Decide what the user should do next.
fn next_action(signed_in: bool, daemon: Option<&DaemonHealth>) -> Option<String> {
    if !signed_in {
        return Some("headliner login".to_string());
    }
    match daemon {
        None => Some("start the daemon: headliner-daemon".to_string()),
        Some(health) if !health.api_key_configured => {
            Some("set OPENAI_API_KEY for the daemon and restart it".to_string())
        }
        Some(_) => Some("headliner generate \"<what your newsletter is about>\"".to_string()),
    }
}

/// Run the status command
pub async fn run(ctx: &CommandContext) -> Result<()> {
    let session = ctx.session.current();
    let daemon = check_daemon(&ctx.server_url).await;

    let signed_in = session.is_some();

    let info = StatusInfo {
        signed_in,
        email: session.and_then(|s| s.email),
        session_file: ctx.session.path().display().to_string(),
        server_url: ctx.server_url.clone(),
        next_action: next_action(signed_in, daemon.as_ref()),
        daemon,
    };

    Output::new(info, ctx.format).render()
}
