//! The generator view: context input, one request at a time, rendered titles.
//!
//! State machine:
//!
//! ```text
//! Idle ──submit──▶ Submitting ──ok──▶ Success(titles)
//!                       │
//!                       └──err──▶ Error(message)
//! ```
//!
//! `Success` and `Error` accept a new submission just like `Idle`, and the
//! context stays in place across outcomes. Only `Submitting` refuses.

use colored::Colorize;
use headliner_core::{validate_context, ValidationError};
use thiserror::Error;

use crate::client::{ClientError, TitleClient};
use crate::clipboard::Clipboard;

const FAILURE_FALLBACK: &str = "Failed to generate titles. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorState {
    Idle,
    Submitting,
    Success(Vec<String>),
    Error(String),
}

/// Why a submission did not start.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("A request is already in flight")]
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Default,
    Destructive,
}

/// A short, transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NoticeKind::Destructive,
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.kind == NoticeKind::Destructive
    }

    /// One styled line for the terminal.
    pub fn render(&self) -> String {
        let title = format!("{}:", self.title);
        let title = match self.kind {
            NoticeKind::Default => title.green().bold(),
            NoticeKind::Destructive => title.red().bold(),
        };
        format!("{} {}", title, self.description)
    }

    fn copied() -> Self {
        Self::info("Copied!", "Title copied to clipboard")
    }
}

impl From<&SubmitRejected> for Notice {
    fn from(rejected: &SubmitRejected) -> Self {
        Notice::destructive("Error", rejected.to_string())
    }
}

impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        if err.is_quota() {
            return Notice::destructive(
                "OpenAI API Limit Reached",
                "The OpenAI API quota has been exceeded. Please try again later.",
            );
        }
        Notice::destructive("Error", failure_message(err))
    }
}

fn failure_message(err: &ClientError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FAILURE_FALLBACK.to_string()
    } else {
        message
    }
}

/// View model for one generator screen.
#[derive(Debug, Clone)]
pub struct GeneratorView {
    context: String,
    state: GeneratorState,
    titles: Vec<String>,
}

impl Default for GeneratorView {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorView {
    pub fn new() -> Self {
        Self {
            context: String::new(),
            state: GeneratorState::Idle,
            titles: Vec::new(),
        }
    }

    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn state(&self) -> &GeneratorState {
        &self.state
    }

    /// Titles from the most recent successful request.
    ///
    /// A later failure leaves these in place.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn is_submitting(&self) -> bool {
        self.state == GeneratorState::Submitting
    }

    /// Guard a submission and move to `Submitting`.
    ///
    /// Returns the context to send. Blank context and a pending request are
    /// both refused without touching the state.
    pub fn begin_submit(&mut self) -> Result<String, SubmitRejected> {
        if self.is_submitting() {
            return Err(SubmitRejected::InFlight);
        }
        let context = validate_context(&self.context)?.to_string();
        self.state = GeneratorState::Submitting;
        Ok(context)
    }

    /// Record the outcome of the in-flight request and describe it.
    pub fn complete(&mut self, result: Result<Vec<String>, ClientError>) -> Notice {
        match result {
            Ok(titles) => {
                let notice = Notice::info(
                    "Success",
                    format!("Generated {} newsletter titles for you!", titles.len()),
                );
                self.titles = titles.clone();
                self.state = GeneratorState::Success(titles);
                notice
            }
            Err(err) => {
                tracing::error!(status = ?err.status(), "Error generating titles: {}", err);
                let notice = Notice::from(&err);
                self.state = GeneratorState::Error(notice.description.clone());
                notice
            }
        }
    }

    /// Validate, send, and record the result in one step.
    pub async fn submit(&mut self, client: &TitleClient) -> Notice {
        let context = match self.begin_submit() {
            Ok(context) => context,
            Err(rejected) => return Notice::from(&rejected),
        };
        let result = client.generate(&context).await;
        self.complete(result)
    }

    /// Write the title at `index` (0-based) to `clipboard`.
    pub fn copy_title(&self, index: usize, clipboard: &mut dyn Clipboard) -> anyhow::Result<Notice> {
        let title = self.titles.get(index).ok_or_else(|| {
            anyhow::anyhow!(
                "No title #{} (have {})",
                index + 1,
                self.titles.len()
            )
        })?;
        clipboard.set_text(title)?;
        Ok(Notice::copied())
    }
}
