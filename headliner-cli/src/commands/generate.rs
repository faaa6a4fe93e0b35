//! Generate command - the title generator view
//!
//! One-shot when a context is given on the command line, otherwise an
//! interactive loop: prompt for context, show titles, offer to copy one.
//! Either way the view is gated on a session and watches for sign-out while
//! it is open.

use anyhow::{bail, Result};
use dialoguer::{Input, Select};
use headliner_core::validate_context;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::{login, CommandContext};
use crate::client::TitleClient;
use crate::clipboard::SystemClipboard;
use crate::constants::SPINNER_TICK_MS;
use crate::generator::{GeneratorState, GeneratorView, Notice};
use crate::output::{Output, OutputConfig, Outputter, TableOutput};
use crate::session::SessionSubscription;

/// Rendered result list.
#[derive(Debug, Serialize)]
pub struct TitleList {
    pub titles: Vec<String>,
}

impl Outputter for TitleList {
    fn to_table(&self, config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .titles
            .iter()
            .enumerate()
            .map(|(i, title)| vec![(i + 1).to_string(), title.clone()])
            .collect();
        TableOutput::from_rows(&["#", "Title"], &rows, config)
    }
}

impl From<&[String]> for TitleList {
    fn from(titles: &[String]) -> Self {
        Self {
            titles: titles.to_vec(),
        }
    }
}

/// Parse a 1-based title index.
pub fn parse_title_index(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("title numbers start at 1".to_string());
    }
    Ok(value)
}

/// Run the generate command.
///
/// `copy` is a 1-based index into the result list.
pub async fn run(ctx: &CommandContext, context: Option<String>, copy: Option<usize>) -> Result<()> {
    let interactive = context.is_none();

    let Some(session) = ctx.session.current() else {
        return redirect_to_login(ctx, interactive);
    };

    // Held until the view returns; dropping it unsubscribes.
    let signed_out = Arc::new(AtomicBool::new(false));
    let _subscription = watch_session(ctx, signed_out.clone());

    let client = TitleClient::new(&ctx.server_url, Some(session.access_token));
    let mut view = GeneratorView::new();

    match context {
        Some(context) => {
            view.set_context(context);
            run_once(ctx, &mut view, &client, &signed_out, copy).await
        }
        None => run_interactive(ctx, &mut view, &client, &signed_out).await,
    }
}

fn watch_session(ctx: &CommandContext, signed_out: Arc<AtomicBool>) -> Option<SessionSubscription> {
    let subscription = ctx.session.subscribe(move |session| {
        signed_out.store(session.is_none(), Ordering::SeqCst);
    });
    match subscription {
        Ok(subscription) => Some(subscription),
        Err(e) => {
            warn!("Session changes will not be observed: {}", e);
            None
        }
    }
}

/// Leave the generator for the login view. No request is ever issued from here.
fn redirect_to_login(ctx: &CommandContext, interactive: bool) -> Result<()> {
    if !interactive {
        bail!("Not signed in. Run `headliner login` to continue.");
    }
    eprintln!(
        "{}",
        Notice::destructive("Sign in required", "Redirecting to login.").render()
    );
    login::run(ctx, None, None)
}

async fn run_once(
    ctx: &CommandContext,
    view: &mut GeneratorView,
    client: &TitleClient,
    signed_out: &AtomicBool,
    copy: Option<usize>,
) -> Result<()> {
    if signed_out.load(Ordering::SeqCst) {
        return redirect_to_login(ctx, false);
    }

    let notice = submit_with_spinner(view, client).await;
    if notice.is_destructive() {
        bail!("{}: {}", notice.title, notice.description);
    }
    eprintln!("{}", notice.render());

    Output::new(TitleList::from(view.titles()), ctx.format).render()?;

    if let Some(index) = copy {
        let notice = copy_title(view, index - 1)?;
        eprintln!("{}", notice.render());
    }
    Ok(())
}

async fn run_interactive(
    ctx: &CommandContext,
    view: &mut GeneratorView,
    client: &TitleClient,
    signed_out: &AtomicBool,
) -> Result<()> {
    loop {
        let context: String = Input::new()
            .with_prompt("Describe your newsletter (topic, audience, style, tone)")
            .with_initial_text(view.context())
            .allow_empty(true)
            .interact_text()?;
        view.set_context(context);

        if signed_out.load(Ordering::SeqCst) {
            return redirect_to_login(ctx, true);
        }

        // Rejected locally; ask again without leaving the prompt.
        if let Err(e) = validate_context(view.context()) {
            eprintln!("{}", Notice::destructive("Error", e.to_string()).render());
            continue;
        }

        let notice = submit_with_spinner(view, client).await;
        eprintln!("{}", notice.render());

        if let GeneratorState::Success(titles) = view.state() {
            Output::new(TitleList::from(titles.as_slice()), ctx.format).render()?;
        }

        if !next_step(view)? {
            return Ok(());
        }
    }
}

/// Post-result menu. Returns `false` when the user is done.
fn next_step(view: &GeneratorView) -> Result<bool> {
    loop {
        let mut items = vec!["Generate again", "Quit"];
        if !view.titles().is_empty() {
            items.insert(0, "Copy a title");
        }

        let choice = Select::new()
            .with_prompt("What next?")
            .items(&items)
            .default(0)
            .interact()?;

        match items[choice] {
            "Copy a title" => pick_and_copy(view)?,
            "Generate again" => return Ok(true),
            _ => return Ok(false),
        }
    }
}

fn pick_and_copy(view: &GeneratorView) -> Result<()> {
    let mut items: Vec<&str> = view.titles().iter().map(String::as_str).collect();
    items.push("Done");

    let choice = Select::new()
        .with_prompt("Copy which title?")
        .items(&items)
        .default(0)
        .interact()?;
    if choice == items.len() - 1 {
        return Ok(());
    }

    let notice = match copy_title(view, choice) {
        Ok(notice) => notice,
        Err(e) => Notice::destructive("Error", e.to_string()),
    };
    eprintln!("{}", notice.render());
    Ok(())
}

fn copy_title(view: &GeneratorView, index: usize) -> Result<Notice> {
    let mut clipboard = SystemClipboard::new()?;
    view.copy_title(index, &mut clipboard)
}

async fn submit_with_spinner(view: &mut GeneratorView, client: &TitleClient) -> Notice {
    let spinner = create_spinner();
    let notice = view.submit(client).await;
    spinner.finish_and_clear();
    notice
}

fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message("Generating titles...");
    spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    spinner
}
