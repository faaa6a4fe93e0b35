//! Login command - record a session issued by the auth provider
//!
//! The provider hands out an access token; this command stores it so the
//! generator's session gate opens.

use anyhow::{bail, Result};
use dialoguer::{Input, Password};

use super::CommandContext;
use crate::output::{Output, SuccessMessage};
use crate::session::Session;

/// Run the login command.
///
/// Missing values are prompted for interactively.
pub fn run(ctx: &CommandContext, token: Option<String>, email: Option<String>) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => Password::new().with_prompt("Access token").interact()?,
    };
    if token.trim().is_empty() {
        bail!("Access token must not be empty");
    }

    let email = match email {
        Some(email) => Some(email),
        None if crate::output::is_tty() => {
            let entered: String = Input::new()
                .with_prompt("Email (optional)")
                .allow_empty(true)
                .interact_text()?;
            Some(entered).filter(|e| !e.trim().is_empty())
        }
        None => None,
    };

    let session = Session::new(token.trim(), email);
    ctx.session.save(&session)?;
    tracing::debug!("Session saved to {}", ctx.session.path().display());

    let message = match &session.email {
        Some(email) => format!("Signed in as {}", email),
        None => "Signed in".to_string(),
    };
    Output::new(SuccessMessage::new(message), ctx.format).render()
}
