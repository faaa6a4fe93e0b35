//! Logout command - drop the stored session

use anyhow::Result;

use super::CommandContext;
use crate::output::{Output, SuccessMessage};

/// Run the logout command.
///
/// Open generator views observe the removal and redirect to login.
pub fn run(ctx: &CommandContext) -> Result<()> {
    let message = if ctx.session.clear()? {
        "Signed out"
    } else {
        "No active session"
    };
    Output::new(SuccessMessage::new(message), ctx.format).render()
}
