//! Landing view: greets the user and flags a missing credential.

use std::io::Write;

use anyhow::Result;

use crate::constants::SETTINGS_URL;
use crate::context::HostContext;
use crate::orchestrator::Orchestrator;

/// Prints the greeting and the credential status banner.
pub async fn status(
    orchestrator: &Orchestrator,
    ctx: &HostContext,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{}", ctx.greeting())?;

    if orchestrator.credential_status(&ctx.user.id).await {
        writeln!(out, "OpenAI API key found.")?;
    } else {
        writeln!(
            out,
            "[!] API key: to use this app you must add your OpenAI API key to the App settings page."
        )?;
        writeln!(out, "    Take me there: {SETTINGS_URL}")?;
    }

    writeln!(out, "Select a product from the Products catalogue to get started.")?;
    Ok(())
}
