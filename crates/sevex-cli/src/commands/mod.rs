//! CLI command implementations.

pub mod add;
pub mod extract;
pub mod info;
pub mod list;

use crate::cli::Cli;
use anyhow::Result;
use anyhow::anyhow;
use sevex_core::DefaultLocator;
use sevex_core::Session;
use std::time::Duration;

/// Builds a session honoring the global binary override and timeout flags.
pub fn build_session(cli: &Cli) -> Result<Session> {
    let locator = match &cli.bin {
        Some(path) => DefaultLocator::with_override(path.clone()),
        None => DefaultLocator::default(),
    };
    let mut session = Session::with_locator(&locator).map_err(|_| {
        anyhow!(
            "No 7-Zip binary found\n\
             HINT: Install 7-Zip (7zz, 7z, or 7za), set $SEVEX_7Z, or pass --bin <path>."
        )
    })?;
    if let Some(secs) = cli.timeout {
        session.set_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = cli.idle_timeout {
        session.set_idle_timeout(Duration::from_secs(secs));
    }
    Ok(session)
}

/// Whether an interactive progress bar should drive this invocation.
pub fn wants_progress_bar(cli: &Cli) -> bool {
    !cli.quiet && !cli.json && crate::progress::CliProgress::should_show()
}
