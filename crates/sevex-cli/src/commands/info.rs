//! Info command implementation.

use crate::cli::Cli;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut session = super::build_session(cli)?;
    let report = session
        .info()
        .context("failed to query the 7-Zip binary's capability report")?;

    formatter.format_capabilities(&report)?;

    Ok(())
}
