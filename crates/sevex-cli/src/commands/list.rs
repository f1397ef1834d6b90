//! List command implementation.

use crate::cli::Cli;
use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;

pub fn execute(cli: &Cli, args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut session = super::build_session(cli)?;
    session.set_source_path(&args.archive);

    if let Some(password) = &args.password {
        session.set_password(password);
    }

    let listing = add_archive_context(session.list(), &args.archive)?;
    formatter.format_listing(&args.archive, &listing)?;

    Ok(())
}
