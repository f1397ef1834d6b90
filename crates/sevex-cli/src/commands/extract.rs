//! Extract command implementation.

use crate::cli::Cli;
use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use std::env;

pub fn execute(cli: &Cli, args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let output_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let mut session = super::build_session(cli)?;
    session
        .set_source_path(&args.archive)
        .set_target_path(&output_dir);

    if let Some(password) = &args.password {
        session.set_password(password);
    }
    if args.no_auto_untar {
        session.set_auto_untar(false);
    }
    if args.delete_source {
        session.set_delete_source_after_extract(true);
    }

    let result = if super::wants_progress_bar(cli) {
        let bar = CliProgress::new("Extracting");
        bar.attach(&mut session);
        session.extract()
    } else {
        session.extract()
    };
    add_archive_context(result, &args.archive)?;

    formatter.format_extract_result(&args.archive, &output_dir)?;

    Ok(())
}
