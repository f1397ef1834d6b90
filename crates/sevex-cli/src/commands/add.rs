//! Add command implementation.

use crate::cli::AddArgs;
use crate::cli::Cli;
use crate::cli::Level;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use sevex_core::Recursion;

pub fn execute(cli: &Cli, args: &AddArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let mut session = super::build_session(cli)?;
    session
        .set_format(&args.format)
        .set_source_path(&args.source)
        .set_target_path(&args.archive);

    if let Some(password) = &args.password {
        session.set_password(password);
        if args.plain_names {
            session.set_encrypt_names(false);
        }
    }

    match args.level {
        Some(Level::Fast) => session.faster(),
        Some(Level::Slow) => session.slower(),
        Some(Level::Max) => session.max_compression(),
        Some(Level::Copy) => session.no_compression(),
        None => &mut session,
    };

    if !args.include.is_empty() {
        let patterns: Vec<&str> = args.include.iter().map(String::as_str).collect();
        session.include(&patterns, Recursion::Enabled);
    }
    if !args.exclude.is_empty() {
        let patterns: Vec<&str> = args.exclude.iter().map(String::as_str).collect();
        session.exclude(&patterns, Recursion::Enabled);
    }

    for raw in &args.flags {
        match raw.split_once('=') {
            Some((name, value)) => session.add_flag(name, Some(value)),
            None => session.add_flag(raw.as_str(), None),
        };
    }

    if args.force_tar {
        session.set_force_tar_before(true);
    }
    if args.already_tarred {
        session.set_already_tarred(true);
    }
    if args.no_file_info {
        session.set_keep_file_info_on_tar(false);
    }

    let result = if super::wants_progress_bar(cli) {
        let bar = CliProgress::new("Compressing");
        bar.attach(&mut session);
        session.compress()
    } else {
        session.compress()
    };
    add_archive_context(result, &args.archive)?;

    formatter.format_compress_result(&args.archive)?;

    Ok(())
}
