//! Error conversion utilities for CLI.
//!
//! Converts sevex-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use sevex_core::Error;
use std::path::Path;

/// Converts a core [`Error`] to a user-friendly anyhow error with context
pub fn convert_core_error(err: Error, archive: &Path) -> anyhow::Error {
    match err {
        Error::Process {
            command,
            stdout: _,
            stderr,
        } => {
            if mentions_wrong_password(&stderr) {
                anyhow!(
                    "Wrong password for '{}'\n\
                     HINT: Pass the correct password with --password.",
                    archive.display()
                )
            } else {
                anyhow!(
                    "7-Zip failed while processing '{}'\n\
                     Command: {command}\n\
                     {stderr}",
                    archive.display()
                )
            }
        }
        Error::Timeout {
            command,
            kind,
            limit,
        } => {
            anyhow!(
                "7-Zip timed out ({kind} limit {limit:?}) while processing '{}'\n\
                 Command: {command}\n\
                 HINT: Raise --timeout / --idle-timeout for large archives.",
                archive.display()
            )
        }
        Error::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
        _ => anyhow::Error::from(err)
            .context(format!("Error processing archive '{}'", archive.display())),
    }
}

fn mentions_wrong_password(text: &str) -> bool {
    text.contains("Wrong password") || (text.contains("password") && text.contains("incorrect"))
}

/// Adds archive context to a core result
pub fn add_archive_context<T>(result: Result<T, Error>, archive: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_core_error(e, archive))
}
