//! Error types for archiver invocation operations.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Which timeout bound a subprocess exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    /// The overall wall-clock limit for the whole invocation.
    Overall,
    /// The idle limit: no output was produced for the configured interval.
    Idle,
}

impl std::fmt::Display for TimeoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overall => write!(f, "overall"),
            Self::Idle => write!(f, "idle"),
        }
    }
}

/// Errors that can occur while configuring or running the external archiver.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required source path was not configured before execution.
    #[error("no source path set; call set_source_path() before compress/extract")]
    MissingSource,

    /// A required target path was not configured before execution.
    #[error("no target path set; call set_target_path() before compress/extract")]
    MissingTarget,

    /// No working archiver binary could be resolved.
    #[error("7-Zip executable not found (searched override, $SEVEX_7Z, PATH, vendored layout)")]
    ExecutableNotFound,

    /// The archiver exited with a non-zero status.
    ///
    /// Carries the full command line and both output streams verbatim so
    /// callers can diagnose what the binary rejected.
    #[error("archiver failed: `{command}`\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    Process {
        /// The command line that was executed.
        command: String,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },

    /// The archiver was killed after exceeding a timeout bound.
    #[error("archiver timed out ({kind} limit {limit:?}): `{command}`")]
    Timeout {
        /// The command line that was executed.
        command: String,
        /// Overall or idle bound.
        kind: TimeoutKind,
        /// The configured limit that was exceeded.
        limit: Duration,
    },

    /// A staged temporary artifact could not be created.
    #[error("failed to create staging area under {dir}: {source}")]
    Staging {
        /// Directory the temp area was to be created in.
        dir: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_error_carries_streams() {
        let err = Error::Process {
            command: "7z a out.7z in".to_string(),
            stdout: "partial".to_string(),
            stderr: "E_FAIL".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("7z a out.7z in"));
        assert!(msg.contains("partial"));
        assert!(msg.contains("E_FAIL"));
    }

    #[test]
    fn test_timeout_kind_display() {
        assert_eq!(TimeoutKind::Overall.to_string(), "overall");
        assert_eq!(TimeoutKind::Idle.to_string(), "idle");
    }
}
