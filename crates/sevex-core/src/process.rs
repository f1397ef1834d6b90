//! External process execution with streamed output and timeout enforcement.
//!
//! The archiver binary is driven through the [`ProcessRunner`] seam so that
//! tests (and embedders) can substitute their own execution strategy. The
//! default [`StdRunner`] spawns via `std::process`, drains stdout on a reader
//! thread into a bounded-latency channel, and delivers chunks to the caller
//! as they are produced; progress parsing depends on that, not on completion.

use std::io::Read;
use std::process::Command;
use std::process::Stdio;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use crate::error::Error;
use crate::error::Result;
use crate::error::TimeoutKind;

/// Outcome of a finished subprocess.
///
/// A non-zero exit is not an error at this layer: the caller owns the
/// decision (and the context) for raising [`Error::Process`].
#[derive(Debug)]
pub struct RunOutcome {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Complete captured standard output.
    pub stdout: String,
    /// Complete captured standard error.
    pub stderr: String,
}

impl RunOutcome {
    /// Whether the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Execution seam for the external archiver.
pub trait ProcessRunner: Send + Sync {
    /// Runs `argv`, delivering stdout chunks to `on_chunk` as they arrive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] when either bound is exceeded (the process
    /// is killed first) and [`Error::Io`] when spawning fails.
    fn run(
        &self,
        argv: &[String],
        on_chunk: &mut dyn FnMut(&str),
        timeout: Option<Duration>,
        idle_timeout: Option<Duration>,
    ) -> Result<RunOutcome>;
}

/// Renders an argument vector for diagnostics.
#[must_use]
pub fn command_line(argv: &[String]) -> String {
    argv.join(" ")
}

/// Default [`ProcessRunner`] built on `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdRunner;

impl ProcessRunner for StdRunner {
    fn run(
        &self,
        argv: &[String],
        on_chunk: &mut dyn FnMut(&str),
        timeout: Option<Duration>,
        idle_timeout: Option<Duration>,
    ) -> Result<RunOutcome> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "empty argument vector",
            ))
        })?;

        tracing::debug!(command = %command_line(argv), "spawning archiver");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let (tx, rx) = mpsc::channel::<Vec<u8>>();
        let stdout_pipe = child.stdout.take();
        let stdout_reader = thread::spawn(move || {
            let Some(mut pipe) = stdout_pipe else { return };
            let mut buf = [0u8; 8192];
            while let Ok(n) = pipe.read(&mut buf) {
                if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
                    break;
                }
            }
        });
        let stderr_pipe = child.stderr.take();
        let stderr_reader = thread::spawn(move || {
            let mut captured = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut captured);
            }
            captured
        });

        let deadline = timeout.map(|t| Instant::now() + t);
        let mut stdout = String::new();

        loop {
            let overall_left = deadline.map(|d| d.saturating_duration_since(Instant::now()));
            let wait = match (overall_left, idle_timeout) {
                (Some(o), Some(i)) => Some(o.min(i)),
                (Some(o), None) => Some(o),
                (None, Some(i)) => Some(i),
                (None, None) => None,
            };
            let received = match wait {
                Some(limit) => rx.recv_timeout(limit),
                None => rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    on_chunk(&text);
                    stdout.push_str(&text);
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    let overall_hit = deadline.is_some_and(|d| Instant::now() >= d);
                    let (kind, limit) = if overall_hit {
                        (TimeoutKind::Overall, timeout.unwrap_or_default())
                    } else {
                        (TimeoutKind::Idle, idle_timeout.unwrap_or_default())
                    };
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_reader.join();
                    let _ = stderr_reader.join();
                    return Err(Error::Timeout {
                        command: command_line(argv),
                        kind,
                        limit,
                    });
                }
            }
        }

        let status = child.wait()?;
        let _ = stdout_reader.join();
        let stderr = stderr_reader.join().unwrap_or_default();

        Ok(RunOutcome {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    }
}
