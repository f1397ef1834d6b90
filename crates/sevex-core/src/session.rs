//! Session state: the chainable configuration object behind every operation.
//!
//! A [`Session`] is created once, mutated through chained calls, executed,
//! and automatically reset after a successful top-level compress or extract.
//! It is reusable but never accumulative across operations. Sessions are not
//! meant for concurrent use; parallel callers hold independent Sessions.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::Error;
use crate::error::Result;
use crate::flags::FlagSet;
use crate::format;
use crate::format::DEFAULT_FORMAT;
use crate::format::LevelFamily;
use crate::locate::DefaultLocator;
use crate::locate::ExecutableLocator;
use crate::process::ProcessRunner;
use crate::process::StdRunner;
use crate::progress::ProgressFn;
use crate::progress::ProgressGate;
use crate::progress::progress_fn;

/// Recursion behavior for include/exclude filter switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recursion {
    /// Recurse into subdirectories for every pattern.
    Enabled,
    /// No recursion.
    Disabled,
    /// Recurse only for wildcard patterns.
    WildcardsOnly,
}

/// Switch names owned by the compression-level helpers.
///
/// Each helper removes these before expanding so that a later helper call
/// replaces, never accumulates with, an earlier one.
const LEVEL_FLAGS: &[&str] = &[
    "mmt", "mx", "m0", "mm", "mfb", "mpass", "mmem", "ms", "md", "myx",
];

/// Stateful, chainable configuration for archiver invocations.
pub struct Session {
    pub(crate) executable: PathBuf,
    pub(crate) runner: Arc<dyn ProcessRunner>,
    pub(crate) format: Option<String>,
    pub(crate) source: Option<PathBuf>,
    pub(crate) target: Option<PathBuf>,
    pub(crate) password: Option<String>,
    pub(crate) encrypt_names: Option<bool>,
    pub(crate) flags: FlagSet,
    pub(crate) force_tar_before: bool,
    pub(crate) already_tarred: bool,
    pub(crate) keep_file_info_on_tar: bool,
    pub(crate) auto_untar: bool,
    pub(crate) delete_source_after_extract: bool,
    pub(crate) gate: ProgressGate,
    pub(crate) timeout: Option<Duration>,
    pub(crate) idle_timeout: Option<Duration>,
    pub(crate) last_output: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("executable", &self.executable)
            .field("format", &self.format)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a Session, resolving the archiver binary through the default
    /// discovery chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExecutableNotFound`] when no binary resolves; the
    /// failure is fatal for the instance, not recoverable by configuration.
    pub fn new() -> Result<Self> {
        Self::with_locator(&DefaultLocator::default())
    }

    /// Creates a Session using a caller-supplied locator strategy.
    pub fn with_locator(locator: &dyn ExecutableLocator) -> Result<Self> {
        let executable = locator.locate().ok_or(Error::ExecutableNotFound)?;
        Ok(Self::with_executable(executable))
    }

    /// Creates a Session around an explicit, trusted binary path.
    #[must_use]
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            runner: Arc::new(StdRunner),
            format: None,
            source: None,
            target: None,
            password: None,
            encrypt_names: None,
            flags: FlagSet::new(),
            force_tar_before: false,
            already_tarred: false,
            keep_file_info_on_tar: true,
            auto_untar: true,
            delete_source_after_extract: false,
            gate: ProgressGate::default(),
            timeout: None,
            idle_timeout: None,
            last_output: String::new(),
        }
    }

    /// Substitutes the process execution strategy (test seam).
    pub fn set_runner(&mut self, runner: Arc<dyn ProcessRunner>) -> &mut Self {
        self.runner = runner;
        self
    }

    /// Overrides the resolved archiver path.
    pub fn set_executable_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.executable = path.into();
        self
    }

    /// Path of the archiver binary this Session invokes.
    #[must_use]
    pub fn executable_path(&self) -> &Path {
        &self.executable
    }

    /// Selects the archive format.
    ///
    /// Format-derived default switches are resolved at execution time, so a
    /// format change after other settings still produces consistent output.
    pub fn set_format(&mut self, name: impl Into<String>) -> &mut Self {
        self.format = Some(name.into());
        self
    }

    /// The configured format, or the default when unset.
    #[must_use]
    pub fn format(&self) -> &str {
        self.format.as_deref().unwrap_or(DEFAULT_FORMAT)
    }

    /// Sets the path to compress from / extract from.
    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.source = Some(path.into());
        self
    }

    /// The configured source path, if any.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Sets the archive path to create / directory to extract into.
    pub fn set_target_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.target = Some(path.into());
        self
    }

    /// The configured target path, if any.
    #[must_use]
    pub fn target_path(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    /// Sets the password. Encryption switches are injected at execution
    /// time, not here.
    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.password = Some(password.into());
        self
    }

    /// The configured password, if any.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Controls filename/header encryption. `None` restores the default
    /// (enabled). Realized per format: zip cannot encrypt names.
    pub fn set_encrypt_names(&mut self, value: impl Into<Option<bool>>) -> &mut Self {
        self.encrypt_names = value.into();
        self
    }

    /// Whether filename encryption is enabled (defaults to `true`).
    #[must_use]
    pub fn encrypt_names(&self) -> bool {
        self.encrypt_names.unwrap_or(true)
    }

    /// Adds a custom switch; `None` means presence-only. Re-adding an
    /// existing name overwrites its value.
    pub fn add_flag(&mut self, name: impl Into<String>, value: Option<&str>) -> &mut Self {
        self.flags.insert(name, value.map(String::from));
        self
    }

    /// Removes a custom switch.
    pub fn remove_flag(&mut self, name: &str) -> &mut Self {
        self.flags.remove(name);
        self
    }

    /// Looks up a custom switch: `None` if absent, `Some(None)` if bare.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<Option<&str>> {
        self.flags.get(name)
    }

    /// All custom switches in insertion order.
    #[must_use]
    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    /// Replaces the whole custom switch set.
    pub fn set_flags(&mut self, flags: FlagSet) -> &mut Self {
        self.flags = flags;
        self
    }

    fn apply_level(&mut self, expansion: &[(&str, Option<&str>)]) -> &mut Self {
        for name in LEVEL_FLAGS {
            self.flags.remove(name);
        }
        self.flags.insert("mmt", Some("on".to_string()));
        for (name, value) in expansion {
            self.flags.insert(*name, value.map(String::from));
        }
        self
    }

    /// Fastest compression for the active format.
    pub fn faster(&mut self) -> &mut Self {
        let level = match format::resolve(self.format()).family {
            LevelFamily::Zstd => "0",
            _ => "1",
        };
        self.apply_level(&[("mx", Some(level))])
    }

    /// Strongest standard compression for the active format.
    pub fn slower(&mut self) -> &mut Self {
        let level = match format::resolve(self.format()).family {
            LevelFamily::Zstd => "22",
            _ => "9",
        };
        self.apply_level(&[("mx", Some(level))])
    }

    /// Ultra settings: per-format switch sets tuned beyond what the plain
    /// level switch delivers.
    pub fn max_compression(&mut self) -> &mut Self {
        match format::resolve(self.format()).family {
            LevelFamily::SevenZ => self.apply_level(&[
                ("mx", Some("9")),
                ("m0", Some("lzma2")),
                ("mfb", Some("64")),
                ("ms", Some("on")),
                ("md", Some("32m")),
            ]),
            LevelFamily::Zip => self.apply_level(&[
                ("mx", Some("9")),
                ("mm", Some("Deflate64")),
                ("mfb", Some("257")),
                ("mpass", Some("15")),
                ("mmem", Some("28")),
            ]),
            LevelFamily::Zstd => self.apply_level(&[("mx", Some("22"))]),
            LevelFamily::Gzip => {
                self.apply_level(&[("mfb", Some("258")), ("mpass", Some("15"))])
            }
            LevelFamily::Bzip2 => {
                self.apply_level(&[("mpass", Some("7")), ("md", Some("900000b"))])
            }
        }
    }

    /// Store-only mode (no compression); format-agnostic.
    pub fn no_compression(&mut self) -> &mut Self {
        self.apply_level(&[
            ("mx", Some("0")),
            ("m0", Some("Copy")),
            ("mm", Some("Copy")),
            ("myx", Some("0")),
        ])
    }

    /// Restricts the operation to entries matching `patterns`.
    ///
    /// A pattern naming an existing file is passed as a list file
    /// (`-i<r>@file`); anything else is an inline wildcard (`-i<r>!pattern`).
    pub fn include(&mut self, patterns: &[&str], recursion: Recursion) -> &mut Self {
        self.filter('i', patterns, recursion)
    }

    /// Excludes entries matching `patterns`; same classification as
    /// [`Self::include`].
    pub fn exclude(&mut self, patterns: &[&str], recursion: Recursion) -> &mut Self {
        self.filter('x', patterns, recursion)
    }

    fn filter(&mut self, switch: char, patterns: &[&str], recursion: Recursion) -> &mut Self {
        let recurse = match recursion {
            Recursion::Enabled => "r",
            Recursion::Disabled => "r-",
            Recursion::WildcardsOnly => "r0",
        };
        for pattern in patterns {
            let body = if Path::new(pattern).is_file() {
                format!("@{pattern}")
            } else {
                format!("!{pattern}")
            };
            self.push_positional(format!("{switch}{recurse}{body}"));
        }
        self
    }

    /// Appends a pre-spelled switch token under a fresh positional key.
    pub(crate) fn push_positional(&mut self, token: String) {
        let next = self
            .flags
            .iter()
            .filter_map(|(name, _)| name.parse::<u64>().ok())
            .max()
            .map_or(0, |n| n + 1);
        self.flags.insert(next.to_string(), Some(token));
    }

    /// Tar-pack the source before compressing even when the format would not
    /// require it.
    pub fn set_force_tar_before(&mut self, value: bool) -> &mut Self {
        self.force_tar_before = value;
        self
    }

    /// Declares the source to already be a tar stream, skipping staging.
    pub fn set_already_tarred(&mut self, value: bool) -> &mut Self {
        self.already_tarred = value;
        self
    }

    /// Whether the tar stage preserves owner ids and timestamps (default
    /// `true`).
    pub fn set_keep_file_info_on_tar(&mut self, value: bool) -> &mut Self {
        self.keep_file_info_on_tar = value;
        self
    }

    /// Whether extraction unpacks a lone extracted `.tar` payload in a
    /// second stage (default `true`).
    pub fn set_auto_untar(&mut self, value: bool) -> &mut Self {
        self.auto_untar = value;
        self
    }

    /// Whether the archive is deleted after a successful extraction
    /// (best-effort).
    pub fn set_delete_source_after_extract(&mut self, value: bool) -> &mut Self {
        self.delete_source_after_extract = value;
        self
    }

    /// Installs a progress callback receiving percentages in `0..=100`.
    pub fn set_progress_fn(&mut self, callback: impl FnMut(u32) + Send + 'static) -> &mut Self {
        self.gate.set_sink(Some(progress_fn(callback)));
        self
    }

    /// Removes the progress callback.
    pub fn clear_progress_fn(&mut self) -> &mut Self {
        self.gate.set_sink(None);
        self
    }

    /// Shared handle to the installed callback, if any.
    #[must_use]
    pub fn progress_fn(&self) -> Option<ProgressFn> {
        self.gate.sink()
    }

    /// Last delivered percentage; `-1` until something is delivered.
    #[must_use]
    pub fn last_progress(&self) -> i64 {
        self.gate.last()
    }

    /// Bounds the whole invocation by wall-clock time.
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = Some(timeout);
        self
    }

    /// Aborts when the binary produces no output for `timeout`.
    pub fn set_idle_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Raw captured stdout of the previous operation (all stages
    /// concatenated).
    #[must_use]
    pub fn last_output(&self) -> &str {
        &self.last_output
    }

    /// Restores every per-operation field to its default. Idempotent; safe
    /// to call at any time. The executable path, runner and timeouts are
    /// construction-scoped and survive.
    pub fn reset(&mut self) -> &mut Self {
        self.format = None;
        self.source = None;
        self.target = None;
        self.password = None;
        self.encrypt_names = None;
        self.flags.clear();
        self.force_tar_before = false;
        self.already_tarred = false;
        self.keep_file_info_on_tar = true;
        self.auto_untar = true;
        self.delete_source_after_extract = false;
        self.gate.reset();
        self
    }

    /// Builds an independent Session for a staged sub-operation: same
    /// binary, runner and timeouts, everything else at defaults. Callers
    /// propagate only the fields a stage must inherit.
    pub(crate) fn stage_session(&self) -> Self {
        let mut stage = Self::with_executable(self.executable.clone());
        stage.runner = Arc::clone(&self.runner);
        stage.timeout = self.timeout;
        stage.idle_timeout = self.idle_timeout;
        stage
    }
}
