//! Locating a working archiver binary.
//!
//! The engine never hard-codes where 7-Zip lives. It consumes an
//! [`ExecutableLocator`] and fails Session construction with
//! [`crate::Error::ExecutableNotFound`] when none resolves.

use std::env;
use std::path::Path;
use std::path::PathBuf;

/// Environment variable overriding archiver discovery.
pub const ENV_OVERRIDE: &str = "SEVEX_7Z";

/// Binary names probed on `PATH`, in preference order.
const PATH_CANDIDATES: &[&str] = &["7zz", "7z", "7za"];

/// Strategy for resolving the archiver binary.
pub trait ExecutableLocator {
    /// Returns a path to a working archiver binary, or `None`.
    fn locate(&self) -> Option<PathBuf>;
}

/// Default discovery chain: explicit override, `$SEVEX_7Z`, `PATH`, then a
/// vendored layout keyed by OS family and CPU architecture next to the
/// running executable (`bin/<os>-<arch>/7zz`).
#[derive(Debug, Clone, Default)]
pub struct DefaultLocator {
    /// Explicit path override, checked first.
    pub override_path: Option<PathBuf>,
}

impl DefaultLocator {
    /// Creates a locator with an explicit override.
    #[must_use]
    pub fn with_override(path: impl Into<PathBuf>) -> Self {
        Self {
            override_path: Some(path.into()),
        }
    }

    fn vendored() -> Option<PathBuf> {
        let exe_dir = env::current_exe().ok()?.parent()?.to_path_buf();
        let platform = format!("{}-{}", env::consts::OS, env::consts::ARCH);
        let name = if env::consts::OS == "windows" {
            "7z.exe"
        } else {
            "7zz"
        };
        let candidate = exe_dir.join("bin").join(platform).join(name);
        candidate.is_file().then_some(candidate)
    }
}

impl ExecutableLocator for DefaultLocator {
    fn locate(&self) -> Option<PathBuf> {
        if let Some(path) = &self.override_path {
            if path.is_file() {
                return Some(path.clone());
            }
            tracing::warn!(path = %path.display(), "override path is not a file");
            return None;
        }
        if let Some(path) = env::var_os(ENV_OVERRIDE).map(PathBuf::from) {
            if path.is_file() {
                return Some(path);
            }
        }
        for name in PATH_CANDIDATES {
            if let Ok(path) = which::which(name) {
                return Some(path);
            }
        }
        Self::vendored()
    }
}

/// Locator answering with a fixed path, useful for tests and embedders that
/// manage the binary themselves.
#[derive(Debug, Clone)]
pub struct FixedLocator(pub PathBuf);

impl ExecutableLocator for FixedLocator {
    fn locate(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// Convenience wrapper for `impl AsRef<Path>` call sites.
impl<P: AsRef<Path>> From<P> for FixedLocator {
    fn from(path: P) -> Self {
        Self(path.as_ref().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_locator_returns_path_verbatim() {
        let locator = FixedLocator::from("/opt/7zz");
        assert_eq!(locator.locate(), Some(PathBuf::from("/opt/7zz")));
    }

    #[test]
    fn test_override_must_exist() {
        let locator = DefaultLocator::with_override("/definitely/missing/7zz");
        assert_eq!(locator.locate(), None);
    }

    #[test]
    fn test_existing_override_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let bin = dir.path().join("7zz");
        std::fs::write(&bin, b"#!/bin/sh\n").expect("write stub");
        let locator = DefaultLocator::with_override(&bin);
        assert_eq!(locator.locate(), Some(bin));
    }
}
