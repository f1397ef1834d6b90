//! Archive format resolution.
//!
//! Maps user-facing format names onto archiver container-selector switches,
//! default codec switches, and the tar-staging requirement. Resolution never
//! fails: names outside the alias table get a synthetic `-t<name>` selector
//! so that formats unknown to this table but known to a newer binary still
//! work.

use crate::flags::FlagSet;

/// The format assumed when none is configured.
pub const DEFAULT_FORMAT: &str = "7z";

/// Which compression-level column a format belongs to.
///
/// The archiver's plain level switch does not deliver uniform size/speed
/// tradeoffs across containers, so the level helpers expand per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelFamily {
    /// The default 7z container (also plain tar and unknown formats).
    SevenZ,
    /// The zip container.
    Zip,
    /// zstd, lz4, lz5/lzip and brotli codecs (level range 0-22).
    Zstd,
    /// The gzip codec.
    Gzip,
    /// The bzip2 codec.
    Bzip2,
}

/// Resolved per-format invocation defaults. Derived on demand, never stored.
#[derive(Debug, Clone)]
pub struct FormatProfile {
    /// Container-selector switches, e.g. `-t7z`.
    pub selector_flags: FlagSet,
    /// Default codec switches for the container, e.g. `-m0=zstd`.
    pub default_flags: FlagSet,
    /// Whether a tar pre-packing stage must run before compression.
    pub requires_tar_staging: bool,
    /// Compression-level column for the level helpers.
    pub family: LevelFamily,
}

/// Canonical codec names selectable inside the 7z container.
///
/// Returns `(codec switch value, level family)` for exact alias matches.
fn codec_alias(name: &str) -> Option<(&'static str, LevelFamily)> {
    match name {
        "lz4" => Some(("lz4", LevelFamily::Zstd)),
        "lz5" | "lzip" => Some(("lz5", LevelFamily::Zstd)),
        "zstd" | "zst" => Some(("zstd", LevelFamily::Zstd)),
        "brotli" | "br" => Some(("brotli", LevelFamily::Zstd)),
        "bzip2" | "bz2" => Some(("bzip2", LevelFamily::Bzip2)),
        "gzip" | "gz" => Some(("gzip", LevelFamily::Gzip)),
        _ => None,
    }
}

fn container(selector: &str, family: LevelFamily, staged: bool) -> FormatProfile {
    let mut selector_flags = FlagSet::new();
    selector_flags.insert_bare(format!("t{selector}"));
    FormatProfile {
        selector_flags,
        default_flags: FlagSet::new(),
        requires_tar_staging: staged,
        family,
    }
}

fn codec(name: &str, family: LevelFamily, staged: bool) -> FormatProfile {
    let mut profile = container("7z", family, staged);
    profile
        .default_flags
        .insert("m0", Some(name.to_string()));
    profile
}

/// Resolves a format name to its invocation profile.
///
/// Lookup is exact and case-sensitive. `tar.<codec>` and the `t<codec>`
/// shorthand resolve to the codec profile with tar staging required; plain
/// `tar` never stages, which is what bounds staging to one level.
#[must_use]
pub fn resolve(name: &str) -> FormatProfile {
    match name {
        "7z" => container("7z", LevelFamily::SevenZ, false),
        "zip" => container("zip", LevelFamily::Zip, false),
        "tar" => container("tar", LevelFamily::SevenZ, false),
        _ => {
            if let Some((c, family)) = codec_alias(name) {
                return codec(c, family, false);
            }
            if let Some(rest) = name.strip_prefix("tar.") {
                if let Some((c, family)) = codec_alias(rest) {
                    return codec(c, family, true);
                }
            }
            if let Some(rest) = name.strip_prefix('t') {
                if let Some((c, family)) = codec_alias(rest) {
                    return codec(c, family, true);
                }
            }
            // Forward compatibility: let the binary judge the name.
            container(name, LevelFamily::SevenZ, false)
        }
    }
}
