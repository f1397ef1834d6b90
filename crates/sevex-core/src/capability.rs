//! Parsing the archiver's `i` (info) report into a capability catalog.
//!
//! The report carries four independently scanned sections: a version line
//! prefixed `7-Zip`, and `Formats:` / `Codecs:` / `Hashers:` tables, each
//! running until the next section marker.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// One supported container format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatInfo {
    /// Capability flag letters (`CKSF`, ...), possibly empty.
    pub flags: String,
    /// Format name as the binary spells it for `-t`.
    pub name: String,
    /// Recognized file extensions.
    pub extensions: Vec<String>,
    /// Leading signature bytes as printed, possibly empty.
    pub signature: String,
}

/// One compression codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecInfo {
    /// Capability flag letters.
    pub flags: String,
    /// Numeric codec identifier as printed (hex).
    pub id: String,
    /// Codec name.
    pub name: String,
}

/// One hash function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HasherInfo {
    /// Digest size in bytes.
    pub size: u32,
    /// Numeric hasher identifier as printed.
    pub id: String,
    /// Hasher name.
    pub name: String,
}

/// Structured result of an info operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilityReport {
    /// Binary version, e.g. `22.01`.
    pub version: String,
    /// Supported formats.
    pub formats: Vec<FormatInfo>,
    /// Supported codecs.
    pub codecs: Vec<CodecInfo>,
    /// Supported hashers.
    pub hashers: Vec<HasherInfo>,
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| Regex::new(r"^7-Zip\D*(\d+\.\d+)").expect("valid pattern"))
}

fn column_split() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| Regex::new(r"\s{2,}").expect("valid pattern"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Formats,
    Codecs,
    Hashers,
}

/// Parses the text of an info invocation. Unrecognized rows are skipped.
#[must_use]
pub fn parse_capabilities(text: &str) -> CapabilityReport {
    let mut report = CapabilityReport::default();
    let mut section = Section::None;

    for line in text.lines() {
        if let Some(captures) = version_pattern().captures(line) {
            if let Some(version) = captures.get(1) {
                report.version = version.as_str().to_string();
            }
            section = Section::None;
            continue;
        }
        match line.trim() {
            "Formats:" => {
                section = Section::Formats;
                continue;
            }
            "Codecs:" => {
                section = Section::Codecs;
                continue;
            }
            "Hashers:" => {
                section = Section::Hashers;
                continue;
            }
            "" => continue,
            _ => {}
        }
        match section {
            Section::Formats => {
                if let Some(info) = parse_format_row(line) {
                    report.formats.push(info);
                }
            }
            Section::Codecs => {
                if let Some(info) = parse_codec_row(line) {
                    report.codecs.push(info);
                }
            }
            Section::Hashers => {
                if let Some(info) = parse_hasher_row(line) {
                    report.hashers.push(info);
                }
            }
            Section::None => {}
        }
    }

    report
}

/// Format rows are columns separated by two-or-more spaces: an optional
/// library counter glued to the flag letters, the name, the space-separated
/// extension list, and the trailing signature.
fn parse_format_row(line: &str) -> Option<FormatInfo> {
    let mut columns = column_split().split(line.trim()).collect::<Vec<_>>();
    if columns.len() < 2 {
        return None;
    }
    // First column may be "0 CKSF" (counter + flags), bare flags, or a
    // counter alone.
    let head = columns.remove(0);
    let flags = head
        .split_whitespace()
        .find(|tok| tok.chars().all(char::is_alphabetic))
        .unwrap_or("")
        .to_string();
    let name = columns.first()?.to_string();
    let extensions = columns
        .get(1)
        .map(|col| col.split(' ').map(str::to_string).collect())
        .unwrap_or_default();
    let signature = columns.get(2..).map_or_else(String::new, |rest| rest.join("  "));
    Some(FormatInfo {
        flags,
        name,
        extensions,
        signature,
    })
}

fn tail_fields(line: &str, n: usize) -> Option<Vec<&str>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.len() {
        // Optional leading library counter.
        len if len == n + 1 => Some(tokens[1..].to_vec()),
        len if len == n => Some(tokens),
        _ => None,
    }
}

fn parse_codec_row(line: &str) -> Option<CodecInfo> {
    let fields = tail_fields(line, 3)?;
    Some(CodecInfo {
        flags: fields[0].to_string(),
        id: fields[1].to_string(),
        name: fields[2].to_string(),
    })
}

fn parse_hasher_row(line: &str) -> Option<HasherInfo> {
    let fields = tail_fields(line, 3)?;
    Some(HasherInfo {
        size: fields[0].parse().ok()?,
        id: fields[1].to_string(),
        name: fields[2].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
7-Zip (z) 22.01 (x64) : Copyright (c) 1999-2022 Igor Pavlov : 2022-07-15

Libs:
 0  /usr/lib/7zip/7z.so

Formats:
 0 CKSF  7z  7z  7 z BC AF 27 1C
 0 CK  zip  zip z01 zipx  P K
 0 K  tar  tar ova  usta r
 0 K  gzip  gz tgz  1F 8B

Codecs:
 EDF 40202 BZip2
 ED 30101 LZMA
 ED 21 LZMA2

Hashers:
 4 1 CRC32
 32 A SHA256
";

    #[test]
    fn test_version_is_extracted() {
        let report = parse_capabilities(SAMPLE);
        assert_eq!(report.version, "22.01");
    }

    #[test]
    fn test_format_rows() {
        let report = parse_capabilities(SAMPLE);
        assert_eq!(report.formats.len(), 4);
        let zip = &report.formats[1];
        assert_eq!(zip.flags, "CK");
        assert_eq!(zip.name, "zip");
        assert_eq!(zip.extensions, vec!["zip", "z01", "zipx"]);
        assert_eq!(zip.signature, "P K");
    }

    #[test]
    fn test_codec_rows() {
        let report = parse_capabilities(SAMPLE);
        assert_eq!(report.codecs.len(), 3);
        assert_eq!(report.codecs[1].flags, "ED");
        assert_eq!(report.codecs[1].id, "30101");
        assert_eq!(report.codecs[1].name, "LZMA");
    }

    #[test]
    fn test_hasher_rows_coerce_size() {
        let report = parse_capabilities(SAMPLE);
        assert_eq!(report.hashers.len(), 2);
        assert_eq!(report.hashers[0].size, 4);
        assert_eq!(report.hashers[1].name, "SHA256");
        assert_eq!(report.hashers[1].size, 32);
    }

    #[test]
    fn test_sections_terminate_each_other() {
        let report = parse_capabilities(SAMPLE);
        // The Libs row must not leak into any catalog.
        assert!(report.formats.iter().all(|f| f.name != "/usr/lib/7zip/7z.so"));
        assert!(report.codecs.iter().all(|c| c.name != "CRC32"));
    }

    #[test]
    fn test_empty_text() {
        let report = parse_capabilities("");
        assert!(report.version.is_empty());
        assert!(report.formats.is_empty());
    }
}
