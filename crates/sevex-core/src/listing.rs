//! Parsing the archiver's `l` (list) report into structured records.
//!
//! The report is line oriented: free-form preamble, a `--` marker opening a
//! `key = value` summary block, a column-header phrase, a dashed separator,
//! one row per entry, a closing separator, and a totals row. Entry rows carry
//! six whitespace-delimited fields where the path is the final, greedy field
//! (it may itself contain whitespace).

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// One file or directory row from the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedEntry {
    /// Modification date as printed (`YYYY-MM-DD`).
    pub date: String,
    /// Modification time as printed (`HH:MM:SS`).
    pub time: String,
    /// Attribute column (`....A`, `D....`, ...).
    pub attributes: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// Entry path inside the archive.
    pub path: String,
}

/// The totals row closing the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListingTotals {
    /// Date column of the totals row.
    pub date: String,
    /// Time column of the totals row.
    pub time: String,
    /// Total uncompressed size in bytes.
    pub size: u64,
    /// Total compressed size in bytes.
    pub compressed_size: u64,
    /// Number of files, 0 when the trailing text names none.
    pub files: u64,
    /// Number of folders, 0 when the trailing text names none.
    pub folders: u64,
}

/// Structured result of a list operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveListing {
    /// Free-form `key = value` pairs from the summary block (Path, Type,
    /// Physical Size, Solid, ...).
    pub summary: BTreeMap<String, String>,
    /// Entry rows in report order.
    pub entries: Vec<ListedEntry>,
    /// Totals row, when the report carried one.
    pub totals: Option<ListingTotals>,
}

fn files_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\s+files").expect("valid pattern"))
}

fn folders_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\s+folders").expect("valid pattern"))
}

/// A line made only of dashes and spaces, containing at least one dash.
fn is_separator(line: &str) -> bool {
    let mut saw_dash = false;
    for ch in line.chars() {
        match ch {
            '-' => saw_dash = true,
            ' ' => {}
            _ => return false,
        }
    }
    saw_dash
}

fn is_column_header(line: &str) -> bool {
    line.contains("Date") && line.contains("Time") && line.contains("Attr") && line.contains("Name")
}

/// Splits off `n` leading whitespace-delimited fields, returning them plus
/// the trimmed remainder of the line.
fn take_fields<'a>(line: &'a str, n: usize) -> Option<(Vec<&'a str>, &'a str)> {
    let mut rest = line.trim_start();
    let mut fields = Vec::with_capacity(n);
    for _ in 0..n {
        let end = rest.find(char::is_whitespace)?;
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Some((fields, rest.trim_end()))
}

fn capture_count(pattern: &Regex, text: &str) -> u64 {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Preamble,
    Summary,
    AwaitRows,
    Rows,
    Totals,
    Done,
}

/// Parses the text of a list invocation.
///
/// Rows that do not carry the expected six fields (or whose numeric columns
/// fail to parse) are skipped rather than failing the whole report; the
/// binary's output is not ours to validate.
#[must_use]
pub fn parse_listing(text: &str) -> ArchiveListing {
    let mut listing = ArchiveListing::default();
    let mut state = State::Preamble;

    for line in text.lines() {
        match state {
            State::Preamble => {
                if line.trim() == "--" {
                    state = State::Summary;
                } else if is_column_header(line) {
                    state = State::AwaitRows;
                }
            }
            State::Summary => {
                if is_column_header(line) {
                    state = State::AwaitRows;
                } else if let Some((key, value)) = line.split_once(" = ") {
                    listing
                        .summary
                        .insert(key.trim().to_string(), value.trim().to_string());
                }
            }
            State::AwaitRows => {
                if is_separator(line) {
                    state = State::Rows;
                }
            }
            State::Rows => {
                if is_separator(line) {
                    state = State::Totals;
                } else if let Some(entry) = parse_row(line) {
                    listing.entries.push(entry);
                }
            }
            State::Totals => {
                if line.trim().is_empty() {
                    continue;
                }
                listing.totals = parse_totals(line);
                state = State::Done;
            }
            State::Done => {}
        }
    }

    listing
}

fn parse_row(line: &str) -> Option<ListedEntry> {
    let (fields, path) = take_fields(line, 5)?;
    if path.is_empty() {
        return None;
    }
    Some(ListedEntry {
        date: fields[0].to_string(),
        time: fields[1].to_string(),
        attributes: fields[2].to_string(),
        size: fields[3].parse().ok()?,
        compressed_size: fields[4].parse().ok()?,
        path: path.to_string(),
    })
}

fn parse_totals(line: &str) -> Option<ListingTotals> {
    let (fields, trailer) = take_fields(line, 4)?;
    Some(ListingTotals {
        date: fields[0].to_string(),
        time: fields[1].to_string(),
        size: fields[2].parse().ok()?,
        compressed_size: fields[3].parse().ok()?,
        files: capture_count(files_pattern(), trailer),
        folders: capture_count(folders_pattern(), trailer),
    })
}
