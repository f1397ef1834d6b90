//! Progress extraction from archiver output.
//!
//! The binary interleaves percentage updates into stdout (`" 42% 137 ..."`),
//! redrawing lines with carriage returns and backspaces. [`ProgressScanner`]
//! reassembles that stream into line segments and extracts raw percentages;
//! [`ProgressGate`] rescales them for staged sub-operations and enforces the
//! strictly-increasing delivery contract towards the user callback.

use regex::Regex;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;

/// Shared progress callback, invoked with percentages in `0..=100`.
///
/// Shared so that a staged sub-operation can report through the same sink as
/// the operation that spawned it.
pub type ProgressFn = Arc<Mutex<dyn FnMut(u32) + Send>>;

/// Wraps a closure into a [`ProgressFn`].
pub fn progress_fn(f: impl FnMut(u32) + Send + 'static) -> ProgressFn {
    Arc::new(Mutex::new(f))
}

/// A percentage token: a digit run glued to `%`, then whitespace and another
/// digit run (the in-flight item counter). Plain `%` occurrences in file
/// names do not match.
fn percent_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"(\d+)%\s+\d").expect("valid percent pattern")
    })
}

/// Incremental scanner over raw stdout chunks.
///
/// Chunks arrive on arbitrary boundaries; the scanner buffers until a line
/// terminator (`\n`, `\r` or backspace) completes a segment, then matches the
/// percentage grammar against it.
#[derive(Debug, Default)]
pub struct ProgressScanner {
    buf: String,
}

impl ProgressScanner {
    /// Creates an empty scanner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk, invoking `emit` for every percentage completed by it.
    pub fn push_chunk(&mut self, chunk: &str, emit: &mut dyn FnMut(u64)) {
        for ch in chunk.chars() {
            if ch == '\n' || ch == '\r' || ch == '\u{8}' {
                Self::scan(&self.buf, emit);
                self.buf.clear();
            } else {
                self.buf.push(ch);
            }
        }
    }

    /// Flushes the trailing unterminated segment at end of stream.
    pub fn finish(&mut self, emit: &mut dyn FnMut(u64)) {
        Self::scan(&self.buf, emit);
        self.buf.clear();
    }

    fn scan(segment: &str, emit: &mut dyn FnMut(u64)) {
        for captures in percent_pattern().captures_iter(segment) {
            if let Some(value) = captures.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) {
                emit(value);
            }
        }
    }
}

/// Monotonic delivery gate in front of the user callback.
///
/// Raw percentages are floor-divided by the divisor (a staged stage that
/// represents a fraction of total work runs with divisor > 1), then delivered
/// only when strictly greater than everything delivered before. Duplicate and
/// out-of-order archiver output therefore never reaches the callback.
pub struct ProgressGate {
    sink: Option<ProgressFn>,
    last: i64,
    divisor: u64,
}

impl std::fmt::Debug for ProgressGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressGate")
            .field("sink", &self.sink.as_ref().map(|_| "..."))
            .field("last", &self.last)
            .field("divisor", &self.divisor)
            .finish()
    }
}

impl Default for ProgressGate {
    fn default() -> Self {
        Self {
            sink: None,
            last: -1,
            divisor: 1,
        }
    }
}

impl ProgressGate {
    /// Installs or removes the user callback.
    pub fn set_sink(&mut self, sink: Option<ProgressFn>) {
        self.sink = sink;
    }

    /// Returns a shared handle to the installed callback, if any.
    #[must_use]
    pub fn sink(&self) -> Option<ProgressFn> {
        self.sink.clone()
    }

    /// Last percentage delivered, `-1` when nothing was delivered yet.
    #[must_use]
    pub fn last(&self) -> i64 {
        self.last
    }

    /// Seeds the monotonic floor, used when a staged stage continues the
    /// stream of a previous stage.
    pub fn set_last(&mut self, last: i64) {
        self.last = last;
    }

    /// Sets the rescale divisor (values < 1 are clamped to 1).
    pub fn set_divisor(&mut self, divisor: u64) {
        self.divisor = divisor.max(1);
    }

    /// Offers a raw parsed percentage for delivery.
    pub fn offer(&mut self, raw: u64) {
        self.deliver(raw / self.divisor);
    }

    /// Offers an already-scaled percentage (used to force completion).
    pub fn deliver(&mut self, value: u64) {
        let value = value.min(100);
        if i64::try_from(value).is_ok_and(|v| v > self.last) {
            self.last = value as i64;
            if let Some(sink) = &self.sink {
                if let Ok(mut f) = sink.lock() {
                    (*f)(value as u32);
                }
            }
        }
    }

    /// Re-arms the gate for a fresh operation: the sink survives, the floor
    /// returns to `-1` and the divisor to 1. A failed multi-stage run leaves
    /// both skewed, so every top-level operation starts here.
    pub fn rearm(&mut self) {
        self.last = -1;
        self.divisor = 1;
    }

    /// Restores the initial state (no sink, `-1` floor, divisor 1).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
