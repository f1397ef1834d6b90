//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use sevex_core::Session;

/// CLI progress bar tracking the archiver's percentage stream.
///
/// Displays a 0-100 bar when running in a TTY. Automatically cleans up on
/// drop.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    ///
    /// # Arguments
    ///
    /// * `message` - Message to display (e.g., "Compressing", "Extracting")
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(100);

        // Template: "Compressing [████████░░░░] 42% (3s)"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}% ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        bar.set_message(message.to_string());

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    /// Installs this bar as the session's progress sink.
    ///
    /// The archiver delivers strictly increasing percentages, so positioning
    /// the bar directly at each value is enough.
    pub fn attach(&self, session: &mut Session) {
        let bar = self.bar.clone();
        session.set_progress_fn(move |percent| {
            bar.set_position(u64::from(percent));
        });
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
