//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use sevex_core::ArchiveListing;
use sevex_core::CapabilityReport;
use std::path::Path;

pub struct HumanFormatter {
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_compress_result(&self, archive: &Path) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Archive created: {}",
                style("✓").green().bold(),
                archive.display()
            ));
        } else {
            let _ = self
                .term
                .write_line(&format!("Archive created: {}", archive.display()));
        }

        Ok(())
    }

    fn format_extract_result(&self, archive: &Path, target: &Path) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extracted {} to {}",
                style("✓").green().bold(),
                archive.display(),
                target.display()
            ));
        } else {
            let _ = self.term.write_line(&format!(
                "Extracted {} to {}",
                archive.display(),
                target.display()
            ));
        }

        Ok(())
    }

    fn format_listing(&self, archive: &Path, listing: &ArchiveListing) -> Result<()> {
        if self.quiet {
            for entry in &listing.entries {
                let _ = self.term.write_line(&entry.path);
            }
            return Ok(());
        }

        let _ = self
            .term
            .write_line(&format!("Archive: {}", archive.display()));
        if let Some(kind) = listing.summary.get("Type") {
            let _ = self.term.write_line(&format!("Type: {kind}"));
        }
        let _ = self.term.write_line("");

        for entry in &listing.entries {
            let _ = self.term.write_line(&format!(
                "{} {} {:>5} {:>10}  {}",
                entry.date, entry.time, entry.attributes, entry.size, entry.path
            ));
        }

        if let Some(totals) = &listing.totals {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} files, {} folders, {}",
                totals.files,
                totals.folders,
                Self::format_size(totals.size)
            ));
        }

        Ok(())
    }

    fn format_capabilities(&self, report: &CapabilityReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self
            .term
            .write_line(&format!("7-Zip version: {}", report.version));
        let _ = self.term.write_line(&format!(
            "Formats: {}  Codecs: {}  Hashers: {}",
            report.formats.len(),
            report.codecs.len(),
            report.hashers.len()
        ));
        let _ = self.term.write_line("");

        for format in &report.formats {
            let _ = self.term.write_line(&format!(
                "  {:<6} {:<10} {}",
                format.flags,
                format.name,
                format.extensions.join(" ")
            ));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
