//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use sevex_core::ArchiveListing;
use sevex_core::CapabilityReport;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_compress_result(&self, archive: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct CompressOutput {
            archive: String,
        }

        let data = CompressOutput {
            archive: archive.display().to_string(),
        };

        let output = JsonOutput::success("add", data);
        Self::output(&output)
    }

    fn format_extract_result(&self, archive: &Path, target: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractOutput {
            archive: String,
            target: String,
        }

        let data = ExtractOutput {
            archive: archive.display().to_string(),
            target: target.display().to_string(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_listing(&self, archive: &Path, listing: &ArchiveListing) -> Result<()> {
        #[derive(Serialize)]
        struct ListingOutput<'a> {
            archive: String,
            #[serde(flatten)]
            listing: &'a ArchiveListing,
        }

        let data = ListingOutput {
            archive: archive.display().to_string(),
            listing,
        };

        let output = JsonOutput::success("list", data);
        Self::output(&output)
    }

    fn format_capabilities(&self, report: &CapabilityReport) -> Result<()> {
        let output = JsonOutput::success("info", report);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_structure() {
        let output = JsonOutput::success("list", ArchiveListing::default());
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"operation\":\"list\""));
        assert!(json.contains("\"status\":\"success\""));
    }

    #[test]
    fn test_json_error_carries_message() {
        let output = JsonOutput::<()>::error("extract", "archive missing");
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains("\"status\":\"error\""));
        assert!(json.contains("archive missing"));
    }
}
