//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use sevex_core::ArchiveListing;
use sevex_core::CapabilityReport;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of creating an archive
    fn format_compress_result(&self, archive: &Path) -> Result<()>;

    /// Format the result of extracting an archive
    fn format_extract_result(&self, archive: &Path, target: &Path) -> Result<()>;

    /// Format an archive listing
    fn format_listing(&self, archive: &Path, listing: &ArchiveListing) -> Result<()>;

    /// Format a capability report
    fn format_capabilities(&self, report: &CapabilityReport) -> Result<()>;

    /// Format error message
    #[allow(dead_code)]
    fn format_error(&self, error: &anyhow::Error);

    /// Format warning message
    #[allow(dead_code)]
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    #[allow(dead_code)]
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    #[allow(dead_code)]
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
