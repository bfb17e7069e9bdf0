//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use zipedit_core::CreationReport;
use zipedit_core::CycleOutcome;
use zipedit_core::ReplaceReport;
use zipedit_core::SessionReport;

/// A file written by the test-data generator.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format archive creation result
    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()>;

    /// Format the member names of an archive
    fn format_member_list(&self, archive: &Path, members: &[String]) -> Result<()>;

    /// Format a single-member extraction
    fn format_extracted(&self, member: &str, path: &Path) -> Result<()>;

    /// Format a member replacement
    fn format_replace_result(&self, archive: &Path, report: &ReplaceReport) -> Result<()>;

    /// Format the files written by the generator
    fn format_generated(&self, files: &[GeneratedFile]) -> Result<()>;

    /// Format the result of one edit cycle
    fn format_cycle_outcome(&self, outcome: &CycleOutcome);

    /// Format the totals of an edit session
    fn format_session_report(&self, archive: &Path, report: &SessionReport) -> Result<()>;

    /// Format success message
    fn format_success(&self, message: &str);

    /// Format warning message
    fn format_warning(&self, message: &str);

    /// Where interactive prompts are written.
    fn prompt_writer(&self) -> Box<dyn Write> {
        Box::new(std::io::stdout())
    }

    /// Whether a spinner may be drawn while waiting for an edit.
    fn shows_spinner(&self) -> bool {
        false
    }
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

    /// Marks the output as failed while keeping its data.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.status = Status::Error;
        self.error = Some(error.into());
        self
    }
}
