//! JSON output formatter for machine-readable results.

use super::formatter::GeneratedFile;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use zipedit_core::CreationReport;
use zipedit_core::CycleOutcome;
use zipedit_core::ExitReason;
use zipedit_core::ReplaceReport;
use zipedit_core::SessionReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize)]
struct CycleOutput {
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    member: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes_written: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preserved: Option<String>,
}

fn cycle_output(outcome: &CycleOutcome) -> JsonOutput<CycleOutput> {
    match outcome {
        CycleOutcome::Exit(reason) => JsonOutput::success(
            "cycle",
            CycleOutput {
                outcome: match reason {
                    ExitReason::Quit => "quit",
                    ExitReason::EmptyArchive => "empty_archive",
                },
                ..CycleOutput::default()
            },
        ),
        CycleOutcome::ExtractFailed { member, error } => JsonOutput::success(
            "cycle",
            CycleOutput {
                outcome: "extract_failed",
                member: Some(member.clone()),
                ..CycleOutput::default()
            },
        )
        .with_error(error.to_string()),
        CycleOutcome::Committed { member, report } => JsonOutput::success(
            "cycle",
            CycleOutput {
                outcome: "committed",
                member: Some(member.clone()),
                bytes_written: Some(report.bytes_written),
                ..CycleOutput::default()
            },
        ),
        CycleOutcome::CommitFailed {
            member,
            error,
            preserved,
        } => JsonOutput::success(
            "cycle",
            CycleOutput {
                outcome: "commit_failed",
                member: Some(member.clone()),
                preserved: Some(preserved.display().to_string()),
                ..CycleOutput::default()
            },
        )
        .with_error(error.to_string()),
        CycleOutcome::Abandoned { member } => JsonOutput::success(
            "cycle",
            CycleOutput {
                outcome: "abandoned",
                member: Some(member.clone()),
                ..CycleOutput::default()
            },
        ),
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        #[derive(Serialize)]
        struct CreationOutput {
            output_path: String,
            members_added: usize,
            sources_skipped: usize,
            bytes_written: u64,
            archive_size: u64,
            compression_percentage: f64,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = CreationOutput {
            output_path: output_path.display().to_string(),
            members_added: report.members_added,
            sources_skipped: report.sources_skipped,
            bytes_written: report.bytes_written,
            archive_size: report.archive_size,
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        Self::output(&JsonOutput::success("create", data))
    }

    fn format_member_list(&self, archive: &Path, members: &[String]) -> Result<()> {
        #[derive(Serialize)]
        struct ListOutput<'a> {
            archive: String,
            count: usize,
            members: &'a [String],
        }

        let data = ListOutput {
            archive: archive.display().to_string(),
            count: members.len(),
            members,
        };

        Self::output(&JsonOutput::success("list", data))
    }

    fn format_extracted(&self, member: &str, path: &Path) -> Result<()> {
        #[derive(Serialize)]
        struct ExtractOutput<'a> {
            member: &'a str,
            path: String,
        }

        let data = ExtractOutput {
            member,
            path: path.display().to_string(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_replace_result(&self, archive: &Path, report: &ReplaceReport) -> Result<()> {
        #[derive(Serialize)]
        struct ReplaceOutput<'a> {
            archive: String,
            member: &'a str,
            replaced: bool,
            members_copied: usize,
            bytes_written: u64,
            duration_ms: u128,
        }

        let data = ReplaceOutput {
            archive: archive.display().to_string(),
            member: &report.member,
            replaced: report.replaced,
            members_copied: report.members_copied,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        };

        Self::output(&JsonOutput::success("replace", data))
    }

    fn format_generated(&self, files: &[GeneratedFile]) -> Result<()> {
        Self::output(&JsonOutput::success("generate", files))
    }

    fn format_cycle_outcome(&self, outcome: &CycleOutcome) {
        let _ = Self::output(&cycle_output(outcome));
    }

    fn format_session_report(&self, archive: &Path, report: &SessionReport) -> Result<()> {
        #[derive(Serialize)]
        struct SessionOutput {
            archive: String,
            committed: usize,
            commit_failures: usize,
            extract_failures: usize,
            abandoned: usize,
            preserved: Vec<String>,
        }

        let data = SessionOutput {
            archive: archive.display().to_string(),
            committed: report.committed,
            commit_failures: report.commit_failures,
            extract_failures: report.extract_failures,
            abandoned: report.abandoned,
            preserved: report
                .preserved
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        };

        Self::output(&JsonOutput::success("edit", data))
    }

    fn format_success(&self, message: &str) {
        #[derive(Serialize)]
        struct SuccessData<'a> {
            message: &'a str,
        }

        let _ = Self::output(&JsonOutput::success("message", SuccessData { message }));
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData<'a> {
            message: &'a str,
        }

        let _ = Self::output(&JsonOutput::success("warning", WarningData { message }));
    }

    /// Keeps stdout parseable while a session prompts for input.
    fn prompt_writer(&self) -> Box<dyn Write> {
        Box::new(io::stderr())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use zipedit_core::StoreError;

    #[test]
    fn test_committed_outcome_shape() {
        let outcome = CycleOutcome::Committed {
            member: "x.txt".to_string(),
            report: ReplaceReport {
                member: "x.txt".to_string(),
                replaced: true,
                bytes_written: 5,
                ..ReplaceReport::default()
            },
        };

        let json = serde_json::to_value(cycle_output(&outcome)).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"]["outcome"], "committed");
        assert_eq!(json["data"]["bytes_written"], 5);
        assert!(json["data"].get("preserved").is_none());
    }

    #[test]
    fn test_commit_failure_reports_error_and_preserved_path() {
        let outcome = CycleOutcome::CommitFailed {
            member: "x.txt".to_string(),
            error: StoreError::MemberNotFound {
                name: "x.txt".to_string(),
            },
            preserved: PathBuf::from("temp_extracted/x.txt"),
        };

        let json = serde_json::to_value(cycle_output(&outcome)).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["data"]["preserved"], "temp_extracted/x.txt");
        assert!(json["error"].as_str().unwrap().contains("x.txt"));
    }
}
