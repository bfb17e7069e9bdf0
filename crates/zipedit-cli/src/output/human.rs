//! Human-readable output formatter with colors and styling.

use super::formatter::GeneratedFile;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use zipedit_core::CreationReport;
use zipedit_core::CycleOutcome;
use zipedit_core::ExitReason;
use zipedit_core::ReplaceReport;
use zipedit_core::SessionReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
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

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn check(&self, message: &str) {
        if self.use_colors {
            self.line(&format!("{} {message}", style("✓").green().bold()));
        } else {
            self.line(message);
        }
    }

    fn failure(&self, message: &str) {
        if self.use_colors {
            self.line(&format!("{} {message}", style("✗").red().bold()));
        } else {
            self.line(&format!("ERROR: {message}"));
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_creation_result(&self, output_path: &Path, report: &CreationReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.check(&format!("Archive created: {}", output_path.display()));
        self.line("");
        self.line(&format!("  Members added:    {}", report.members_added));
        self.line(&format!(
            "  Total size:       {}",
            Self::format_size(report.bytes_written)
        ));
        self.line(&format!(
            "  Archive size:     {}",
            Self::format_size(report.archive_size)
        ));
        self.line(&format!(
            "  Compression:      {:.1}%",
            report.compression_percentage()
        ));
        if report.sources_skipped > 0 {
            self.line(&format!("  Sources skipped:  {}", report.sources_skipped));
        }
        self.line(&format!(
            "  Created in:       {:.2}s",
            report.duration.as_secs_f64()
        ));

        if report.has_warnings() {
            self.line("");
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &report.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_member_list(&self, archive: &Path, members: &[String]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if members.is_empty() {
            self.line(&format!("{} has no members", archive.display()));
            return Ok(());
        }

        for member in members {
            self.line(member);
        }
        if self.verbose {
            self.line("");
            self.line(&format!("Total: {} members", members.len()));
        }

        Ok(())
    }

    fn format_extracted(&self, member: &str, path: &Path) -> Result<()> {
        if !self.quiet {
            self.check(&format!("Extracted '{member}' to {}", path.display()));
        }
        Ok(())
    }

    fn format_replace_result(&self, archive: &Path, report: &ReplaceReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let verb = if report.replaced { "Replaced" } else { "Added" };
        self.check(&format!(
            "{verb} '{}' in {}",
            report.member,
            archive.display()
        ));

        if self.verbose {
            self.line(&format!(
                "  Member size:      {}",
                Self::format_size(report.bytes_written)
            ));
            self.line(&format!("  Members copied:   {}", report.members_copied));
            self.line(&format!("  Duration:         {:?}", report.duration));
        }

        Ok(())
    }

    fn format_generated(&self, files: &[GeneratedFile]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.check(&format!("Generated {} files", files.len()));
        for file in files {
            self.line(&format!(
                "  {:>10}  {}",
                Self::format_size(file.size),
                file.path.display()
            ));
        }

        Ok(())
    }

    fn format_cycle_outcome(&self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::Exit(ExitReason::Quit) => {
                if !self.quiet {
                    self.line("Leaving the archive editor.");
                }
            }
            CycleOutcome::Exit(ExitReason::EmptyArchive) => {
                self.format_warning("No members found in the archive, or the archive is invalid.");
            }
            CycleOutcome::ExtractFailed { member, error } => {
                self.failure(&format!("Could not extract '{member}': {error}"));
            }
            CycleOutcome::Committed { member, report } => {
                if !self.quiet {
                    self.check(&format!(
                        "'{member}' recompressed into the archive ({})",
                        Self::format_size(report.bytes_written)
                    ));
                }
            }
            CycleOutcome::CommitFailed {
                member,
                error,
                preserved,
            } => {
                self.failure(&format!("Could not write '{member}' back: {error}"));
                self.line(&format!(
                    "  The archive is unchanged. Your edit is kept at {}",
                    preserved.display()
                ));
            }
            CycleOutcome::Abandoned { member } => {
                self.format_warning(&format!(
                    "Edit of '{member}' abandoned; the archive is unchanged."
                ));
            }
        }
    }

    fn format_session_report(&self, archive: &Path, report: &SessionReport) -> Result<()> {
        if !self.quiet && report.cycles() > 0 {
            self.line("");
            self.line(&format!(
                "Session on {}: {} committed, {} abandoned, {} failed",
                archive.display(),
                report.committed,
                report.abandoned,
                report.commit_failures + report.extract_failures
            ));
        }

        if !report.preserved.is_empty() {
            self.format_warning("Edited copies that could not be written back:");
            for path in &report.preserved {
                self.line(&format!("  {}", path.display()));
            }
        }

        Ok(())
    }

    fn format_success(&self, message: &str) {
        if !self.quiet {
            self.check(message);
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            self.line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            self.line(&format!("WARNING: {message}"));
        }
    }

    fn shows_spinner(&self) -> bool {
        !self.quiet && self.term.is_term()
    }
}
