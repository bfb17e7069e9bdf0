//! Error conversion utilities for CLI.
//!
//! Converts zipedit-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use zipedit_core::CycleError;
use zipedit_core::DetectorError;
use zipedit_core::StoreError;

/// Converts `StoreError` to user-friendly anyhow error with context
pub fn convert_store_error(err: StoreError, archive: &Path) -> anyhow::Error {
    match err {
        StoreError::ArchiveMissing { path } => anyhow!(
            "Archive not found: {}\n\
             HINT: Check the path, or build one with 'zipedit create'.",
            path.display()
        ),
        StoreError::InvalidArchive { path, reason } => anyhow!(
            "Invalid archive '{}': {reason}\n\
             HINT: The archive may be corrupted or is not a ZIP file.",
            path.display()
        ),
        StoreError::MemberNotFound { name } => anyhow!(
            "Member '{name}' not found in '{}'\n\
             HINT: Run 'zipedit list {}' to see the available members.",
            archive.display(),
            archive.display()
        ),
        StoreError::PathTraversal { name } => anyhow!(
            "Security violation: member '{name}' of '{}' would be written outside \
             the destination directory\n\
             HINT: This archive may be malicious. Do not extract from untrusted sources.",
            archive.display()
        ),
        StoreError::SourceMissing { path } => anyhow!(
            "Source file not found: {}",
            path.display()
        ),
        StoreError::RecompressFailed { member, source } => anyhow!(
            "Failed to write '{member}' into '{}': {source}\n\
             HINT: The archive was left unchanged.",
            archive.display()
        ),
        StoreError::InvalidCompressionLevel { level } => anyhow!(
            "Invalid compression level {level}\n\
             HINT: Use a level between 1 and 9."
        ),
        StoreError::Io(io_err) => anyhow!(
            "I/O error while processing '{}': {io_err}",
            archive.display()
        ),
    }
}

/// Adds context to a store result about the archive it ran against
pub fn add_archive_context<T>(result: Result<T, StoreError>, archive: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_store_error(e, archive))
}

/// Converts a fatal edit-session error
pub fn convert_cycle_error(err: CycleError) -> anyhow::Error {
    match err {
        CycleError::WorkingDir { path, source } => anyhow!(
            "Cannot prepare working directory '{}': {source}\n\
             HINT: Choose another location with --work-dir.",
            path.display()
        ),
        CycleError::Detector(DetectorError::NoParent { path }) => anyhow!(
            "Cannot watch '{}': it has no parent directory\n\
             HINT: Use --work-dir with a directory path.",
            path.display()
        ),
        CycleError::Detector(detector_err) => anyhow!(
            "File watching failed: {detector_err}\n\
             HINT: Use --manual to confirm each edit by pressing Enter."
        ),
        CycleError::Prompt(io_err) => anyhow!("Could not read your selection: {io_err}"),
    }
}
