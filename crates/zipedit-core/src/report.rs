//! Store operation reporting.

use std::time::Duration;

/// Report of an archive creation.
///
/// # Examples
///
/// ```
/// use zipedit_core::CreationReport;
///
/// let mut report = CreationReport::new();
/// report.members_added = 2;
/// report.add_warning("source not found: gone.txt");
///
/// assert!(report.has_warnings());
/// assert_eq!(report.members_added, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// Number of members written to the archive.
    pub members_added: usize,

    /// Number of sources skipped (missing, directories or duplicate names).
    pub sources_skipped: usize,

    /// Total uncompressed bytes written.
    pub bytes_written: u64,

    /// Size of the finished archive file.
    pub archive_size: u64,

    /// Duration of the creation.
    pub duration: Duration,

    /// Warnings generated during creation.
    pub warnings: Vec<String>,
}

impl CreationReport {
    /// Creates a new empty creation report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the space saved by compression as a percentage.
    ///
    /// Returns 0.0 when nothing was written.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 || self.archive_size >= self.bytes_written {
            return 0.0;
        }
        (1.0 - self.archive_size as f64 / self.bytes_written as f64) * 100.0
    }
}

/// Report of a member replacement.
#[derive(Debug, Clone, Default)]
pub struct ReplaceReport {
    /// Member that received the new content.
    pub member: String,

    /// Whether the member existed before (`false` means it was appended).
    pub replaced: bool,

    /// Number of other members copied verbatim.
    pub members_copied: usize,

    /// Uncompressed bytes written for the replaced member.
    pub bytes_written: u64,

    /// Duration of the rebuild and swap.
    pub duration: Duration,
}

/// Callback trait for progress reporting while an archive is written.
///
/// The trait requires `Send` so that implementations can be moved to a
/// worker thread.
///
/// # Examples
///
/// ```
/// use zipedit_core::ProgressCallback;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, name: &str, total: usize, current: usize) {
///         println!("Adding {}/{}: {}", current, total, name);
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, name: &str) {
///         println!("Added: {}", name);
///     }
///
///     fn on_complete(&mut self) {
///         println!("Archive complete");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called when starting to add a member.
    ///
    /// # Arguments
    ///
    /// * `name` - Member name being written
    /// * `total` - Total number of sources
    /// * `current` - Current source number (1-indexed)
    fn on_entry_start(&mut self, name: &str, total: usize, current: usize);

    /// Called for each chunk of member data written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called when a member has been completely written.
    fn on_entry_complete(&mut self, name: &str);

    /// Called when the archive is finished.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _name: &str, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _name: &str) {}

    fn on_complete(&mut self) {}
}
