//! Error types for archive store, detector and edit cycle operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the archive store.
///
/// Every store operation converts failures of the underlying `zip` crate
/// and the filesystem into one of these variants before returning, so the
/// edit cycle never sees a raw library error.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file passed to archive creation does not exist.
    #[error("source file not found: {path}")]
    SourceMissing {
        /// The missing source path.
        path: PathBuf,
    },

    /// The archive path does not resolve to a file.
    #[error("archive not found: {path}")]
    ArchiveMissing {
        /// The archive path.
        path: PathBuf,
    },

    /// The archive exists but is not a structurally valid ZIP container.
    #[error("invalid archive {path}: {reason}")]
    InvalidArchive {
        /// The archive path.
        path: PathBuf,
        /// What the container parser rejected.
        reason: String,
    },

    /// The requested member is absent from the archive.
    #[error("member not found in archive: {name}")]
    MemberNotFound {
        /// The requested member name.
        name: String,
    },

    /// The member name would be written outside the destination directory.
    #[error("member name escapes the destination directory: {name}")]
    PathTraversal {
        /// The offending member name.
        name: String,
    },

    /// Rebuilding the archive failed; the original archive is unmodified.
    #[error("failed to recompress member '{member}': {source}")]
    RecompressFailed {
        /// The member being replaced.
        member: String,
        /// The step that failed.
        #[source]
        source: Box<StoreError>,
    },

    /// Store configuration is invalid.
    #[error("invalid compression level {level}, must be 0-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },
}

impl StoreError {
    /// Returns `true` if the archive itself could not be read, either
    /// because the path is missing or the container is corrupt.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use zipedit_core::StoreError;
    ///
    /// let err = StoreError::ArchiveMissing {
    ///     path: PathBuf::from("a.zip"),
    /// };
    /// assert!(err.is_unreadable_archive());
    ///
    /// let err = StoreError::MemberNotFound {
    ///     name: "x.txt".to_string(),
    /// };
    /// assert!(!err.is_unreadable_archive());
    /// ```
    #[must_use]
    pub const fn is_unreadable_archive(&self) -> bool {
        matches!(
            self,
            Self::ArchiveMissing { .. } | Self::InvalidArchive { .. }
        )
    }

    /// Returns `true` if the failure is confined to the current operation
    /// and the caller may simply try another member or input.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipedit_core::StoreError;
    ///
    /// let err = StoreError::MemberNotFound {
    ///     name: "missing.txt".to_string(),
    /// };
    /// assert!(err.is_recoverable());
    ///
    /// let err = StoreError::InvalidCompressionLevel { level: 12 };
    /// assert!(!err.is_recoverable());
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SourceMissing { .. }
                | Self::MemberNotFound { .. }
                | Self::PathTraversal { .. }
                | Self::RecompressFailed { .. }
        )
    }

    /// Wraps this error as the cause of a failed recompression.
    #[must_use]
    pub fn into_recompress_failure(self, member: impl Into<String>) -> Self {
        match self {
            already @ Self::RecompressFailed { .. } => already,
            other => Self::RecompressFailed {
                member: member.into(),
                source: Box::new(other),
            },
        }
    }

    /// Converts a `zip` crate error raised while reading `path`.
    pub(crate) fn from_zip(err: zip::result::ZipError, path: &std::path::Path) -> Self {
        match err {
            zip::result::ZipError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                Self::ArchiveMissing {
                    path: path.to_path_buf(),
                }
            }
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}

/// Errors raised by the completion detector.
#[derive(Error, Debug)]
pub enum DetectorError {
    /// The filesystem watcher could not be started or failed while running.
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The watched file has no parent directory to observe.
    #[error("cannot watch {path}: no parent directory")]
    NoParent {
        /// The path that was to be watched.
        path: PathBuf,
    },
}

/// Fatal errors of the edit cycle.
///
/// Archive failures are reported through `CycleOutcome`, not through this
/// type; only conditions that stop the whole session end up here.
#[derive(Error, Debug)]
pub enum CycleError {
    /// The working directory could not be created or removed.
    #[error("working directory {path}: {source}")]
    WorkingDir {
        /// The working directory path.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Reading the user's selection failed.
    #[error("prompt I/O error: {0}")]
    Prompt(#[from] std::io::Error),

    /// The completion wait could not be started.
    #[error(transparent)]
    Detector(#[from] DetectorError),
}
