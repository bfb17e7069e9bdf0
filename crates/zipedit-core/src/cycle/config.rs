//! Edit cycle configuration.

use std::path::PathBuf;

use crate::DetectorConfig;

/// Working directory used when none is configured.
pub const DEFAULT_WORKING_DIR: &str = "temp_extracted";

/// How the cycle learns that an edit is finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaitMode {
    /// Watch the extracted file for a save followed by release.
    #[default]
    Automatic,
    /// Ask the user to confirm.
    Manual,
}

/// Configuration for an [`EditCycle`](super::EditCycle).
///
/// # Examples
///
/// ```
/// use zipedit_core::CycleConfig;
/// use zipedit_core::WaitMode;
///
/// let config = CycleConfig::default()
///     .with_working_dir("scratch")
///     .with_wait_mode(WaitMode::Manual);
///
/// assert_eq!(config.working_dir.to_str(), Some("scratch"));
/// assert_eq!(config.wait_mode, WaitMode::Manual);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleConfig {
    /// Directory receiving extracted members. Created at start, removed at
    /// shutdown.
    pub working_dir: PathBuf,

    /// Completion detection strategy.
    pub wait_mode: WaitMode,

    /// Settings for automatic detection.
    pub detector: DetectorConfig,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from(DEFAULT_WORKING_DIR),
            wait_mode: WaitMode::default(),
            detector: DetectorConfig::default(),
        }
    }
}

impl CycleConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Sets the wait mode.
    #[must_use]
    pub const fn with_wait_mode(mut self, mode: WaitMode) -> Self {
        self.wait_mode = mode;
        self
    }

    /// Sets the detector configuration.
    #[must_use]
    pub const fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }
}
