//! Configuration for archive store operations.

use crate::Result;
use crate::StoreError;

/// Default deflate level used when writing members.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Configuration shared by all store operations that write archives.
///
/// # Examples
///
/// ```
/// use zipedit_core::StoreConfig;
///
/// // Deflate at the balanced default level
/// let config = StoreConfig::default();
/// assert_eq!(config.compression_level, Some(6));
///
/// // Store members uncompressed
/// let stored = StoreConfig::default().with_compression_level(0);
/// assert!(stored.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Deflate level (1-9) for written members, `0` to store them
    /// uncompressed, `None` for the codec default.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(DEFAULT_COMPRESSION_LEVEL),
        }
    }
}

impl StoreConfig {
    /// Creates a new `StoreConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// Out-of-range values are accepted here and rejected by
    /// [`validate`](Self::validate), which every store constructor calls.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is above 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(StoreError::InvalidCompressionLevel { level });
        }
        Ok(())
    }

    /// Builds the `zip` writer options for new members.
    pub(crate) fn file_options(&self) -> zip::write::SimpleFileOptions {
        use zip::CompressionMethod;
        use zip::write::SimpleFileOptions;

        match self.compression_level {
            Some(0) => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
            level => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(level.map(i64::from)),
        }
    }
}
