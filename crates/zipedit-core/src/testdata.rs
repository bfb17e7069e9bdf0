//! Test-data generator used to seed demonstrations.
//!
//! Files are filled with pseudo-random bytes so they barely compress,
//! which keeps archive timings honest.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Extensions cycled through when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["txt", "log", "csv", "json", "xml"];

/// Size increment between consecutive files, in KiB.
const STEP_KB: u64 = 50;

const CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for [`generate`].
///
/// # Examples
///
/// ```
/// use zipedit_core::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_count(5)
///     .with_base_size_kb(500);
///
/// assert_eq!(config.file_size(0), Some(500 * 1024));
/// assert_eq!(config.file_size(2), Some(600 * 1024));
/// assert_eq!(config.file_name(4), "test_file_5.xml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of files to generate.
    pub count: usize,

    /// Size of the first file in KiB; each following file is 50 KiB larger.
    pub base_size_kb: u64,

    /// Extensions assigned round-robin.
    pub extensions: Vec<String>,

    /// Directory receiving the files.
    pub output_dir: PathBuf,

    /// Seed for reproducible content; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 3,
            base_size_kb: 100,
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            output_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Sets the number of files.
    #[must_use]
    pub const fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the base file size in KiB.
    #[must_use]
    pub const fn with_base_size_kb(mut self, kb: u64) -> Self {
        self.base_size_kb = kb;
        self
    }

    /// Replaces the extension list. Leading dots are stripped.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Makes the generated content reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Name of the file with 0-based index `i`.
    ///
    /// Falls back to `bin` when the extension list is empty.
    #[must_use]
    pub fn file_name(&self, i: usize) -> String {
        let ext = if self.extensions.is_empty() {
            "bin"
        } else {
            &self.extensions[i % self.extensions.len()]
        };
        format!("test_file_{}.{ext}", i + 1)
    }

    /// Size in bytes of the file with 0-based index `i`, or `None` if it
    /// does not fit in a `u64`.
    #[must_use]
    pub fn file_size(&self, i: usize) -> Option<u64> {
        u64::try_from(i)
            .ok()?
            .checked_mul(STEP_KB)?
            .checked_add(self.base_size_kb)?
            .checked_mul(1024)
    }
}

/// Writes the configured files and returns their paths in order.
///
/// Existing files with the same names are overwritten.
///
/// # Errors
///
/// Returns `InvalidInput` before writing anything if a file size does not
/// fit in a `u64`. Otherwise returns an error if the output directory
/// cannot be created or a file cannot be written; files written before the
/// failure are removed.
pub fn generate(config: &GeneratorConfig) -> std::io::Result<Vec<PathBuf>> {
    let sizes: Vec<u64> = (0..config.count)
        .map(|i| config.file_size(i))
        .collect::<Option<_>>()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!(
                    "file sizes overflow: {} files starting at {} KiB",
                    config.count, config.base_size_kb
                ),
            )
        })?;
    std::fs::create_dir_all(&config.output_dir)?;

    let mut rng = config
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let mut generated = Vec::with_capacity(config.count);

    for (i, size) in sizes.into_iter().enumerate() {
        let path = config.output_dir.join(config.file_name(i));

        if let Err(err) = write_random(&path, size, &mut rng) {
            remove_generated(&generated);
            let _ = std::fs::remove_file(&path);
            return Err(err);
        }

        tracing::info!(path = %path.display(), size, "test file generated");
        generated.push(path);
    }

    Ok(generated)
}

fn write_random(path: &Path, size: u64, rng: &mut StdRng) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut remaining = size;

    while remaining > 0 {
        let len = usize::try_from(remaining).map_or(CHUNK_SIZE, |r| r.min(CHUNK_SIZE));
        rng.fill(&mut chunk[..len]);
        out.write_all(&chunk[..len])?;
        remaining -= len as u64;
    }

    out.flush()
}

/// Removes previously generated files, returning how many were deleted.
///
/// Files that are already gone are skipped silently; other failures are
/// logged and do not stop the sweep.
pub fn remove_generated(paths: &[PathBuf]) -> usize {
    let mut removed = 0;
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %path.display(), "cannot remove generated file: {err}");
            }
        }
    }
    removed
}
