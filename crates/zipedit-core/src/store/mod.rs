//! Archive store: the single-file ZIP container behind the edit cycle.
//!
//! An [`ArchiveStore`] is a handle bound to one archive path. It can create
//! the archive from source files, list its members, extract one member and
//! replace one member in place. Replacement rebuilds the archive into a
//! temporary file next to the original and renames it over the original
//! only once the rebuild succeeded, so a reader never observes a
//! half-written archive.
//!
//! # Examples
//!
//! ```no_run
//! use zipedit_core::ArchiveStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ArchiveStore::open("a.zip");
//! store.create(&["x.txt", "y.txt"])?;
//!
//! let extracted = store.extract_one("x.txt", "temp_extracted".as_ref())?;
//! std::fs::write(&extracted, "HELLO")?;
//! store.replace_one("x.txt", &extracted)?;
//! # Ok(())
//! # }
//! ```

mod create;
mod extract;
mod list;
mod lock;
mod replace;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::CreationReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::ReplaceReport;
use crate::Result;
use crate::StoreConfig;
use crate::StoreError;

/// Prefix of temporary files the store writes next to an archive.
pub const TEMP_PREFIX: &str = ".zipedit-";

/// Handle to one ZIP archive on disk.
///
/// The archive does not need to exist when the handle is opened; only
/// [`create`](Self::create) brings it into existence. All operations on the
/// same archive path are serialized through a process-wide lock, so two
/// handles for one path never interleave a rebuild with a read.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    path: PathBuf,
    config: StoreConfig,
    lock: Arc<Mutex<()>>,
}

impl ArchiveStore {
    /// Opens a store for `path` with the default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let lock = lock::archive_lock(&path);
        Self {
            path,
            config: StoreConfig::default(),
            lock,
        }
    }

    /// Opens a store for `path` with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config<P: AsRef<Path>>(path: P, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        let mut store = Self::open(path);
        store.config = config;
        Ok(store)
    }

    /// Returns the archive path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Creates (or overwrites) the archive from `sources`.
    ///
    /// Each source becomes one member named after its base name. Sources
    /// that do not exist, are directories, or repeat an earlier base name
    /// are skipped with a warning; the archive is written with whatever
    /// members remain.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be written or a source that
    /// exists cannot be read.
    pub fn create<Q: AsRef<Path>>(&self, sources: &[Q]) -> Result<CreationReport> {
        self.create_with_progress(sources, &mut NoopProgress)
    }

    /// Creates the archive like [`create`](Self::create), reporting
    /// per-member progress.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn create_with_progress<Q: AsRef<Path>>(
        &self,
        sources: &[Q],
        progress: &mut dyn ProgressCallback,
    ) -> Result<CreationReport> {
        let _guard = self.guard();
        create::create_zip(&self.path, sources, &self.config, progress)
    }

    /// Lists member names in archive order.
    ///
    /// Never fails: a missing or corrupt archive is logged and yields an
    /// empty list. Use [`try_list`](Self::try_list) to get the diagnostic.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        match self.try_list() {
            Ok(names) => names,
            Err(err) => {
                tracing::error!(archive = %self.path.display(), "cannot list archive: {err}");
                Vec::new()
            }
        }
    }

    /// Lists member names in archive order.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveMissing` or `InvalidArchive` when the archive cannot
    /// be read.
    pub fn try_list(&self) -> Result<Vec<String>> {
        let _guard = self.guard();
        list::list_members(&self.path)
    }

    /// Extracts `member` to `dest_dir`, using the member name as the
    /// relative path. Parent directories are created as needed.
    ///
    /// Returns the path of the extracted file.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound`, `InvalidArchive`, `ArchiveMissing` or
    /// `PathTraversal`; in all of these cases no file is created.
    pub fn extract_one(&self, member: &str, dest_dir: &Path) -> Result<PathBuf> {
        let _guard = self.guard();
        extract::extract_member(&self.path, member, dest_dir)
    }

    /// Replaces the content of `member` with the bytes of `new_content`.
    ///
    /// Every other member is copied verbatim into a temporary archive and
    /// the temporary archive is then renamed over the original. The
    /// replaced member is rewritten at its original position rather than
    /// moved to the end, so [`list`](Self::list) order survives an edit. A
    /// member that does not exist yet is appended.
    ///
    /// # Errors
    ///
    /// Returns `RecompressFailed` wrapping the failing step. The original
    /// archive is unmodified whenever an error is returned.
    pub fn replace_one(&self, member: &str, new_content: &Path) -> Result<ReplaceReport> {
        let _guard = self.guard();
        replace::replace_member(&self.path, member, new_content, &self.config)
            .map_err(|err| err.into_recompress_failure(member))
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Opens an existing archive for reading.
fn open_zip(path: &Path) -> Result<zip::ZipArchive<BufReader<File>>> {
    if path.is_dir() {
        return Err(StoreError::InvalidArchive {
            path: path.to_path_buf(),
            reason: "path is a directory".to_string(),
        });
    }

    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::ArchiveMissing {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io(e)
        }
    })?;

    zip::ZipArchive::new(BufReader::new(file)).map_err(|e| StoreError::from_zip(e, path))
}

/// Directory that receives temporary archives for `archive`.
fn temp_dir_for(archive: &Path) -> &Path {
    archive
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Creates a temporary file next to `archive`.
fn temp_file_for(archive: &Path) -> Result<tempfile::NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .suffix(".tmp")
        .tempfile_in(temp_dir_for(archive))?;
    Ok(file)
}

/// Converts a `zip` writer error into an I/O error with context.
fn write_error(what: &str, err: zip::result::ZipError) -> StoreError {
    match err {
        zip::result::ZipError::Io(io) => StoreError::Io(io),
        other => StoreError::Io(std::io::Error::other(format!("{what}: {other}"))),
    }
}
