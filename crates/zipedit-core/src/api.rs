//! Path-based convenience functions over [`ArchiveStore`].
//!
//! Each call opens a store for the given archive, runs one operation and
//! drops the handle. Use [`ArchiveStore`] directly to run several
//! operations with one configuration.

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveStore;
use crate::CreationReport;
use crate::ReplaceReport;
use crate::Result;
use crate::StoreConfig;

/// Creates an archive at `output` from `sources`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the archive cannot
/// be written. Missing sources are skipped and reported as warnings.
///
/// # Examples
///
/// ```no_run
/// use zipedit_core::StoreConfig;
/// use zipedit_core::create_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = create_archive("a.zip", &["x.txt", "y.txt"], &StoreConfig::default())?;
/// println!("Added {} members", report.members_added);
/// # Ok(())
/// # }
/// ```
pub fn create_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    output: P,
    sources: &[Q],
    config: &StoreConfig,
) -> Result<CreationReport> {
    ArchiveStore::with_config(output, config.clone())?.create(sources)
}

/// Lists the members of `archive` in archive order.
///
/// # Errors
///
/// Returns `ArchiveMissing` or `InvalidArchive` if the archive cannot be
/// read.
pub fn list_members<P: AsRef<Path>>(archive: P) -> Result<Vec<String>> {
    ArchiveStore::open(archive).try_list()
}

/// Extracts `member` of `archive` under `dest_dir`.
///
/// # Errors
///
/// See [`ArchiveStore::extract_one`].
pub fn extract_member<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    member: &str,
    dest_dir: Q,
) -> Result<PathBuf> {
    ArchiveStore::open(archive).extract_one(member, dest_dir.as_ref())
}

/// Replaces `member` of `archive` with the bytes of `new_content`.
///
/// # Errors
///
/// See [`ArchiveStore::replace_one`].
pub fn replace_member<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    member: &str,
    new_content: Q,
    config: &StoreConfig,
) -> Result<ReplaceReport> {
    ArchiveStore::with_config(archive, config.clone())?.replace_one(member, new_content.as_ref())
}
