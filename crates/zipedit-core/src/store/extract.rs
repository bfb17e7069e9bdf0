//! Single-member extraction.

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use super::open_zip;
use crate::NoopProgress;
use crate::Result;
use crate::StoreError;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Removes a partially written file unless the write completed.
struct PartialFileGuard<'a> {
    path: &'a Path,
    armed: bool,
}

impl<'a> PartialFileGuard<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PartialFileGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(self.path);
        }
    }
}

/// Extracts `member` under `dest_dir` and returns the written path.
///
/// Every check (member present, name confined to `dest_dir`) runs before
/// anything touches the filesystem.
pub(super) fn extract_member(archive_path: &Path, member: &str, dest_dir: &Path) -> Result<PathBuf> {
    let mut archive = open_zip(archive_path)?;

    let index = archive
        .index_for_name(member)
        .ok_or_else(|| StoreError::MemberNotFound {
            name: member.to_string(),
        })?;

    let mut entry = archive
        .by_index(index)
        .map_err(|e| StoreError::from_zip(e, archive_path))?;

    let relative = entry
        .enclosed_name()
        .ok_or_else(|| StoreError::PathTraversal {
            name: member.to_string(),
        })?;
    let target = dest_dir.join(relative);

    if entry.is_dir() {
        std::fs::create_dir_all(&target)?;
        return Ok(target);
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let guard = PartialFileGuard::new(&target);
    let mut out = File::create(&target)?;
    let bytes = copy_with_buffer(&mut entry, &mut out, &mut CopyBuffer::new(), &mut NoopProgress)?;
    out.sync_all()?;
    guard.disarm();

    tracing::info!(member, bytes, path = %target.display(), "member extracted");
    Ok(target)
}
