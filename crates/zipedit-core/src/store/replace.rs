//! In-place member replacement.
//!
//! The archive is rebuilt into a temporary file in the same directory:
//! untouched members are raw-copied (still compressed, byte for byte), the
//! replaced member is re-encoded from the new content at its original
//! position. Only after the temporary archive is complete and synced is it
//! renamed over the original.

use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::open_zip;
use super::temp_file_for;
use super::write_error;
use crate::NoopProgress;
use crate::ReplaceReport;
use crate::Result;
use crate::StoreConfig;
use crate::StoreError;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Rebuilds `archive_path` with `member` taking the bytes of `new_content`.
///
/// Errors are returned unwrapped; the caller tags them as a recompress
/// failure.
pub(super) fn replace_member(
    archive_path: &Path,
    member: &str,
    new_content: &Path,
    config: &StoreConfig,
) -> Result<ReplaceReport> {
    let start = Instant::now();
    let mut source = open_zip(archive_path)?;
    let original_permissions = std::fs::metadata(archive_path)?.permissions();

    let mut temp = temp_file_for(archive_path)?;
    let mut report = rebuild_into(
        &mut source,
        temp.as_file_mut(),
        archive_path,
        member,
        new_content,
        config.file_options(),
    )?;
    temp.as_file().sync_all()?;
    std::fs::set_permissions(temp.path(), original_permissions)?;

    // Release the original before the swap; some platforms refuse to
    // replace a file that is still open.
    drop(source);
    temp.persist(archive_path)
        .map_err(|e| StoreError::Io(e.error))?;

    report.duration = start.elapsed();
    tracing::info!(
        archive = %archive_path.display(),
        member,
        replaced = report.replaced,
        copied = report.members_copied,
        "member recompressed"
    );
    Ok(report)
}

/// Writes the rebuilt archive to `writer`.
pub(crate) fn rebuild_into<R: Read + Seek, W: Write + Seek>(
    source: &mut ZipArchive<R>,
    writer: W,
    archive_path: &Path,
    member: &str,
    new_content: &Path,
    options: SimpleFileOptions,
) -> Result<ReplaceReport> {
    let mut zip = ZipWriter::new(writer);
    let mut buffer = CopyBuffer::new();
    let mut report = ReplaceReport {
        member: member.to_string(),
        ..ReplaceReport::default()
    };

    for i in 0..source.len() {
        let entry = source
            .by_index_raw(i)
            .map_err(|e| StoreError::from_zip(e, archive_path))?;

        if entry.name() == member {
            drop(entry);
            report.bytes_written =
                write_content(&mut zip, member, new_content, options, &mut buffer)?;
            report.replaced = true;
            continue;
        }

        zip.raw_copy_file(entry)
            .map_err(|e| write_error("failed to copy member", e))?;
        report.members_copied += 1;
    }

    if !report.replaced {
        report.bytes_written = write_content(&mut zip, member, new_content, options, &mut buffer)?;
    }

    zip.finish()
        .map_err(|e| write_error("failed to finish ZIP archive", e))?;

    Ok(report)
}

fn write_content<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    member: &str,
    new_content: &Path,
    options: SimpleFileOptions,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let mut content = File::open(new_content).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::SourceMissing {
                path: new_content.to_path_buf(),
            }
        } else {
            StoreError::Io(e)
        }
    })?;

    zip.start_file(member, options)
        .map_err(|e| write_error("failed to start member in ZIP", e))?;
    copy_with_buffer(&mut content, zip, buffer, &mut NoopProgress)
}
