//! Archive creation from source files.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use zip::ZipWriter;

use super::temp_file_for;
use super::write_error;
use crate::CreationReport;
use crate::ProgressCallback;
use crate::Result;
use crate::StoreConfig;
use crate::StoreError;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;

/// Writes a new archive at `output` containing one member per usable
/// source, named after the source's base name.
pub(super) fn create_zip<Q: AsRef<Path>>(
    output: &Path,
    sources: &[Q],
    config: &StoreConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<CreationReport> {
    let start = Instant::now();
    let mut report = CreationReport::default();
    let options = config.file_options();
    let total = sources.len();

    let mut temp = temp_file_for(output)?;
    let mut names = HashSet::with_capacity(total);
    let mut buffer = CopyBuffer::new();

    {
        let mut zip = ZipWriter::new(temp.as_file_mut());

        for (idx, source) in sources.iter().enumerate() {
            let path = source.as_ref();

            let Some(name) = member_name(path, &names, &mut report) else {
                continue;
            };

            progress.on_entry_start(&name, total, idx + 1);

            let mut file = File::open(path)?;
            zip.start_file(name.as_str(), options)
                .map_err(|e| write_error("failed to start member in ZIP", e))?;
            let bytes = copy_with_buffer(&mut file, &mut zip, &mut buffer, progress)?;

            report.members_added += 1;
            report.bytes_written += bytes;
            progress.on_entry_complete(&name);
            tracing::debug!(member = %name, bytes, "added member");
            names.insert(name);
        }

        zip.finish()
            .map_err(|e| write_error("failed to finish ZIP archive", e))?;
    }

    temp.as_file().sync_all()?;
    temp.persist(output).map_err(|e| StoreError::Io(e.error))?;

    report.archive_size = std::fs::metadata(output)?.len();
    report.duration = start.elapsed();
    progress.on_complete();

    tracing::info!(
        archive = %output.display(),
        members = report.members_added,
        skipped = report.sources_skipped,
        "archive created"
    );

    Ok(report)
}

/// Returns the member name for `path`, or records why the source is
/// skipped.
fn member_name(
    path: &Path,
    taken: &HashSet<String>,
    report: &mut CreationReport,
) -> Option<String> {
    let mut skip = |reason: String| {
        tracing::warn!("{reason}");
        report.sources_skipped += 1;
        report.add_warning(reason);
        None
    };

    if !path.exists() {
        return skip(
            StoreError::SourceMissing {
                path: path.to_path_buf(),
            }
            .to_string(),
        );
    }

    if path.is_dir() {
        return skip(format!("skipped directory: {}", path.display()));
    }

    let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return skip(format!("skipped source without a file name: {}", path.display()));
    };

    if taken.contains(&name) {
        return skip(format!(
            "skipped duplicate member name '{name}': {}",
            path.display()
        ));
    }

    Some(name)
}
