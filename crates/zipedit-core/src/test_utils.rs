//! Test utilities for building and reading ZIP fixtures.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// Creates an in-memory ZIP archive from a list of `(name, content)`
/// entries, deflate-compressed, in the given order.
///
/// # Examples
///
/// ```
/// use zipedit_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(&[("file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// assert_eq!(&zip_data[0..4], b"PK\x03\x04");
/// ```
#[must_use]
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Writes [`create_test_zip`] output to `path`.
pub fn write_test_zip(path: &Path, entries: &[(&str, &[u8])]) {
    std::fs::write(path, create_test_zip(entries)).unwrap();
}

/// Reads every member of the archive at `path` as `(name, content)` in
/// archive order.
#[must_use]
pub fn read_test_zip(path: &Path) -> Vec<(String, Vec<u8>)> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut members = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        members.push((entry.name().to_string(), content));
    }

    members
}

/// Reads the raw (still compressed) bytes of every member, keyed by name.
///
/// Used to check that untouched members survive a rebuild bit for bit.
#[must_use]
pub fn read_raw_members(path: &Path) -> Vec<(String, Vec<u8>)> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut members = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index_raw(i).unwrap();
        let mut raw = Vec::new();
        entry.read_to_end(&mut raw).unwrap();
        members.push((entry.name().to_string(), raw));
    }

    members
}
