//! Member enumeration.

use std::path::Path;

use super::open_zip;
use crate::Result;
use crate::StoreError;

/// Returns member names in central-directory order.
pub(super) fn list_members(archive_path: &Path) -> Result<Vec<String>> {
    let mut archive = open_zip(archive_path)?;
    let mut names = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        // Raw access reads only the header, so encrypted or unsupported
        // members are still listed.
        let entry = archive
            .by_index_raw(i)
            .map_err(|e| StoreError::from_zip(e, archive_path))?;
        names.push(entry.name().to_string());
    }

    Ok(names)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::write_test_zip;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_list_preserves_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.zip");
        write_test_zip(
            &path,
            &[("b.txt", b"b"), ("a.txt", b"a"), ("dir/c.txt", b"c")],
        );

        let names = list_members(&path).unwrap();
        assert_eq!(names, vec!["b.txt", "a.txt", "dir/c.txt"]);
    }

    #[test]
    fn test_list_empty_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.zip");
        write_test_zip(&path, &[]);

        assert!(list_members(&path).unwrap().is_empty());
    }

    #[test]
    fn test_list_not_a_zip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("text.zip");
        fs::write(&path, "this is not a zip archive\n".repeat(20)).unwrap();

        let err = list_members(&path).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArchive { .. }), "{err:?}");
    }

    #[test]
    fn test_list_missing_archive() {
        let temp = TempDir::new().unwrap();
        let err = list_members(&temp.path().join("nope.zip")).unwrap_err();
        assert!(matches!(err, StoreError::ArchiveMissing { .. }));
    }
}
