//! Scratch directory for extracted members.

use std::path::Path;
use std::path::PathBuf;

use crate::CycleError;

/// Directory holding extracted working copies for the whole session.
///
/// Created on [`create`](Self::create) and removed recursively by
/// [`cleanup`](Self::cleanup), or on drop if cleanup was never called.
/// Files whose recompression failed are registered with
/// [`preserve`](Self::preserve); while any exist the directory is kept so
/// the edits are not lost.
#[derive(Debug)]
pub struct WorkingDir {
    path: PathBuf,
    preserved: Vec<KeptCopy>,
    released: bool,
}

#[derive(Debug)]
struct KeptCopy {
    member: String,
    path: PathBuf,
}

impl WorkingDir {
    /// Creates the directory (and parents) if absent.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::WorkingDir` if the directory cannot be created.
    /// The edit cycle cannot run without it.
    pub fn create<P: Into<PathBuf>>(path: P) -> Result<Self, CycleError> {
        let path = path.into();
        std::fs::create_dir_all(&path).map_err(|source| CycleError::WorkingDir {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "working directory ready");
        Ok(Self {
            path,
            preserved: Vec::new(),
            released: false,
        })
    }

    /// Returns the directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Marks `file` as holding an edit of `member` that could not be saved.
    ///
    /// A member has at most one kept copy; preserving it again replaces the
    /// recorded path.
    pub fn preserve(&mut self, member: &str, file: PathBuf) {
        match self.preserved.iter_mut().find(|kept| kept.member == member) {
            Some(kept) => kept.path = file,
            None => self.preserved.push(KeptCopy {
                member: member.to_string(),
                path: file,
            }),
        }
    }

    /// Returns the kept copy of `member`, if an earlier save of it failed.
    #[must_use]
    pub fn preserved_copy(&self, member: &str) -> Option<&Path> {
        self.preserved
            .iter()
            .find(|kept| kept.member == member)
            .map(|kept| kept.path.as_path())
    }

    /// Forgets the kept copy of `member` once its edit has been saved.
    pub fn release(&mut self, member: &str) {
        self.preserved.retain(|kept| kept.member != member);
    }

    /// Files kept because their edit could not be saved.
    pub fn preserved(&self) -> impl Iterator<Item = &Path> {
        self.preserved.iter().map(|kept| kept.path.as_path())
    }

    /// Removes the directory, unless files are preserved in it.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::WorkingDir` if removal fails.
    pub fn cleanup(mut self) -> Result<(), CycleError> {
        self.released = true;
        self.remove()
    }

    fn remove(&self) -> Result<(), CycleError> {
        if !self.preserved.is_empty() {
            for kept in &self.preserved {
                tracing::warn!(
                    member = %kept.member,
                    path = %kept.path.display(),
                    "unsaved edit kept in working directory"
                );
            }
            return Ok(());
        }

        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "working directory removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CycleError::WorkingDir {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.remove();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_cleanup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("temp_extracted");

        let dir = WorkingDir::create(&path).unwrap();
        std::fs::write(dir.path().join("x.txt"), "copy").unwrap();
        assert!(path.is_dir());

        dir.cleanup().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_reuses_existing_directory() {
        let temp = TempDir::new().unwrap();
        let dir = WorkingDir::create(temp.path()).unwrap();
        assert_eq!(dir.path(), temp.path());
    }

    #[test]
    fn test_drop_removes_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("work");
        drop(WorkingDir::create(&path).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_preserved_files_survive_cleanup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("work");
        let mut dir = WorkingDir::create(&path).unwrap();
        let kept = path.join("x.txt");
        std::fs::write(&kept, "unsaved edit").unwrap();

        dir.preserve("x.txt", kept.clone());
        dir.preserve("x.txt", kept.clone());
        assert_eq!(dir.preserved().count(), 1);
        assert_eq!(dir.preserved_copy("x.txt"), Some(kept.as_path()));
        assert_eq!(dir.preserved_copy("y.txt"), None);

        dir.cleanup().unwrap();
        assert_eq!(std::fs::read_to_string(&kept).unwrap(), "unsaved edit");
    }

    #[test]
    fn test_released_copy_no_longer_blocks_cleanup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("work");
        let mut dir = WorkingDir::create(&path).unwrap();

        dir.preserve("x.txt", path.join("x.txt"));
        dir.release("x.txt");
        assert_eq!(dir.preserved_copy("x.txt"), None);

        dir.cleanup().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_create_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = WorkingDir::create(blocker.join("sub")).unwrap_err();
        assert!(matches!(err, CycleError::WorkingDir { .. }));
    }
}
