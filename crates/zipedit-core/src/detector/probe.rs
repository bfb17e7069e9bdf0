//! Heuristic check for "the editor let go of the file".

use std::fs::OpenOptions;
use std::path::Path;

/// Decides whether an external process has released a file.
///
/// Implementations must not modify the file. A platform-specific lock
/// check can replace [`AppendProbe`] without touching the watch loop.
pub trait ReleaseProbe: Send {
    /// Returns `true` if the file appears to be released.
    fn is_released(&self, path: &Path) -> bool;
}

/// Opens the file for appending and closes it again immediately.
///
/// Success is taken as evidence that no writer holds the file. This
/// over-approximates: on platforms without mandatory locking the open
/// nearly always succeeds, and editors that drop and reacquire their
/// handle during autosave will look finished.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppendProbe;

impl ReleaseProbe for AppendProbe {
    fn is_released(&self, path: &Path) -> bool {
        match OpenOptions::new().append(true).open(path) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(path = %path.display(), "file still busy: {err}");
                false
            }
        }
    }
}

impl<F> ReleaseProbe for F
where
    F: Fn(&Path) -> bool + Send,
{
    fn is_released(&self, path: &Path) -> bool {
        self(path)
    }
}
