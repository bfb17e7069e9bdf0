//! Filesystem event sources.
//!
//! The watch loop pulls events one at a time through [`EventSource`] so it
//! can interleave cancellation checks with waiting. [`NotifySource`] is the
//! production implementation; tests drive the loop with scripted sources.

use std::collections::VecDeque;
use std::path::Path;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::mpsc::channel;
use std::time::Duration;

use notify::Event;
use notify::EventKind;
use notify::RecommendedWatcher;
use notify::RecursiveMode;
use notify::Watcher;

use crate::DetectorError;

/// Coarse classification of a filesystem event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    /// File content or metadata changed.
    Modified,
    /// A file appeared at the path, e.g. an editor renamed its save file
    /// over the original.
    Created,
    /// The file was removed.
    Removed,
    /// Any other event (access, open, close).
    Other,
}

impl FsEventKind {
    /// Returns `true` for kinds that may mean the edit was saved.
    #[must_use]
    pub const fn is_trigger(self) -> bool {
        matches!(self, Self::Modified | Self::Created)
    }
}

impl From<&EventKind> for FsEventKind {
    fn from(kind: &EventKind) -> Self {
        match kind {
            EventKind::Modify(_) => Self::Modified,
            EventKind::Create(_) => Self::Created,
            EventKind::Remove(_) => Self::Removed,
            _ => Self::Other,
        }
    }
}

/// One event concerning one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    /// Path the event refers to.
    pub path: PathBuf,
    /// What happened.
    pub kind: FsEventKind,
}

impl FsEvent {
    /// Creates an event.
    pub fn new(path: impl Into<PathBuf>, kind: FsEventKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Source of filesystem events for the watch loop.
pub trait EventSource {
    /// Waits up to `timeout` for the next event.
    ///
    /// Returns `Ok(None)` when the timeout elapsed without an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the source can no longer deliver events.
    fn next_event(&mut self, timeout: Duration) -> Result<Option<FsEvent>, DetectorError>;
}

/// Event source backed by the platform's native watcher.
///
/// Watches the parent directory of the bound file, non-recursively, since
/// many editors save by replacing the file and a watch on the file itself
/// would be lost at the first save. Events arrive from notify's background
/// thread over a channel; the watcher stops when the source is dropped.
pub struct NotifySource {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    pending: VecDeque<FsEvent>,
}

impl std::fmt::Debug for NotifySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifySource")
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

impl NotifySource {
    /// Starts watching the directory containing `path`.
    ///
    /// # Errors
    ///
    /// Returns `NoParent` if `path` has no parent, `Io` if the parent
    /// cannot be resolved, and `Watch` if the watcher fails to start.
    pub fn new(path: &Path) -> Result<Self, DetectorError> {
        let parent = path
            .parent()
            .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
            .ok_or_else(|| DetectorError::NoParent {
                path: path.to_path_buf(),
            })?;
        let parent = std::fs::canonicalize(parent)?;

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            notify::Config::default(),
        )?;
        watcher.watch(&parent, RecursiveMode::NonRecursive)?;

        tracing::debug!(dir = %parent.display(), "watcher started");
        Ok(Self {
            _watcher: watcher,
            rx,
            pending: VecDeque::new(),
        })
    }
}

impl EventSource for NotifySource {
    fn next_event(&mut self, timeout: Duration) -> Result<Option<FsEvent>, DetectorError> {
        if let Some(event) = self.pending.pop_front() {
            return Ok(Some(event));
        }

        match self.rx.recv_timeout(timeout) {
            Ok(Ok(event)) => {
                let kind = FsEventKind::from(&event.kind);
                self.pending
                    .extend(event.paths.into_iter().map(|p| FsEvent::new(p, kind)));
                Ok(self.pending.pop_front())
            }
            Ok(Err(err)) => {
                tracing::warn!("file watcher reported an error: {err}");
                Ok(None)
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(DetectorError::Io(std::io::Error::other(
                "file watcher stopped delivering events",
            ))),
        }
    }
}
