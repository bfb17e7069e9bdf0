//! The two-state watch session.

use std::path::Path;
use std::path::PathBuf;

use super::FsEvent;
use super::ReleaseProbe;

/// Callback invoked when the edit is judged complete.
pub type CompletionCallback<'a> = Box<dyn FnOnce(&Path) + 'a>;

/// State of a [`WatchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the editor to release the file.
    Watching,
    /// The edit is complete. Terminal.
    Closed,
}

/// One completion detector bound to one file.
///
/// The completion callback is stored inside the session and taken out on
/// the `Watching -> Closed` transition, so it runs at most once no matter
/// how many events arrive afterwards.
pub struct WatchSession<'a> {
    path: PathBuf,
    state: SessionState,
    on_complete: Option<CompletionCallback<'a>>,
}

impl std::fmt::Debug for WatchSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchSession")
            .field("path", &self.path)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> WatchSession<'a> {
    /// Binds a session to `path`.
    ///
    /// Events are matched against `path` literally; pass the same form
    /// (usually canonical) the event source reports.
    pub fn new(path: impl Into<PathBuf>, on_complete: CompletionCallback<'a>) -> Self {
        Self {
            path: path.into(),
            state: SessionState::Watching,
            on_complete: Some(on_complete),
        }
    }

    /// Returns the bound path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns `true` once the session has closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed)
    }

    /// Feeds one event to the session.
    ///
    /// A modification of the bound path runs `probe`; if the probe reports
    /// the file released, the session closes and fires its callback.
    /// Anything else leaves the state unchanged.
    pub fn handle_event(&mut self, event: &FsEvent, probe: &dyn ReleaseProbe) -> SessionState {
        if self.is_closed() {
            tracing::debug!(path = %event.path.display(), "session closed, event ignored");
            return self.state;
        }
        if event.path != self.path || !event.kind.is_trigger() {
            tracing::debug!(path = %event.path.display(), kind = ?event.kind, "event ignored");
            return self.state;
        }
        if !probe.is_released(&self.path) {
            return self.state;
        }

        self.complete();
        self.state
    }

    /// Closes the session and fires the callback, unless already closed.
    ///
    /// Returns `true` if this call performed the transition. Used directly
    /// when completion is confirmed by the user rather than detected.
    pub fn complete(&mut self) -> bool {
        if self.is_closed() {
            return false;
        }

        self.state = SessionState::Closed;
        tracing::info!(path = %self.path.display(), "edit complete");
        if let Some(callback) = self.on_complete.take() {
            callback(&self.path);
        }
        true
    }
}
