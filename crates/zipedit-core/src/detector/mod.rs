//! Completion detector: decides when an external editor is done with a
//! file.
//!
//! A [`WatchSession`] is a two-state machine (`Watching -> Closed`) bound
//! to one path. Filesystem events come from an [`EventSource`]; each
//! modification of the bound path runs a [`ReleaseProbe`], and the first
//! successful probe closes the session and fires its callback. The blocking
//! [`watch`] loop drives a session until it closes or a
//! [`CancellationToken`] is triggered.
//!
//! The release check is a heuristic. [`AppendProbe`] treats any successful
//! open-for-append after a save as "editing finished", which misfires for
//! editors that save and keep the file open. [`wait_for_confirmation`] is
//! the manual fallback.

mod cancel;
mod probe;
mod session;
mod source;
mod watch;

use std::time::Duration;

pub use cancel::CancellationToken;
pub use probe::AppendProbe;
pub use probe::ReleaseProbe;
pub use session::CompletionCallback;
pub use session::SessionState;
pub use session::WatchSession;
pub use source::EventSource;
pub use source::FsEvent;
pub use source::FsEventKind;
pub use source::NotifySource;
pub use watch::WatchOutcome;
pub use watch::wait_for_confirmation;
pub use watch::watch;
pub use watch::watch_path;

/// Default time the watch loop waits for an event before re-checking the
/// cancellation token.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Detector configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use zipedit_core::DetectorConfig;
///
/// let config = DetectorConfig::default().with_poll_interval(Duration::from_millis(50));
/// assert_eq!(config.poll_interval, Duration::from_millis(50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Upper bound on how long cancellation can go unnoticed.
    pub poll_interval: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl DetectorConfig {
    /// Sets the poll interval. A zero interval is raised to one
    /// millisecond.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }
}
