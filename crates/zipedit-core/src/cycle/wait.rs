//! Strategies for waiting until an edit is finished.

use std::io::BufRead;
use std::io::Write;
use std::path::Path;

use super::SharedTerminal;
use crate::CancellationToken;
use crate::CompletionCallback;
use crate::DetectorConfig;
use crate::DetectorError;
use crate::WatchOutcome;
use crate::WatchSession;
use crate::detector;

/// Blocks until the edit of one extracted file is finished.
pub trait CompletionWait {
    /// Waits for `path` to be released, then runs `on_complete` once.
    ///
    /// Returns [`WatchOutcome::Cancelled`] without running the callback if
    /// `cancel` fires first.
    ///
    /// # Errors
    ///
    /// Returns an error if waiting cannot start or is interrupted by a
    /// failure.
    fn wait(
        &mut self,
        path: &Path,
        cancel: &CancellationToken,
        on_complete: CompletionCallback<'_>,
    ) -> Result<WatchOutcome, DetectorError>;
}

impl<T: CompletionWait + ?Sized> CompletionWait for Box<T> {
    fn wait(
        &mut self,
        path: &Path,
        cancel: &CancellationToken,
        on_complete: CompletionCallback<'_>,
    ) -> Result<WatchOutcome, DetectorError> {
        (**self).wait(path, cancel, on_complete)
    }
}

/// Filesystem-event driven detection.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutomaticWait {
    config: DetectorConfig,
}

impl AutomaticWait {
    /// Creates an automatic wait with the given detector settings.
    #[must_use]
    pub const fn new(config: DetectorConfig) -> Self {
        Self { config }
    }
}

impl CompletionWait for AutomaticWait {
    fn wait(
        &mut self,
        path: &Path,
        cancel: &CancellationToken,
        on_complete: CompletionCallback<'_>,
    ) -> Result<WatchOutcome, DetectorError> {
        detector::watch_path(path, on_complete, cancel, &self.config)
    }
}

/// Asks the user to press Enter once the edit is finished.
#[derive(Debug)]
pub struct ManualWait<R, W> {
    terminal: SharedTerminal<R, W>,
}

impl<R: BufRead, W: Write> ManualWait<R, W> {
    /// Creates a manual wait prompting on `terminal`.
    pub const fn new(terminal: SharedTerminal<R, W>) -> Self {
        Self { terminal }
    }
}

impl<R: BufRead, W: Write> CompletionWait for ManualWait<R, W> {
    fn wait(
        &mut self,
        path: &Path,
        cancel: &CancellationToken,
        on_complete: CompletionCallback<'_>,
    ) -> Result<WatchOutcome, DetectorError> {
        if cancel.is_cancelled() {
            return Ok(WatchOutcome::Cancelled);
        }

        let outcome = {
            let mut terminal = self.terminal.borrow_mut();
            let (input, output) = terminal.split();
            detector::wait_for_confirmation(input, output, path)?
        };

        // An interrupt while blocked on input still abandons the edit.
        if outcome == WatchOutcome::Cancelled || cancel.is_cancelled() {
            return Ok(WatchOutcome::Cancelled);
        }

        WatchSession::new(path, on_complete).complete();
        Ok(WatchOutcome::Completed)
    }
}
