//! Blocking watch loop and the manual confirmation fallback.

use std::io::BufRead;
use std::io::Write;
use std::path::Path;

use super::AppendProbe;
use super::CancellationToken;
use super::CompletionCallback;
use super::DetectorConfig;
use super::EventSource;
use super::NotifySource;
use super::ReleaseProbe;
use super::WatchSession;
use crate::DetectorError;

/// How a watch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// The session closed and its callback ran.
    Completed,
    /// Cancellation was requested first; the callback did not run.
    Cancelled,
}

/// Runs `session` against `source` until it closes or `cancel` fires.
///
/// The token is checked before every wait, so cancellation is noticed
/// within one poll interval.
///
/// # Errors
///
/// Returns an error if the event source fails.
pub fn watch<S: EventSource + ?Sized>(
    source: &mut S,
    session: &mut WatchSession<'_>,
    probe: &dyn ReleaseProbe,
    cancel: &CancellationToken,
    config: &DetectorConfig,
) -> Result<WatchOutcome, DetectorError> {
    loop {
        if session.is_closed() {
            return Ok(WatchOutcome::Completed);
        }
        if cancel.is_cancelled() {
            tracing::info!(path = %session.path().display(), "watch cancelled");
            return Ok(WatchOutcome::Cancelled);
        }

        if let Some(event) = source.next_event(config.poll_interval)? {
            session.handle_event(&event, probe);
        }
    }
}

/// Watches `path` with the native watcher and [`AppendProbe`], calling
/// `on_complete` once the edit is judged finished.
///
/// # Errors
///
/// Returns an error if the watcher cannot be started or stops delivering
/// events.
pub fn watch_path(
    path: &Path,
    on_complete: CompletionCallback<'_>,
    cancel: &CancellationToken,
    config: &DetectorConfig,
) -> Result<WatchOutcome, DetectorError> {
    let mut source = NotifySource::new(path)?;
    // Native watchers report resolved paths.
    let bound = std::fs::canonicalize(path)?;
    let mut session = WatchSession::new(bound, on_complete);

    tracing::info!(path = %path.display(), "watching for edit completion");
    watch(&mut source, &mut session, &AppendProbe, cancel, config)
}

/// Blocks until the user confirms the edit is finished.
///
/// Writes a prompt naming the file to `output` and reads one line from
/// `input`. Any line, including an empty one, confirms; end of input
/// cancels.
///
/// # Errors
///
/// Returns an error if the prompt cannot be written or input cannot be
/// read.
pub fn wait_for_confirmation<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    path: &Path,
) -> Result<WatchOutcome, DetectorError> {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    write!(output, "Press Enter when you have finished editing '{name}'...")?;
    output.flush()?;

    // content is irrelevant, so bytes that are not UTF-8 confirm too
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line)? == 0 {
        writeln!(output)?;
        return Ok(WatchOutcome::Cancelled);
    }
    Ok(WatchOutcome::Completed)
}
