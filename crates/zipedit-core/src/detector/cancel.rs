//! Cancellation signal shared between the watch loop and its caller.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

/// Requests that an ongoing watch stop without firing its callback.
///
/// Clones share one flag, so a clone can be handed to a signal handler
/// while the original is passed into the watch call.
///
/// # Examples
///
/// ```
/// use zipedit_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handler_copy = token.clone();
///
/// handler_copy.cancel();
/// assert!(token.is_cancelled());
///
/// token.reset();
/// assert!(!handler_copy.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new, not yet cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the operation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Clears a previous cancellation so the token can guard the next
    /// watch.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}
