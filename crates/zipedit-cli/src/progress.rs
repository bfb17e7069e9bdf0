//! Progress display for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;
use std::time::Duration;
use zipedit_core::CancellationToken;
use zipedit_core::CompletionCallback;
use zipedit_core::CompletionWait;
use zipedit_core::DetectorError;
use zipedit_core::ProgressCallback;
use zipedit_core::WatchOutcome;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Counts members written and shows the running byte total when running
/// in a TTY. Cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    label: String,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a progress bar over `total` sources.
    #[must_use]
    pub fn new(total: usize, label: &str) -> Self {
        let bar = ProgressBar::new(total as u64);

        // "Creating test_file_2.log [████████░░░░] 2/5 members"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} members ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(label.to_string());

        Self {
            bar,
            label: label.to_string(),
            bytes_written: 0,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, name: &str, _total: usize, _current: usize) {
        self.bar.set_message(format!("{} {name}", self.label));
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
    }

    fn on_entry_complete(&mut self, _name: &str) {
        self.bar.inc(1);
        self.bar.set_message(format!(
            "{} ({})",
            self.label,
            humanize_bytes(self.bytes_written)
        ));
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Draws a spinner naming the watched file while another wait runs.
pub struct SpinnerWait<W> {
    inner: W,
    enabled: bool,
}

impl<W: CompletionWait> SpinnerWait<W> {
    /// Wraps `inner`; with `enabled == false` nothing is drawn.
    pub const fn new(inner: W, enabled: bool) -> Self {
        Self { inner, enabled }
    }
}

impl<W: CompletionWait> CompletionWait for SpinnerWait<W> {
    fn wait(
        &mut self,
        path: &Path,
        cancel: &CancellationToken,
        on_complete: CompletionCallback<'_>,
    ) -> Result<WatchOutcome, DetectorError> {
        let spinner = if self.enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!(
            "Editing {}; save and close it to write it back (Ctrl+C abandons)",
            path.display()
        ));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = self.inner.wait(path, cancel, on_complete);
        spinner.finish_and_clear();
        result
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
