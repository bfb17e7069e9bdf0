//! The extract, edit, recompress loop.

use std::cell::RefCell;
use std::path::Path;
use std::path::PathBuf;

use super::CompletionWait;
use super::CycleConfig;
use super::MemberSelector;
use super::Selection;
use super::WorkingDir;
use crate::ArchiveStore;
use crate::CancellationToken;
use crate::CycleError;
use crate::ReplaceReport;
use crate::StoreError;
use crate::WatchOutcome;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The user asked to quit.
    Quit,
    /// The archive has no members, or could not be read.
    EmptyArchive,
}

/// Result of one cycle.
#[derive(Debug)]
pub enum CycleOutcome {
    /// No further cycles will run.
    Exit(ExitReason),

    /// The chosen member could not be extracted; nothing changed.
    ExtractFailed {
        /// Chosen member.
        member: String,
        /// Why extraction failed.
        error: StoreError,
    },

    /// The edited member was written back into the archive.
    Committed {
        /// Edited member.
        member: String,
        /// Recompression statistics.
        report: ReplaceReport,
    },

    /// Writing the edit back failed. The archive is unchanged and the
    /// edited working copy is kept.
    CommitFailed {
        /// Edited member.
        member: String,
        /// Why recompression failed.
        error: StoreError,
        /// Location of the kept working copy.
        preserved: PathBuf,
    },

    /// The wait was cancelled. The archive is unchanged and the working
    /// copy was discarded, unless it holds an edit kept from a failed save.
    Abandoned {
        /// Member whose edit was abandoned.
        member: String,
    },
}

impl CycleOutcome {
    /// Returns `true` for [`CycleOutcome::Exit`].
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Exit(_))
    }
}

/// Totals for a whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Edits written back successfully.
    pub committed: usize,

    /// Edits whose recompression failed.
    pub commit_failures: usize,

    /// Selections that could not be extracted.
    pub extract_failures: usize,

    /// Waits that were cancelled.
    pub abandoned: usize,

    /// Working copies kept because their edit could not be saved.
    pub preserved: Vec<PathBuf>,
}

impl SessionReport {
    fn record(&mut self, outcome: &CycleOutcome) {
        match outcome {
            CycleOutcome::Exit(_) => {}
            CycleOutcome::ExtractFailed { .. } => self.extract_failures += 1,
            CycleOutcome::Committed { .. } => self.committed += 1,
            CycleOutcome::CommitFailed { .. } => self.commit_failures += 1,
            CycleOutcome::Abandoned { .. } => self.abandoned += 1,
        }
    }

    /// Returns the total number of cycles that selected a member.
    #[must_use]
    pub const fn cycles(&self) -> usize {
        self.committed + self.commit_failures + self.extract_failures + self.abandoned
    }
}

/// Interactive edit session over one archive.
///
/// Each cycle lists the archive, lets the selector pick a member, extracts
/// it into the working directory, waits for the edit to finish and writes
/// the result back. Cycles run strictly one after another.
///
/// # Examples
///
/// ```no_run
/// use std::io::BufReader;
/// use zipedit_core::{
///     ArchiveStore, AutomaticWait, CycleConfig, EditCycle, PromptSelector, Terminal,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = CycleConfig::default();
/// let terminal = Terminal::new(BufReader::new(std::io::stdin()), std::io::stdout()).shared();
/// let cycle = EditCycle::new(
///     ArchiveStore::open("a.zip"),
///     &config,
///     PromptSelector::new(terminal),
///     AutomaticWait::new(config.detector),
/// )?;
///
/// let report = cycle.run(|outcome| println!("{outcome:?}"))?;
/// println!("{} edits saved", report.committed);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EditCycle<S, C> {
    store: ArchiveStore,
    selector: S,
    wait: C,
    workdir: WorkingDir,
    cancel: CancellationToken,
}

impl<S: MemberSelector, C: CompletionWait> EditCycle<S, C> {
    /// Prepares a session, creating the working directory.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::WorkingDir` if the working directory cannot be
    /// created.
    pub fn new(
        store: ArchiveStore,
        config: &CycleConfig,
        selector: S,
        wait: C,
    ) -> Result<Self, CycleError> {
        let workdir = WorkingDir::create(&config.working_dir)?;
        Ok(Self {
            store,
            selector,
            wait,
            workdir,
            cancel: CancellationToken::new(),
        })
    }

    /// Uses `token` to abandon waits, e.g. from an interrupt handler.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Returns the archive being edited.
    #[must_use]
    pub const fn store(&self) -> &ArchiveStore {
        &self.store
    }

    /// Returns the working directory.
    #[must_use]
    pub const fn working_dir(&self) -> &WorkingDir {
        &self.workdir
    }

    /// Runs one cycle.
    ///
    /// Archive failures are reported through the outcome. A cancelled wait
    /// abandons the cycle without touching the archive. Directory entries
    /// are not offered for editing.
    ///
    /// Selecting a member whose earlier save failed resumes that kept copy
    /// instead of extracting the member again.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection prompt fails or completion
    /// detection cannot run. A working copy the detector was watching is
    /// kept in that case.
    pub fn run_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let members: Vec<String> = self
            .store
            .list()
            .into_iter()
            .filter(|name| !is_directory(name))
            .collect();
        if members.is_empty() {
            tracing::info!(archive = %self.store.path().display(), "no members to edit");
            return Ok(CycleOutcome::Exit(ExitReason::EmptyArchive));
        }

        let member = match self.selector.select(&members)? {
            Selection::Member(name) => name,
            Selection::Quit => return Ok(CycleOutcome::Exit(ExitReason::Quit)),
        };

        let (working_copy, resumed) = match self.workdir.preserved_copy(&member) {
            Some(kept) => {
                tracing::warn!(
                    member = %member,
                    path = %kept.display(),
                    "resuming unsaved edit from an earlier failed save"
                );
                (kept.to_path_buf(), true)
            }
            None => match self.store.extract_one(&member, self.workdir.path()) {
                Ok(path) => (path, false),
                Err(error) => {
                    tracing::warn!(member = %member, "extraction failed: {error}");
                    return Ok(CycleOutcome::ExtractFailed { member, error });
                }
            },
        };

        self.cancel.reset();
        let commit = RefCell::new(None);
        let store = &self.store;
        let name = member.as_str();
        let outcome = self.wait.wait(
            &working_copy,
            &self.cancel,
            Box::new(|edited: &Path| {
                *commit.borrow_mut() = Some(store.replace_one(name, edited));
            }),
        );

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    member = %member,
                    path = %working_copy.display(),
                    "completion detection failed, keeping working copy: {err}"
                );
                self.workdir.preserve(&member, working_copy);
                return Err(err.into());
            }
        };

        match (outcome, commit.into_inner()) {
            (WatchOutcome::Completed, Some(Ok(report))) => {
                discard(&working_copy);
                self.workdir.release(&member);
                Ok(CycleOutcome::Committed { member, report })
            }
            (WatchOutcome::Completed, Some(Err(error))) => {
                tracing::warn!(
                    member = %member,
                    path = %working_copy.display(),
                    "recompression failed, keeping edited copy: {error}"
                );
                self.workdir.preserve(&member, working_copy.clone());
                Ok(CycleOutcome::CommitFailed {
                    member,
                    error,
                    preserved: working_copy,
                })
            }
            _ => {
                tracing::info!(member = %member, "edit abandoned");
                // a resumed copy still holds the unsaved edit
                if !resumed {
                    discard(&working_copy);
                }
                Ok(CycleOutcome::Abandoned { member })
            }
        }
    }

    /// Runs cycles until the user quits or the archive is empty, then
    /// removes the working directory.
    ///
    /// `observer` sees every outcome, including the final exit.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error. The working directory is still
    /// removed in that case.
    pub fn run<F: FnMut(&CycleOutcome)>(mut self, mut observer: F) -> Result<SessionReport, CycleError> {
        let mut report = SessionReport::default();
        loop {
            let outcome = self.run_once()?;
            report.record(&outcome);
            observer(&outcome);
            if outcome.is_exit() {
                break;
            }
        }

        report.preserved = self.workdir.preserved().map(Path::to_path_buf).collect();
        self.workdir.cleanup()?;
        Ok(report)
    }
}

/// Directory entries are stored with a trailing separator.
fn is_directory(name: &str) -> bool {
    name.ends_with(['/', '\\'])
}

fn discard(path: &Path) {
    if let Err(err) = std::fs::remove_file(path)
        && err.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), "cannot remove working copy: {err}");
    }
}
