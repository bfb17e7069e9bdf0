//! Edit cycle tests with scripted selectors and waits.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tempfile::TempDir;
use zipedit_core::ArchiveStore;
use zipedit_core::AutomaticWait;
use zipedit_core::CancellationToken;
use zipedit_core::CompletionCallback;
use zipedit_core::CompletionWait;
use zipedit_core::CycleConfig;
use zipedit_core::CycleOutcome;
use zipedit_core::DetectorConfig;
use zipedit_core::DetectorError;
use zipedit_core::EditCycle;
use zipedit_core::ExitReason;
use zipedit_core::ManualWait;
use zipedit_core::MemberSelector;
use zipedit_core::PromptSelector;
use zipedit_core::Selection;
use zipedit_core::StoreError;
use zipedit_core::Terminal;
use zipedit_core::WatchOutcome;
use zipedit_core::test_utils::read_test_zip;
use zipedit_core::test_utils::write_test_zip;

struct Scripted(VecDeque<Selection>);

impl Scripted {
    fn pick(names: &[&str]) -> Self {
        Self(
            names
                .iter()
                .map(|n| Selection::Member((*n).to_string()))
                .collect(),
        )
    }
}

impl MemberSelector for Scripted {
    fn select(&mut self, _members: &[String]) -> std::io::Result<Selection> {
        Ok(self.0.pop_front().unwrap_or(Selection::Quit))
    }
}

/// Runs a closure against the working copy before reporting completion.
struct EditWith<F>(F);

impl<F: FnMut(&Path)> CompletionWait for EditWith<F> {
    fn wait(
        &mut self,
        path: &Path,
        _cancel: &CancellationToken,
        on_complete: CompletionCallback<'_>,
    ) -> Result<WatchOutcome, DetectorError> {
        (self.0)(path);
        on_complete(path);
        Ok(WatchOutcome::Completed)
    }
}

/// Simulates an interrupt while waiting, recording whether the token was
/// already set on entry.
struct Interrupted(Rc<RefCell<Vec<bool>>>);

impl CompletionWait for Interrupted {
    fn wait(
        &mut self,
        _path: &Path,
        cancel: &CancellationToken,
        _on_complete: CompletionCallback<'_>,
    ) -> Result<WatchOutcome, DetectorError> {
        self.0.borrow_mut().push(cancel.is_cancelled());
        cancel.cancel();
        Ok(WatchOutcome::Cancelled)
    }
}

/// Saves part of an edit, then loses the file watcher.
struct WatcherLost;

impl CompletionWait for WatcherLost {
    fn wait(
        &mut self,
        path: &Path,
        _cancel: &CancellationToken,
        _on_complete: CompletionCallback<'_>,
    ) -> Result<WatchOutcome, DetectorError> {
        fs::write(path, "half-saved edit").unwrap();
        Err(DetectorError::Io(std::io::Error::other("watcher disconnected")))
    }
}

struct Fixture {
    temp: TempDir,
    store: ArchiveStore,
    config: CycleConfig,
}

impl Fixture {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("a.zip");
        write_test_zip(&archive, &[("x.txt", b"hello"), ("y.txt", b"world")]);
        let config = CycleConfig::default().with_working_dir(temp.path().join("temp_extracted"));
        Self {
            store: ArchiveStore::open(archive),
            temp,
            config,
        }
    }

    fn work(&self) -> PathBuf {
        self.config.working_dir.clone()
    }
}

#[test]
fn test_session_commits_and_cleans_up() {
    let fx = Fixture::new();
    let cycle = EditCycle::new(
        fx.store.clone(),
        &fx.config,
        Scripted::pick(&["x.txt"]),
        EditWith(|p: &Path| fs::write(p, "HELLO").unwrap()),
    )
    .unwrap();

    let report = cycle.run(|_| {}).unwrap();

    assert_eq!(report.committed, 1);
    assert_eq!(report.cycles(), 1);
    assert!(!fx.work().exists());
    let members = read_test_zip(fx.store.path());
    assert_eq!(members[0], ("x.txt".to_string(), b"HELLO".to_vec()));
    assert_eq!(members[1], ("y.txt".to_string(), b"world".to_vec()));
}

#[test]
fn test_extract_failure_returns_to_menu() {
    let fx = Fixture::new();
    let mut cycle = EditCycle::new(
        fx.store.clone(),
        &fx.config,
        Scripted::pick(&["missing.txt", "y.txt"]),
        EditWith(|_: &Path| {}),
    )
    .unwrap();

    let first = cycle.run_once().unwrap();
    assert!(matches!(
        first,
        CycleOutcome::ExtractFailed {
            error: StoreError::MemberNotFound { .. },
            ..
        }
    ));
    assert!(matches!(cycle.run_once().unwrap(), CycleOutcome::Committed { .. }));
    assert!(matches!(
        cycle.run_once().unwrap(),
        CycleOutcome::Exit(ExitReason::Quit)
    ));
}

#[test]
fn test_interrupted_wait_abandons_cycle() {
    let fx = Fixture::new();
    let before = fs::read(fx.store.path()).unwrap();
    let token = CancellationToken::new();
    let entries = Rc::new(RefCell::new(Vec::new()));
    let mut cycle = EditCycle::new(
        fx.store.clone(),
        &fx.config,
        Scripted::pick(&["x.txt", "y.txt"]),
        Interrupted(Rc::clone(&entries)),
    )
    .unwrap()
    .with_cancellation(token.clone());

    let outcome = cycle.run_once().unwrap();
    assert!(matches!(outcome, CycleOutcome::Abandoned { ref member } if member == "x.txt"));
    assert_eq!(fs::read(fx.store.path()).unwrap(), before);
    assert!(!fx.work().join("x.txt").exists());
    assert!(token.is_cancelled());

    // One interrupt abandons exactly one cycle.
    assert!(matches!(cycle.run_once().unwrap(), CycleOutcome::Abandoned { .. }));
    assert_eq!(*entries.borrow(), vec![false, false]);
}

#[test]
fn test_commit_failure_preserves_working_copy() {
    let fx = Fixture::new();
    let archive = fx.store.path().to_path_buf();
    let corrupt = {
        let archive = archive.clone();
        move |p: &Path| {
            fs::write(p, "precious edit").unwrap();
            fs::write(&archive, "the archive went away\n".repeat(10)).unwrap();
        }
    };

    let cycle = EditCycle::new(
        fx.store.clone(),
        &fx.config,
        Scripted::pick(&["x.txt"]),
        EditWith(corrupt),
    )
    .unwrap();

    let mut failures = Vec::new();
    let report = cycle
        .run(|outcome| {
            if let CycleOutcome::CommitFailed { preserved, error, .. } = outcome {
                assert!(matches!(error, StoreError::RecompressFailed { .. }));
                failures.push(preserved.clone());
            }
        })
        .unwrap();

    assert_eq!(report.commit_failures, 1);
    assert_eq!(report.preserved, failures);
    assert_eq!(fs::read_to_string(&failures[0]).unwrap(), "precious edit");
    assert_eq!(
        fs::read_to_string(&archive).unwrap(),
        "the archive went away\n".repeat(10)
    );
}

#[test]
fn test_reselecting_failed_member_resumes_kept_edit() {
    let fx = Fixture::new();
    let archive = fx.store.path().to_path_buf();
    let original = fs::read(&archive).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let edit = {
        let archive = archive.clone();
        let seen = Rc::clone(&seen);
        move |p: &Path| {
            seen.borrow_mut().push(fs::read_to_string(p).unwrap());
            if seen.borrow().len() == 1 {
                fs::write(p, "precious edit").unwrap();
                fs::write(&archive, "not a zip archive\n".repeat(10)).unwrap();
            }
        }
    };

    let mut cycle = EditCycle::new(
        fx.store.clone(),
        &fx.config,
        Scripted::pick(&["x.txt", "x.txt"]),
        EditWith(edit),
    )
    .unwrap();

    let kept = match cycle.run_once().unwrap() {
        CycleOutcome::CommitFailed { preserved, .. } => preserved,
        other => panic!("expected a failed commit, got {other:?}"),
    };
    assert_eq!(fs::read_to_string(&kept).unwrap(), "precious edit");

    fs::write(&archive, &original).unwrap();
    let second = cycle.run_once().unwrap();
    assert!(matches!(second, CycleOutcome::Committed { .. }), "{second:?}");

    // The second cycle edited the kept copy, not a fresh extraction.
    assert_eq!(
        *seen.borrow(),
        vec!["hello".to_string(), "precious edit".to_string()]
    );
    assert_eq!(read_test_zip(&archive)[0].1, b"precious edit");
    assert!(!kept.exists());

    let report = cycle.run(|_| {}).unwrap();
    assert!(report.preserved.is_empty());
    assert!(!fx.work().exists());
}

#[test]
fn test_detector_failure_keeps_working_copy() {
    let fx = Fixture::new();
    let before = fs::read(fx.store.path()).unwrap();
    let cycle = EditCycle::new(
        fx.store.clone(),
        &fx.config,
        Scripted::pick(&["x.txt"]),
        WatcherLost,
    )
    .unwrap();

    let err = cycle.run(|_| {}).unwrap_err();
    assert!(matches!(err, zipedit_core::CycleError::Detector(_)));

    let copy = fx.work().join("x.txt");
    assert_eq!(fs::read_to_string(copy).unwrap(), "half-saved edit");
    assert_eq!(fs::read(fx.store.path()).unwrap(), before);
}

#[test]
fn test_empty_archive_ends_session() {
    let fx = Fixture::new();
    let empty = fx.temp.path().join("empty.zip");
    write_test_zip(&empty, &[]);

    let cycle = EditCycle::new(
        ArchiveStore::open(&empty),
        &fx.config,
        Scripted::pick(&["x.txt"]),
        EditWith(|_: &Path| {}),
    )
    .unwrap();

    let mut outcomes = Vec::new();
    let report = cycle
        .run(|o| outcomes.push(matches!(o, CycleOutcome::Exit(ExitReason::EmptyArchive))))
        .unwrap();
    assert_eq!(outcomes, vec![true]);
    assert_eq!(report.cycles(), 0);
}

#[test]
fn test_prompt_and_manual_wait_share_input() {
    let fx = Fixture::new();
    let terminal = Terminal::new(Cursor::new(b"abc\n2\n\nq\n".to_vec()), Vec::new()).shared();

    let cycle = EditCycle::new(
        fx.store.clone(),
        &fx.config,
        PromptSelector::new(terminal.clone()),
        ManualWait::new(terminal.clone()),
    )
    .unwrap();
    let report = cycle.run(|_| {}).unwrap();

    assert_eq!(report.committed, 1);
    let output = String::from_utf8(terminal.borrow().output().clone()).unwrap();
    assert!(output.contains("Invalid input"));
    assert!(output.contains("finished editing 'y.txt'"));
    assert_eq!(read_test_zip(fx.store.path())[1].1, b"world");
}

#[test]
fn test_working_dir_creation_failure_is_fatal() {
    let fx = Fixture::new();
    let blocker = fx.temp.path().join("blocker");
    fs::write(&blocker, "file, not a directory").unwrap();
    let config = fx.config.clone().with_working_dir(blocker.join("work"));

    let result = EditCycle::new(
        fx.store.clone(),
        &config,
        Scripted::pick(&[]),
        EditWith(|_: &Path| {}),
    );
    assert!(result.is_err());
}

#[test]
fn test_automatic_wait_detects_saved_edit() {
    let fx = Fixture::new();
    let token = CancellationToken::new();
    let config = fx
        .config
        .clone()
        .with_detector(DetectorConfig::default().with_poll_interval(Duration::from_millis(20)));
    let mut cycle = EditCycle::new(
        fx.store.clone(),
        &config,
        Scripted::pick(&["x.txt"]),
        AutomaticWait::new(config.detector),
    )
    .unwrap()
    .with_cancellation(token.clone());

    // Save like an editor does: write a sibling, rename it over the copy.
    // Repeat until the cycle is done in case the first save lands before
    // the watcher is registered.
    let stop = Arc::new(AtomicBool::new(false));
    let editor = {
        let stop = Arc::clone(&stop);
        let work = fx.work();
        let token = token.clone();
        std::thread::spawn(move || {
            for _ in 0..200 {
                if stop.load(Ordering::SeqCst) {
                    return;
                }
                std::thread::sleep(Duration::from_millis(50));
                let tmp = work.join(".x.txt.swp");
                if fs::write(&tmp, "HELLO").is_ok() {
                    let _ = fs::rename(&tmp, work.join("x.txt"));
                }
            }
            token.cancel();
        })
    };

    let outcome = cycle.run_once().unwrap();
    stop.store(true, Ordering::SeqCst);
    editor.join().unwrap();

    assert!(matches!(outcome, CycleOutcome::Committed { .. }), "{outcome:?}");
    assert_eq!(read_test_zip(fx.store.path())[0].1, b"HELLO");
}
