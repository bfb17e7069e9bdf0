//! Edit command implementation.

use crate::cli::EditArgs;
use crate::error::add_archive_context;
use crate::error::convert_cycle_error;
use crate::output::OutputFormatter;
use crate::progress::SpinnerWait;
use anyhow::Context;
use anyhow::Result;
use std::io;
use std::path::Path;
use std::time::Duration;
use zipedit_core::ArchiveStore;
use zipedit_core::AutomaticWait;
use zipedit_core::CancellationToken;
use zipedit_core::CompletionWait;
use zipedit_core::CycleConfig;
use zipedit_core::DetectorConfig;
use zipedit_core::EditCycle;
use zipedit_core::ManualWait;
use zipedit_core::PromptSelector;
use zipedit_core::SessionReport;
use zipedit_core::Terminal;
use zipedit_core::WaitMode;

/// Exit status after a second Ctrl+C.
const USER_INTERRUPT: i32 = 130;

/// Maps the `--manual` flag onto a wait mode.
pub const fn wait_mode(manual: bool) -> WaitMode {
    if manual {
        WaitMode::Manual
    } else {
        WaitMode::Automatic
    }
}

pub fn execute(args: &EditArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    // A missing or corrupt archive is an error here, not an empty menu.
    add_archive_context(ArchiveStore::open(&args.archive).try_list(), &args.archive)?;

    let config = CycleConfig::new()
        .with_working_dir(&args.work_dir)
        .with_wait_mode(wait_mode(args.manual))
        .with_detector(
            DetectorConfig::default().with_poll_interval(Duration::from_millis(args.poll_ms)),
        );

    run_session(&args.archive, &config, formatter)?;
    Ok(())
}

/// Runs the interactive loop on stdin until the user quits.
pub fn run_session(
    archive: &Path,
    config: &CycleConfig,
    formatter: &dyn OutputFormatter,
) -> Result<SessionReport> {
    let cancel = CancellationToken::new();
    install_interrupt_handler(cancel.clone())?;

    let terminal = Terminal::new(io::stdin().lock(), formatter.prompt_writer()).shared();
    let wait: Box<dyn CompletionWait> = match config.wait_mode {
        WaitMode::Manual => Box::new(ManualWait::new(terminal.clone())),
        WaitMode::Automatic => Box::new(SpinnerWait::new(
            AutomaticWait::new(config.detector),
            formatter.shows_spinner(),
        )),
    };

    let cycle = EditCycle::new(
        ArchiveStore::open(archive),
        config,
        PromptSelector::new(terminal),
        wait,
    )
    .map_err(convert_cycle_error)?
    .with_cancellation(cancel);

    let report = cycle
        .run(|outcome| formatter.format_cycle_outcome(outcome))
        .map_err(convert_cycle_error)?;
    formatter.format_session_report(archive, &report)?;
    Ok(report)
}

/// The first Ctrl+C abandons the edit in progress; a second one exits.
fn install_interrupt_handler(cancel: CancellationToken) -> Result<()> {
    ctrlc::set_handler(move || {
        if cancel.is_cancelled() {
            eprintln!("\nInterrupted");
            std::process::exit(USER_INTERRUPT);
        }
        cancel.cancel();
        eprintln!("\nInterrupted: the current edit will be abandoned. Press Ctrl+C again to exit.");
    })
    .context("failed to install the Ctrl+C handler")
}
