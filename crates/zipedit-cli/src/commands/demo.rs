//! Demo command: generate files, archive them and start an edit session.

use super::edit;
use super::generate;
use crate::cli::DemoArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use std::path::Path;
use std::path::PathBuf;
use zipedit_core::ArchiveStore;
use zipedit_core::CycleConfig;
use zipedit_core::testdata;

pub fn execute(args: &DemoArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let dir = args
        .archive
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let config = generate::generator_config(args.count, args.size_kb, &[], dir, None);
    let files = generate::run(&config)?;
    formatter.format_generated(&files)?;

    let paths: Vec<PathBuf> = files.into_iter().map(|f| f.path).collect();
    let result = build_and_edit(args, &paths, formatter);

    let removed = testdata::remove_generated(&paths);
    if removed < paths.len() {
        formatter.format_warning(&format!(
            "Removed {removed} of {} generated files",
            paths.len()
        ));
    } else {
        formatter.format_success(&format!("Removed {removed} generated files"));
    }

    result
}

fn build_and_edit(args: &DemoArgs, sources: &[PathBuf], formatter: &dyn OutputFormatter) -> Result<()> {
    let store = ArchiveStore::open(&args.archive);
    let report = add_archive_context(store.create(sources), &args.archive)?;
    formatter.format_creation_result(&args.archive, &report)?;

    let config = CycleConfig::new()
        .with_working_dir(&args.work_dir)
        .with_wait_mode(edit::wait_mode(args.manual));
    edit::run_session(&args.archive, &config, formatter)?;
    Ok(())
}
