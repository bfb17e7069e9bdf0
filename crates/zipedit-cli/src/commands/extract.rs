//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::env;
use zipedit_core::ArchiveStore;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let dest = match &args.dest {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let store = ArchiveStore::open(&args.archive);
    let path = add_archive_context(store.extract_one(&args.member, &dest), &args.archive)?;

    formatter.format_extracted(&args.member, &path)
}
