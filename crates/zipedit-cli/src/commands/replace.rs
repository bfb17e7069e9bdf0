//! Replace command implementation.

use crate::cli::ReplaceArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use zipedit_core::ArchiveStore;

pub fn execute(args: &ReplaceArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let store = ArchiveStore::open(&args.archive);
    let report = add_archive_context(store.replace_one(&args.member, &args.content), &args.archive)?;

    formatter.format_replace_result(&args.archive, &report)
}
