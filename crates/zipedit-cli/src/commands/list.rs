//! List command implementation

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use zipedit_core::ArchiveStore;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let members = add_archive_context(ArchiveStore::open(&args.archive).try_list(), &args.archive)?;
    formatter.format_member_list(&args.archive, &members)
}
