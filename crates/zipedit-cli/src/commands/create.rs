//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use anyhow::bail;
use zipedit_core::ArchiveStore;
use zipedit_core::NoopProgress;
use zipedit_core::StoreConfig;

pub fn execute(args: &CreateArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "Output file '{}' already exists\n\
             HINT: Use --force to overwrite.",
            args.output.display()
        );
    }

    let mut config = StoreConfig::default();
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }
    let store = add_archive_context(ArchiveStore::with_config(&args.output, config), &args.output)?;

    let report = if !quiet && CliProgress::should_show() {
        let mut progress = CliProgress::new(args.sources.len(), "Creating");
        store.create_with_progress(&args.sources, &mut progress)
    } else {
        store.create_with_progress(&args.sources, &mut NoopProgress)
    };
    let report = add_archive_context(report, &args.output)?;

    formatter.format_creation_result(&args.output, &report)
}
