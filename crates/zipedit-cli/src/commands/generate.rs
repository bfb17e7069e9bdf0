//! Generate command implementation.

use crate::cli::GenerateArgs;
use crate::output::GeneratedFile;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::path::PathBuf;
use zipedit_core::GeneratorConfig;
use zipedit_core::testdata;

/// Builds the generator configuration shared by `generate` and `demo`.
pub fn generator_config(
    count: usize,
    size_kb: u64,
    extensions: &[String],
    dir: PathBuf,
    seed: Option<u64>,
) -> GeneratorConfig {
    let mut config = GeneratorConfig::default()
        .with_count(count)
        .with_base_size_kb(size_kb)
        .with_output_dir(dir);
    if !extensions.is_empty() {
        config = config.with_extensions(extensions);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    config
}

/// Writes the files and pairs each path with its size.
pub fn run(config: &GeneratorConfig) -> Result<Vec<GeneratedFile>> {
    let paths = testdata::generate(config).with_context(|| {
        format!(
            "failed to generate test files in '{}'",
            config.output_dir.display()
        )
    })?;

    // generate() rejects configs whose sizes overflow, so every size exists
    Ok(paths
        .into_iter()
        .enumerate()
        .filter_map(|(i, path)| config.file_size(i).map(|size| GeneratedFile { path, size }))
        .collect())
}

pub fn execute(args: &GenerateArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = generator_config(
        args.count,
        args.size_kb,
        &args.extensions,
        args.dir.clone(),
        args.seed,
    );
    let files = run(&config)?;
    formatter.format_generated(&files)
}
