//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use zipedit_core::cycle::DEFAULT_WORKING_DIR;

#[derive(Parser)]
#[command(name = "zipedit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new archive from files
    Create(CreateArgs),
    /// List archive members
    List(ListArgs),
    /// Extract a single member
    Extract(ExtractArgs),
    /// Replace a member with the contents of a file
    Replace(ReplaceArgs),
    /// Generate files of random test data
    Generate(GenerateArgs),
    /// Interactively edit archive members in place
    Edit(EditArgs),
    /// Generate data, build an archive and start an edit session
    Demo(DemoArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Output archive file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Source files to archive
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Member to extract
    #[arg(value_name = "MEMBER")]
    pub member: String,

    /// Destination directory (default: current directory)
    #[arg(value_name = "DEST")]
    pub dest: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ReplaceArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Member to replace (appended when absent)
    #[arg(value_name = "MEMBER")]
    pub member: String,

    /// File holding the new member content
    #[arg(value_name = "CONTENT")]
    pub content: PathBuf,
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Number of files to generate
    #[arg(long, default_value = "3")]
    pub count: usize,

    /// Size of the first file in KiB; each next file is 50 KiB larger
    #[arg(long, default_value = "100")]
    pub size_kb: u64,

    /// File extension, cycled across files (can be repeated)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Directory receiving the files
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Seed for reproducible content
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(clap::Args)]
pub struct EditArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Confirm each edit by pressing Enter instead of watching the file
    #[arg(long)]
    pub manual: bool,

    /// Directory holding extracted working copies
    #[arg(long, value_name = "DIR", default_value = DEFAULT_WORKING_DIR)]
    pub work_dir: PathBuf,

    /// How often the watcher checks for cancellation, in milliseconds
    #[arg(long, value_name = "MS", default_value = "250",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_ms: u64,
}

#[derive(clap::Args)]
pub struct DemoArgs {
    /// Archive to create
    #[arg(long, value_name = "ARCHIVE", default_value = "my_files.zip")]
    pub archive: PathBuf,

    /// Number of files to generate
    #[arg(long, default_value = "5")]
    pub count: usize,

    /// Size of the first file in KiB
    #[arg(long, default_value = "500")]
    pub size_kb: u64,

    /// Confirm each edit by pressing Enter instead of watching the file
    #[arg(long)]
    pub manual: bool,

    /// Directory holding extracted working copies
    #[arg(long, value_name = "DIR", default_value = DEFAULT_WORKING_DIR)]
    pub work_dir: PathBuf,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}
