//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sevex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the 7-Zip binary (overrides discovery)
    #[arg(long, global = true, value_name = "PATH")]
    pub bin: Option<PathBuf>,

    /// Enable verbose diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Overall timeout in seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Abort when the binary is silent for this many seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub idle_timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an archive from a file or directory
    Add(AddArgs),
    /// Extract an archive
    Extract(ExtractArgs),
    /// List archive contents
    List(ListArgs),
    /// Show the binary's version and format/codec/hasher catalogs
    Info,
}

/// Compression-level presets expanding into per-format switch sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Level {
    /// Fastest compression
    Fast,
    /// Strongest standard compression
    Slow,
    /// Ultra settings
    Max,
    /// Store only, no compression
    Copy,
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Archive to create
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// File or directory to compress
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Archive format (7z, zip, tar, zstd, tar.zst, tgz, ...)
    #[arg(short, long, default_value = "7z")]
    pub format: String,

    /// Encrypt with this password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Do not encrypt file names (non-zip formats)
    #[arg(long, requires = "password")]
    pub plain_names: bool,

    /// Compression-level preset
    #[arg(short, long, value_enum)]
    pub level: Option<Level>,

    /// Exclude entries matching a pattern (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Include only entries matching a pattern (repeatable)
    #[arg(short = 'i', long = "include", value_name = "PATTERN")]
    pub include: Vec<String>,

    /// Extra raw switch, `name` or `name=value` (repeatable)
    #[arg(long = "flag", value_name = "NAME[=VALUE]")]
    pub flags: Vec<String>,

    /// Tar-pack the source first even when the format does not require it
    #[arg(long)]
    pub force_tar: bool,

    /// The source is already a tar stream; skip staging
    #[arg(long)]
    pub already_tarred: bool,

    /// Do not preserve owner ids and timestamps across the tar stage
    #[arg(long)]
    pub no_file_info: bool,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Archive to extract
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Password for encrypted archives
    #[arg(short, long)]
    pub password: Option<String>,

    /// Do not unpack a lone extracted `.tar` payload
    #[arg(long)]
    pub no_auto_untar: bool,

    /// Delete the archive after successful extraction
    #[arg(long)]
    pub delete_source: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Archive to list
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Password for encrypted archives
    #[arg(short, long)]
    pub password: Option<String>,
}
