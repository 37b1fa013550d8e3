//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// oxbridge - Run oxlint as part of a bundler build
#[derive(Parser)]
#[command(name = "oxbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Options file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one build over the given files and lint them
    Lint {
        /// Module resources, optionally with a `?query` suffix
        files: Vec<String>,

        #[command(flatten)]
        overrides: OptionOverrides,

        /// Build directory (defaults to the current directory)
        #[arg(long)]
        cwd: Option<PathBuf>,
    },

    /// Translate a saved oxlint report
    Translate {
        /// Report file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Report layout the file was written in
        #[arg(short, long)]
        format: Option<String>,

        /// Directory stylish headers are shown relative to
        #[arg(long)]
        context: Option<PathBuf>,
    },
}

/// Flags that take precedence over the options file.
#[derive(clap::Args, Default)]
pub struct OptionOverrides {
    /// Report layout passed to `oxlint -f`
    #[arg(short, long)]
    pub format: Option<String>,

    /// Lint the whole project when more files than this were built
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Linter executable
    #[arg(long)]
    pub binary: Option<String>,

    /// Kill the linter after this many milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}
