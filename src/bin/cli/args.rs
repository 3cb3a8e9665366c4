//! CLI Argument Structures
//!
//! This module contains the argument definition and output format enum used
//! by the vimtabdiff binary.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Show diff of files from two directories in vim tabs
#[derive(Parser, Debug)]
#[command(name = "vimtabdiff")]
#[command(version = VERSION)]
#[command(about = "Show diff of files from two directories in vim tabs")]
#[command(long_about = "
Pair up every file under two directory trees by name and open each pair in its
own vim tab with diff mode enabled. Files present on one side only are paired
with an empty buffer.

Common Usage:

  # Compare two checkouts, skipping git metadata
  vimtabdiff --git old/ new/

  # Only open files that actually differ
  vimtabdiff --onlydiffs old/ new/

  # Inspect the generated vim script without starting vim
  vimtabdiff --dry old/ new/

  # List the pairs instead of opening them
  vimtabdiff --format json old/ new/
")]
#[command(after_help = "See https://github.com/balki/vimtabdiff for more info")]
pub struct Cli {
    /// First directory (left side)
    #[arg(value_name = "PATH_A")]
    pub path_a: PathBuf,

    /// Second directory (right side)
    #[arg(value_name = "PATH_B")]
    pub path_b: PathBuf,

    /// vim command to run
    #[arg(long, env = "VIMTABDIFF_VIM")]
    pub vim: Option<String>,

    /// Comma separated list of files/folders to exclude (e.g. '**/.git,**/target')
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Add **/.git to the exclusion list
    #[arg(long)]
    pub git: bool,

    /// Only open files where there is a diff
    #[arg(long)]
    pub onlydiffs: bool,

    /// Only print the vim script to execute
    #[arg(long)]
    pub dry: bool,

    /// What to do with the pairs
    #[arg(long, value_enum, default_value = "vim")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./.vimtabdiff.yml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail when the walk goes deeper than this many directory levels
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Do not check directories for symlink cycles
    #[arg(long)]
    pub no_cycle_check: bool,

    /// Enable verbose logging for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output modes for the pair stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Build a vim script and open it (or print it with --dry)
    Vim,
    /// One tab-separated pair per line, '-' for a missing side
    Text,
    /// One JSON object per line
    Json,
}
