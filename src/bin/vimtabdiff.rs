//! vimtabdiff - Show diff of files from two directories in vim tabs
//!
//! Pairs the files of two directory trees by name and opens every pair in a
//! vim tab with diff mode on.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging; stdout is reserved for scripts and listings.
    // RUST_LOG overrides the level chosen by --verbose.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    cli::run(cli)
}
