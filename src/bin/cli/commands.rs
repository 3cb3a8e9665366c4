//! Command execution: build the session, then list the pairs or open vim.

use std::io::{self, Write};

use anyhow::Context;
use tracing::{info, warn};

use crate::cli::args::{Cli, OutputFormat};
use crate::cli::config_layer::build_layered_config;
use crate::cli::output::write_pair;
use vimtabdiff_rs::session::{run_editor, ScriptFile};
use vimtabdiff_rs::Session;

/// Entry point for a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_layered_config(&cli)?;
    let session = Session::new(config, &cli.path_a, &cli.path_b)?;

    match cli.format {
        OutputFormat::Vim => vim_command(&session, cli.dry),
        format => list_command(&session, format),
    }
}

/// Stream the pairs to stdout, one per line.
pub fn list_command(session: &Session, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    session.for_each_pair(|pair| write_pair(&mut out, &pair, format))?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Generate the vim script and either print it (`dry`) or run the editor on it.
pub fn vim_command(session: &Session, dry: bool) -> anyhow::Result<()> {
    // Reject a bad editor before walking anything
    let editor = session.editor()?;

    let (script, summary) = session.build_script()?;
    if summary.emitted == 0 {
        warn!("No file pairs to show");
    }

    let file = ScriptFile::create(&script)?;
    if dry {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        file.print(&mut out)?;
        out.flush().context("Failed to flush stdout")?;
        return Ok(());
    }

    info!("Opening {} tabs", script.tab_count());
    run_editor(&editor, file)?;
    Ok(())
}
