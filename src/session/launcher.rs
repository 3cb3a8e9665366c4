//! Script file handling and editor invocation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::core::errors::{IoResultExt, Result, TabdiffError};
use crate::session::script::VimScript;

/// Editor command line, split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    program: String,
    args: Vec<String>,
}

impl EditorCommand {
    /// Parse `vim`, `nvim -u NONE`, `gvim -f`, ...
    ///
    /// Quoting is not interpreted; arguments containing spaces are not
    /// supported.
    pub fn parse(command: &str) -> Result<Self> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| TabdiffError::editor(command, "empty editor command"))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Executable name or path
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments placed before `-S <script>`
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the editor on `script` and wait for it to exit.
    pub fn launch(&self, script: &Path) -> Result<()> {
        info!("Launching {} -S {}", self.display(), script.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg("-S")
            .arg(script)
            .status()
            .map_err(|e| TabdiffError::editor(self.display(), format!("failed to start: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            Err(TabdiffError::editor(self.display(), format!("exited with {status}")))
        }
    }
}

/// A rendered script sitting in a named temporary file.
///
/// Dropping it removes the file; [`ScriptFile::keep`] hands the file over to
/// the editor, whose script deletes it.
#[derive(Debug)]
pub struct ScriptFile {
    file: NamedTempFile,
    text: Vec<u8>,
}

impl ScriptFile {
    /// Render `script` into a new temporary file.
    pub fn create(script: &VimScript) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("vimtabdiff-")
            .suffix(".vim")
            .tempfile()
            .with_path("Failed to create script file", &std::env::temp_dir())?;

        let text = script.render(file.path())?;
        file.write_all(&text)
            .and_then(|()| file.flush())
            .with_path("Failed to write script file", file.path())?;
        debug!("Wrote {} tabs to {}", script.tab_count(), file.path().display());

        Ok(Self { file, text })
    }

    /// Location of the script
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Script contents, byte for byte as written
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Write the script to `out` with trailing whitespace trimmed per line.
    pub fn print(&self, out: &mut impl Write) -> Result<()> {
        let body = self.text.strip_suffix(b"\n").unwrap_or(&self.text[..]);
        for line in body.split(|&b| b == b'\n') {
            let end = line
                .iter()
                .rposition(|b| !b.is_ascii_whitespace())
                .map_or(0, |i| i + 1);
            out.write_all(&line[..end])
                .and_then(|()| out.write_all(b"\n"))
                .with_path("Failed to print script", self.path())?;
        }
        Ok(())
    }

    /// Detach the file from this handle so it outlives the process.
    pub fn keep(self) -> Result<PathBuf> {
        self.file
            .into_temp_path()
            .keep()
            .map_err(|e| TabdiffError::io("Failed to keep script file", &e.path, e.error))
    }
}

/// Keep `script` on disk and run `editor` on it. The file is removed again
/// if the editor never got to source it.
pub fn run_editor(editor: &EditorCommand, script: ScriptFile) -> Result<()> {
    let path = script.keep()?;
    let result = editor.launch(&path);
    if let Err(TabdiffError::Editor { .. }) = &result {
        if path.exists() {
            let _ = fs::remove_file(&path);
        }
    }
    result
}
