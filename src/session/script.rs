//! Vim script rendering for a stream of file pairs.
//!
//! Every pair becomes one tab holding a vertical split; the footer turns on
//! diff mode in every window, closes the initial empty tab and deletes the
//! script file itself.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{IoResultExt, Result, TabdiffError};
use crate::core::walker::FilePair;

const HEADER: &[&str] = &["let s:spr = &splitright", "set splitright"];

const FOOTER: &[&str] = &[
    "let &splitright = s:spr",
    "tabdo windo :1",
    "tabdo windo diffthis",
    "tabdo windo diffupdate",
    "tabfirst | tabclose",
];

/// Bytes with a meaning on vim's command line (see `fnameescape()`).
const VIM_SPECIAL: &[u8] = b" \t\n\\%#|\"'!*?[{`$<";

/// Accumulated `tabedit` commands.
///
/// Lines are kept as raw bytes so that file names which are not valid UTF-8
/// reach vim unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VimScript {
    tabs: Vec<Vec<u8>>,
}

impl VimScript {
    /// Script with no tabs yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab showing `left` and `right` side by side
    pub fn push_tab(&mut self, left: &Path, right: &Path) -> Result<()> {
        let mut line = b"tabedit ".to_vec();
        line.extend(escape_vim_path(left)?);
        line.extend_from_slice(b" | vsp ");
        line.extend(escape_vim_path(right)?);
        self.tabs.push(line);
        Ok(())
    }

    /// Number of tabs the script will open
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Render the full script; it deletes `script_path` when sourced.
    pub fn render(&self, script_path: &Path) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut push_line = |line: &[u8]| {
            out.extend_from_slice(line);
            out.push(b'\n');
        };
        HEADER.iter().for_each(|l| push_line(l.as_bytes()));
        self.tabs.iter().for_each(|l| push_line(l.as_slice()));
        FOOTER.iter().for_each(|l| push_line(l.as_bytes()));

        out.extend_from_slice(b"call delete(\"");
        out.extend(escape_vim_string(&path_bytes(script_path)?));
        out.extend_from_slice(b"\")\n");
        Ok(out)
    }
}

/// Where each side of a pair lives on disk.
///
/// A missing side is mirrored from the present one: the same relative path
/// under the other root. Vim opens such a path as an empty buffer.
pub fn resolve_pair(pair: &FilePair, left_root: &Path, right_root: &Path) -> Result<(PathBuf, PathBuf)> {
    let (left, right) = match pair {
        FilePair::Both(left, right) => (left.clone(), right.clone()),
        FilePair::LeftOnly(left) => (left.clone(), mirror(left, left_root, right_root)?),
        FilePair::RightOnly(right) => (mirror(right, right_root, left_root)?, right.clone()),
    };
    Ok((absolute(&left)?, absolute(&right)?))
}

fn mirror(path: &Path, from_root: &Path, to_root: &Path) -> Result<PathBuf> {
    let relative = path
        .strip_prefix(from_root)
        .map_err(|_| TabdiffError::invalid_root(from_root, format!("{} is not under it", path.display())))?;
    Ok(to_root.join(relative))
}

/// Canonical path when it exists, otherwise the lexically absolute path.
fn absolute(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(_) => std::path::absolute(path).with_path("Failed to make path absolute", path),
    }
}

/// Exact bytes of `path` as the OS stores them.
#[cfg(unix)]
fn path_bytes(path: &Path) -> Result<Cow<'_, [u8]>> {
    use std::os::unix::ffi::OsStrExt;
    Ok(Cow::Borrowed(path.as_os_str().as_bytes()))
}

/// UTF-8 form of `path`; paths without one cannot be named in the script.
#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Result<Cow<'_, [u8]>> {
    path.to_str()
        .map(|s| Cow::Borrowed(s.as_bytes()))
        .ok_or_else(|| TabdiffError::UnrepresentablePath {
            path: path.to_path_buf(),
        })
}

/// Backslash-escape bytes vim would interpret in a file argument.
pub fn escape_vim_path(path: &Path) -> Result<Vec<u8>> {
    let raw = path_bytes(path)?;
    let mut escaped = Vec::with_capacity(raw.len());
    for &b in raw.iter() {
        if VIM_SPECIAL.contains(&b) {
            escaped.push(b'\\');
        }
        escaped.push(b);
    }
    Ok(escaped)
}

fn escape_vim_string(raw: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(raw.len());
    for &b in raw {
        if b == b'\\' || b == b'"' {
            escaped.push(b'\\');
        }
        escaped.push(b);
    }
    escaped
}
