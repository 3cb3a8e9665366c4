//! Pair listings for the text and json formats.

use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::cli::args::OutputFormat;
use vimtabdiff_rs::core::errors::{Result, TabdiffError};
use vimtabdiff_rs::{FilePair, Pair};

/// Placeholder for an absent side in text listings
pub const ABSENT: &str = "-";

/// One pair as a JSON object. Paths are written lossily as strings; a
/// name that is not valid UTF-8 also carries its exact bytes.
#[derive(Debug, Serialize)]
struct PairRecord<'a> {
    status: &'static str,
    left: Option<Cow<'a, str>>,
    right: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    left_bytes: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right_bytes: Option<Vec<u8>>,
}

impl<'a> From<&'a FilePair> for PairRecord<'a> {
    fn from(pair: &'a FilePair) -> Self {
        let status = match pair {
            Pair::Both(..) => "both",
            Pair::LeftOnly(_) => "left_only",
            Pair::RightOnly(_) => "right_only",
        };
        Self {
            status,
            left: pair.left().map(|p| p.to_string_lossy()),
            right: pair.right().map(|p| p.to_string_lossy()),
            left_bytes: pair.left().and_then(|p| raw_bytes(p)),
            right_bytes: pair.right().and_then(|p| raw_bytes(p)),
        }
    }
}

/// Exact bytes of a path whose name is not valid UTF-8
#[cfg(unix)]
fn raw_bytes(path: &Path) -> Option<Vec<u8>> {
    use std::os::unix::ffi::OsStrExt;
    path.to_str()
        .is_none()
        .then(|| path.as_os_str().as_bytes().to_vec())
}

#[cfg(not(unix))]
fn raw_bytes(_path: &Path) -> Option<Vec<u8>> {
    None
}

/// Render one pair as a single line (without the newline).
pub fn format_pair(pair: &FilePair, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&PairRecord::from(pair))?),
        OutputFormat::Text | OutputFormat::Vim => {
            let side = |p: Option<&std::path::PathBuf>| {
                p.map_or_else(|| ABSENT.to_string(), |p| p.display().to_string())
            };
            Ok(format!("{}\t{}", side(pair.left()), side(pair.right())))
        }
    }
}

/// Write `pair` to `out` as one line.
pub fn write_pair(out: &mut impl Write, pair: &FilePair, format: OutputFormat) -> Result<()> {
    let line = format_pair(pair, format)?;
    writeln!(out, "{line}")
        .map_err(|e| TabdiffError::io("Failed to write listing", Path::new("<stdout>"), e))
}
