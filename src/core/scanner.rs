//! Single-level directory listing for the tree walk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::errors::{IoResultExt, Result};
use crate::core::exclusion::ExclusionMatcher;

/// Immediate children of one directory, split by kind.
///
/// Order is whatever the filesystem returned; the pairer sorts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    /// Subdirectories (symlinks to directories included)
    pub dirs: Vec<PathBuf>,
    /// Everything that is not a directory
    pub files: Vec<PathBuf>,
}

impl DirListing {
    /// Total number of kept entries
    pub fn len(&self) -> usize {
        self.dirs.len() + self.files.len()
    }

    /// True when nothing was kept
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }
}

/// List the non-excluded children of `dir`.
///
/// `None` stands for the missing side of a one-sided directory pair and
/// yields an empty listing. Any failure to read the directory or one of its
/// entries is returned with the offending path.
pub fn scan(dir: Option<&Path>, matcher: &ExclusionMatcher) -> Result<DirListing> {
    let Some(dir) = dir else {
        return Ok(DirListing::default());
    };

    let mut listing = DirListing::default();
    let mut excluded = 0usize;

    for entry in fs::read_dir(dir).with_path("Failed to list directory", dir)? {
        let entry = entry.with_path("Failed to read directory entry", dir)?;
        let path = entry.path();

        if matcher.is_excluded(&path) {
            excluded += 1;
            continue;
        }

        if path.is_dir() {
            listing.dirs.push(path);
        } else {
            listing.files.push(path);
        }
    }

    debug!(
        "Scanned {}: {} dirs, {} files, {} excluded",
        dir.display(),
        listing.dirs.len(),
        listing.files.len(),
        excluded
    );

    Ok(listing)
}
