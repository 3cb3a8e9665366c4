//! Exclusion of scanned paths by glob pattern.
//!
//! Patterns are matched against the path exactly as the scanner produced it
//! (root-joined, not relative to the root), so a pattern meant to apply at any
//! depth needs a leading `**/`, e.g. `**/.git`.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::core::errors::{Result, TabdiffError};

/// Compiled, immutable set of exclusion globs for one run.
///
/// `**` spans any number of path segments, including none; `*` and `?` stay
/// within one segment.
#[derive(Debug, Clone)]
pub struct ExclusionMatcher {
    patterns: Vec<String>,
    set: GlobSet,
}

impl ExclusionMatcher {
    /// Compile `patterns`. Fails on the first malformed pattern.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|err| TabdiffError::pattern(pattern, err.kind().to_string()))?;
            builder.add(glob);
            kept.push(pattern.to_string());
        }

        let set = builder
            .build()
            .map_err(|err| TabdiffError::pattern(kept.join(","), err.to_string()))?;

        Ok(Self {
            patterns: kept,
            set,
        })
    }

    /// A matcher that excludes nothing
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    /// Whether `path` matches any exclusion pattern
    pub fn is_excluded(&self, path: &Path) -> bool {
        !self.patterns.is_empty() && self.set.is_match(path)
    }

    /// Patterns this matcher was built from
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True when no patterns were supplied
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for ExclusionMatcher {
    fn default() -> Self {
        Self::empty()
    }
}
