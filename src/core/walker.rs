//! Recursive pairing of two directory trees.
//!
//! [`FilePairs`] is a depth-first, pre-order iterator: the file pairs of a
//! directory come out before anything from its matched subdirectories, and
//! subdirectories are visited in the order the directory merge produced
//! them. A directory is only listed once the consumer has pulled every pair
//! in front of it, so dropping the iterator stops the walk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::WalkConfig;
use crate::core::errors::{IoResultExt, Result, TabdiffError};
use crate::core::exclusion::ExclusionMatcher;
use crate::core::pairing::{pair, Pair, Pairs};
use crate::core::scanner::scan;

/// A pair of files, at least one of them present.
pub type FilePair = Pair<PathBuf>;

/// Counters collected while walking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Directory pairs listed (one-sided pairs included)
    pub directories: usize,
    /// File pairs with both sides present
    pub matched: usize,
    /// File pairs present only under the left root
    pub left_only: usize,
    /// File pairs present only under the right root
    pub right_only: usize,
}

impl WalkStats {
    /// Number of file pairs emitted so far
    pub fn total(&self) -> usize {
        self.matched + self.left_only + self.right_only
    }

    fn record(&mut self, pair: &FilePair) {
        match pair {
            Pair::Both(..) => self.matched += 1,
            Pair::LeftOnly(_) => self.left_only += 1,
            Pair::RightOnly(_) => self.right_only += 1,
        }
    }
}

/// Entry point for walking two trees with one exclusion set.
#[derive(Debug, Clone)]
pub struct TreeWalker<'m> {
    matcher: &'m ExclusionMatcher,
    config: WalkConfig,
}

impl<'m> TreeWalker<'m> {
    /// Walker with default guards
    pub fn new(matcher: &'m ExclusionMatcher) -> Self {
        Self {
            matcher,
            config: WalkConfig::default(),
        }
    }

    /// Replace the walk guards
    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    /// Lazily pair the files under `left` and `right`. Either side may be
    /// absent, in which case everything on the other side is one-sided.
    pub fn walk(&self, left: Option<PathBuf>, right: Option<PathBuf>) -> FilePairs<'m> {
        FilePairs {
            matcher: self.matcher,
            config: self.config.clone(),
            pending: Some((left, right)),
            stack: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    /// Check that both user roots are directories, then walk them.
    pub fn walk_roots(&self, left: &Path, right: &Path) -> Result<FilePairs<'m>> {
        check_root(left)?;
        check_root(right)?;
        Ok(self.walk(Some(left.to_path_buf()), Some(right.to_path_buf())))
    }
}

/// Pair the files of two trees with default guards.
pub fn walk_trees<'m>(
    left: Option<PathBuf>,
    right: Option<PathBuf>,
    matcher: &'m ExclusionMatcher,
) -> FilePairs<'m> {
    TreeWalker::new(matcher).walk(left, right)
}

fn check_root(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root).with_path("Cannot access root", root)?;
    if !metadata.is_dir() {
        return Err(TabdiffError::invalid_root(root, "not a directory"));
    }
    Ok(())
}

/// One directory pair being walked.
#[derive(Debug)]
struct Frame {
    files: Pairs<PathBuf>,
    dirs: Pairs<PathBuf>,
    left_canonical: Option<PathBuf>,
    right_canonical: Option<PathBuf>,
}

/// Lazy stream of file pairs produced by [`TreeWalker::walk`].
///
/// Yields `Err` at most once; the stream ends after a failure.
#[derive(Debug)]
pub struct FilePairs<'m> {
    matcher: &'m ExclusionMatcher,
    config: WalkConfig,
    pending: Option<(Option<PathBuf>, Option<PathBuf>)>,
    stack: Vec<Frame>,
    stats: WalkStats,
}

impl FilePairs<'_> {
    /// Counters for everything yielded so far
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    fn open(&mut self, left: Option<PathBuf>, right: Option<PathBuf>) -> Result<Frame> {
        let depth = self.stack.len();
        if let Some(limit) = self.config.max_depth {
            if depth > limit {
                let path = left.or(right).unwrap_or_default();
                return Err(TabdiffError::DepthExceeded { path, limit });
            }
        }

        let (left_canonical, right_canonical) = if self.config.detect_symlink_cycles {
            (
                self.check_cycle(left.as_deref(), |f| f.left_canonical.as_ref())?,
                self.check_cycle(right.as_deref(), |f| f.right_canonical.as_ref())?,
            )
        } else {
            (None, None)
        };

        let left_listing = scan(left.as_deref(), self.matcher)?;
        let right_listing = scan(right.as_deref(), self.matcher)?;
        self.stats.directories += 1;

        debug!(
            "Walking {} <-> {} at depth {}",
            display_side(left.as_deref()),
            display_side(right.as_deref()),
            depth
        );

        Ok(Frame {
            files: pair(left_listing.files, right_listing.files),
            dirs: pair(left_listing.dirs, right_listing.dirs),
            left_canonical,
            right_canonical,
        })
    }

    /// Canonicalize `dir` and make sure none of the open frames on the same
    /// side already resolved to it.
    fn check_cycle(
        &self,
        dir: Option<&Path>,
        side: impl Fn(&Frame) -> Option<&PathBuf>,
    ) -> Result<Option<PathBuf>> {
        let Some(dir) = dir else {
            return Ok(None);
        };

        let canonical = fs::canonicalize(dir).with_path("Failed to resolve directory", dir)?;
        if let Some(ancestor) = self.stack.iter().filter_map(&side).find(|a| **a == canonical) {
            return Err(TabdiffError::SymlinkCycle {
                path: dir.to_path_buf(),
                ancestor: ancestor.clone(),
            });
        }

        Ok(Some(canonical))
    }
}

impl Iterator for FilePairs<'_> {
    type Item = Result<FilePair>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((left, right)) = self.pending.take() {
                match self.open(left, right) {
                    Ok(frame) => self.stack.push(frame),
                    Err(err) => {
                        self.stack.clear();
                        return Some(Err(err));
                    }
                }
            }

            let frame = self.stack.last_mut()?;
            if let Some(file_pair) = frame.files.next() {
                self.stats.record(&file_pair);
                return Some(Ok(file_pair));
            }

            match frame.dirs.next() {
                Some(dir_pair) => self.pending = Some(dir_pair.into_parts()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

fn display_side(path: Option<&Path>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}
