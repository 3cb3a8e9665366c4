//! A comparison run: walk two roots, filter the pairs, hand them to vim.
//!
//! - script: vim script rendering and pair path resolution
//! - launcher: temporary script file and editor process

pub mod launcher;
pub mod script;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::compare::files_identical;
use crate::core::config::TabdiffConfig;
use crate::core::errors::Result;
use crate::core::exclusion::ExclusionMatcher;
use crate::core::walker::{FilePair, FilePairs, TreeWalker, WalkStats};

pub use launcher::{run_editor, EditorCommand, ScriptFile};
pub use script::{escape_vim_path, resolve_pair, VimScript};

/// Outcome of consuming the pair stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Walker counters
    pub walk: WalkStats,
    /// Pairs handed to the consumer
    pub emitted: usize,
    /// Pairs dropped because both files were byte-identical
    pub skipped_identical: usize,
}

/// Two roots plus the configuration they are compared under.
#[derive(Debug, Clone)]
pub struct Session {
    config: TabdiffConfig,
    matcher: ExclusionMatcher,
    left_root: PathBuf,
    right_root: PathBuf,
}

impl Session {
    /// Validate `config` and compile its exclusion patterns.
    pub fn new(config: TabdiffConfig, left_root: impl Into<PathBuf>, right_root: impl Into<PathBuf>) -> Result<Self> {
        config.validate()?;
        let matcher = config.build_matcher()?;
        Ok(Self {
            config,
            matcher,
            left_root: left_root.into(),
            right_root: right_root.into(),
        })
    }

    /// Configuration in effect
    pub fn config(&self) -> &TabdiffConfig {
        &self.config
    }

    /// First root
    pub fn left_root(&self) -> &Path {
        &self.left_root
    }

    /// Second root
    pub fn right_root(&self) -> &Path {
        &self.right_root
    }

    /// Unfiltered lazy pair stream over both roots
    pub fn pairs(&self) -> Result<FilePairs<'_>> {
        TreeWalker::new(&self.matcher)
            .with_config(self.config.walk.clone())
            .walk_roots(&self.left_root, &self.right_root)
    }

    /// Feed every pair to `consume`, in walk order, dropping byte-identical
    /// pairs when `only_diffs` is set. Stops at the first error.
    pub fn for_each_pair<F>(&self, mut consume: F) -> Result<SessionSummary>
    where
        F: FnMut(FilePair) -> Result<()>,
    {
        let mut pairs = self.pairs()?;
        let mut summary = SessionSummary::default();

        for pair in pairs.by_ref() {
            let pair = pair?;
            if self.config.only_diffs {
                if let FilePair::Both(left, right) = &pair {
                    if files_identical(left, right)? {
                        debug!("Skipping identical {}", left.display());
                        summary.skipped_identical += 1;
                        continue;
                    }
                }
            }
            consume(pair)?;
            summary.emitted += 1;
        }

        summary.walk = pairs.stats();
        info!(
            "Paired {} files in {} directories ({} both, {} left only, {} right only, {} identical skipped)",
            summary.walk.total(),
            summary.walk.directories,
            summary.walk.matched,
            summary.walk.left_only,
            summary.walk.right_only,
            summary.skipped_identical
        );
        Ok(summary)
    }

    /// Build the vim script for this session.
    pub fn build_script(&self) -> Result<(VimScript, SessionSummary)> {
        let mut script = VimScript::new();
        let summary = self.for_each_pair(|pair| {
            let (left, right) = resolve_pair(&pair, &self.left_root, &self.right_root)?;
            script.push_tab(&left, &right)
        })?;
        Ok((script, summary))
    }

    /// Editor command from the configuration
    pub fn editor(&self) -> Result<EditorCommand> {
        EditorCommand::parse(&self.config.editor.command)
    }
}
