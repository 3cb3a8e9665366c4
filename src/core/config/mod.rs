//! Configuration types and management for vimtabdiff-rs.
//!
//! A run is described by one [`TabdiffConfig`]: the exclusion globs threaded
//! through the walk, the editor to launch, and the guards the walker applies
//! while descending. The CLI layers a YAML file and command-line flags on top
//! of the defaults defined here.

pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TabdiffError};
use crate::core::exclusion::ExclusionMatcher;

pub use validation::{validate_non_empty, validate_positive_usize};

/// Pattern added to the exclusion list by `exclude_git` / `--git`.
pub const GIT_EXCLUDE_PATTERN: &str = "**/.git";

/// Main configuration for a tree comparison run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabdiffConfig {
    /// Glob patterns; matching files and directories are skipped entirely
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Add [`GIT_EXCLUDE_PATTERN`] to the exclusion list
    #[serde(default)]
    pub exclude_git: bool,

    /// Skip pairs whose two files have identical bytes
    #[serde(default)]
    pub only_diffs: bool,

    /// Editor invocation
    #[serde(default)]
    pub editor: EditorConfig,

    /// Tree walk guards
    #[serde(default)]
    pub walk: WalkConfig,
}

impl TabdiffConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| TabdiffError::io("Failed to read config file", &path, e))?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content)
            .map_err(|e| TabdiffError::io("Failed to write config file", &path, e))
    }

    /// Exclusion patterns in effect, with the git pattern appended when
    /// requested. Blank entries are dropped and duplicates removed, keeping
    /// the first occurrence.
    pub fn effective_exclude_patterns(&self) -> Vec<String> {
        let git = self
            .exclude_git
            .then(|| GIT_EXCLUDE_PATTERN.to_string());

        let mut patterns: Vec<String> = Vec::with_capacity(self.exclude_patterns.len() + 1);
        for pattern in self.exclude_patterns.iter().cloned().chain(git) {
            let pattern = pattern.trim().to_string();
            if !pattern.is_empty() && !patterns.contains(&pattern) {
                patterns.push(pattern);
            }
        }
        patterns
    }

    /// Compile the effective exclusion patterns
    pub fn build_matcher(&self) -> Result<ExclusionMatcher> {
        ExclusionMatcher::new(&self.effective_exclude_patterns())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        self.editor.validate()?;
        self.walk.validate()?;

        self.build_matcher().map_err(|e| {
            TabdiffError::config_field(
                format!("Invalid exclusion configuration: {e}"),
                "exclude_patterns",
            )
        })?;

        Ok(())
    }
}

/// Editor invocation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Command line used to start the editor; split on whitespace, the
    /// script is passed with `-S`
    #[serde(default = "EditorConfig::default_command")]
    pub command: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: Self::default_command(),
        }
    }
}

impl EditorConfig {
    fn default_command() -> String {
        "vim".to_string()
    }

    /// Validate editor configuration
    pub fn validate(&self) -> Result<()> {
        validate_non_empty(&self.command, "editor.command")
    }
}

/// Guards applied while descending into matched directories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    /// Fail once the walk goes this many levels below the roots
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Fail when a directory resolves to one of its own ancestors
    #[serde(default = "WalkConfig::default_detect_symlink_cycles")]
    pub detect_symlink_cycles: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            detect_symlink_cycles: Self::default_detect_symlink_cycles(),
        }
    }
}

impl WalkConfig {
    const fn default_detect_symlink_cycles() -> bool {
        true
    }

    /// Validate walk configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(depth) = self.max_depth {
            validate_positive_usize(depth, "walk.max_depth")?;
        }
        Ok(())
    }
}
