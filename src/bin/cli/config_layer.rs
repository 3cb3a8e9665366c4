//! Configuration Layer Management
//!
//! Defaults, an optional YAML file and command-line flags are merged in that
//! order; later layers win.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::Cli;
use vimtabdiff_rs::core::config::TabdiffConfig;

/// File names looked up in the working directory when --config is absent
pub const IMPLICIT_CONFIG_FILES: [&str; 2] = [".vimtabdiff.yml", ".vimtabdiff.yaml"];

/// Trait for merging configuration layers
pub trait ConfigMerge<T> {
    /// Merge another configuration into this one, with the other taking priority
    fn merge_with(&mut self, other: T);
}

/// Convert CLI arguments to partial configuration overrides
pub trait FromCliArgs<T> {
    /// Create a partial configuration from CLI arguments
    fn from_cli_args(args: &T) -> Self;
}

/// Settings the command line can override; `None`/empty leaves the lower
/// layer untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub exclude_patterns: Vec<String>,
    pub exclude_git: bool,
    pub only_diffs: bool,
    pub editor_command: Option<String>,
    pub max_depth: Option<usize>,
    pub detect_symlink_cycles: Option<bool>,
}

impl FromCliArgs<Cli> for CliOverrides {
    fn from_cli_args(args: &Cli) -> Self {
        Self {
            exclude_patterns: args.exclude.clone(),
            exclude_git: args.git,
            only_diffs: args.onlydiffs,
            editor_command: args.vim.clone(),
            max_depth: args.max_depth,
            detect_symlink_cycles: args.no_cycle_check.then_some(false),
        }
    }
}

impl ConfigMerge<CliOverrides> for TabdiffConfig {
    fn merge_with(&mut self, other: CliOverrides) {
        // CLI patterns add to the file's patterns
        self.exclude_patterns.extend(other.exclude_patterns);
        self.exclude_git |= other.exclude_git;
        self.only_diffs |= other.only_diffs;

        if let Some(command) = other.editor_command {
            self.editor.command = command;
        }
        if let Some(depth) = other.max_depth {
            self.walk.max_depth = Some(depth);
        }
        if let Some(detect) = other.detect_symlink_cycles {
            self.walk.detect_symlink_cycles = detect;
        }
    }
}

/// Explicit --config, else the first implicit file present in `dir`
pub fn locate_config_file(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        IMPLICIT_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
    })
}

/// Enhanced configuration loading with layered approach
pub fn build_layered_config(args: &Cli) -> anyhow::Result<TabdiffConfig> {
    let mut config = TabdiffConfig::default();

    if let Some(config_path) = locate_config_file(args.config.as_deref(), Path::new(".")) {
        debug!("Loading configuration from {}", config_path.display());
        config = TabdiffConfig::from_yaml_file(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load configuration from {}: {}",
                config_path.display(),
                e
            )
        })?;
    }

    config.merge_with(CliOverrides::from_cli_args(args));

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}
