//! Error types for the vimtabdiff-rs library.
//!
//! Every failure in the tree walk is fatal for the run, so the variants carry
//! enough context (usually the offending path) to be reported as-is.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main result type for vimtabdiff operations.
pub type Result<T> = std::result::Result<T, TabdiffError>;

/// Error type for all vimtabdiff operations.
#[derive(Error, Debug)]
pub enum TabdiffError {
    /// Filesystem access failures (unreadable directory, vanished entry, ...)
    #[error("I/O error: {message}: {}", .path.display())]
    Io {
        /// Human-readable error message
        message: String,
        /// Path the operation was working on
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Invalid exclusion glob
    #[error("Invalid exclusion pattern '{pattern}': {message}")]
    Pattern {
        /// The pattern as supplied by the caller
        pattern: String,
        /// Parser message from the glob engine
        message: String,
    },

    /// A root handed to the walker is unusable
    #[error("Invalid root {}: {reason}", .path.display())]
    InvalidRoot {
        /// The root as given
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// A directory resolves to one of its own ancestors
    #[error("Symlink cycle: {} resolves to ancestor {}", .path.display(), .ancestor.display())]
    SymlinkCycle {
        /// Directory that closed the cycle
        path: PathBuf,
        /// Canonical ancestor it points back to
        ancestor: PathBuf,
    },

    /// Walk went deeper than the configured limit
    #[error("Maximum walk depth {limit} exceeded at {}", .path.display())]
    DepthExceeded {
        /// Directory that would have exceeded the limit
        path: PathBuf,
        /// Configured limit
        limit: usize,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Validation errors for configuration values
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field that failed validation
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format involved
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Path that the vim script cannot name on this platform
    #[error("Cannot write {} into a vim script: not valid Unicode", .path.display())]
    UnrepresentablePath {
        /// The offending path
        path: PathBuf,
    },

    /// Editor could not be launched or exited unsuccessfully
    #[error("Editor '{command}' failed: {message}")]
    Editor {
        /// Editor command line
        command: String,
        /// What went wrong
        message: String,
    },
}

impl TabdiffError {
    /// Create a new I/O error with the path that caused it
    pub fn io(message: impl Into<String>, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new pattern error
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid root error
    pub fn invalid_root(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::InvalidRoot {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new editor error
    pub fn editor(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Editor {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Path involved in the failure, when there is one
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. }
            | Self::InvalidRoot { path, .. }
            | Self::SymlinkCycle { path, .. }
            | Self::DepthExceeded { path, .. }
            | Self::UnrepresentablePath { path } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TabdiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for TabdiffError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for attaching a path to raw I/O failures
pub trait IoResultExt<T> {
    /// Convert an `io::Result` into a [`Result`] naming the path involved
    fn with_path(self, message: &str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, io::Error> {
    fn with_path(self, message: &str, path: &Path) -> Result<T> {
        self.map_err(|e| TabdiffError::io(message, path, e))
    }
}
