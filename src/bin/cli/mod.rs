//! CLI Module Organization
//!
//! This module organizes the CLI functionality into cohesive sub-modules:
//! - args: CLI argument structures and output formats
//! - commands: Session construction and the vim/listing commands
//! - config_layer: Configuration layer management and merging
//! - output: Text and JSON pair listings

pub mod args;
pub mod commands;
pub mod config_layer;
pub mod output;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
