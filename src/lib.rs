//! # vimtabdiff-rs: Directory Tree Pairing for Side-by-Side Diffs
//!
//! Pairs up the files of two directory trees by name so that each pair can be
//! opened in its own vim tab with diff mode enabled.
//!
//! - **Pairing**: merge-join of the two sides' entries by base name, with
//!   left-only, right-only and matched outcomes
//! - **Walking**: lazy, pre-order recursion into matched directories
//! - **Exclusion**: glob patterns applied at every level of the walk
//! - **Session**: vim script generation and editor launch
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Session                          │
//! │        only-diffs filter · vim script · launcher         │
//! ├──────────────────────────────────────────────────────────┤
//! │                        TreeWalker                        │
//! ├─────────────────┬──────────────────┬─────────────────────┤
//! │ DirectoryScanner│      Pairer      │  ExclusionMatcher   │
//! └─────────────────┴──────────────────┴─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vimtabdiff_rs::{ExclusionMatcher, TreeWalker};
//! use std::path::Path;
//!
//! fn main() -> vimtabdiff_rs::Result<()> {
//!     let matcher = ExclusionMatcher::new(&["**/.git"])?;
//!     let walker = TreeWalker::new(&matcher);
//!
//!     for pair in walker.walk_roots(Path::new("old"), Path::new("new"))? {
//!         let pair = pair?;
//!         println!("{:?} <-> {:?}", pair.left(), pair.right());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Tree pairing algorithm and its configuration
pub mod core {
    //! Core pairing algorithm and supporting types.

    pub mod compare;
    pub mod config;
    pub mod errors;
    pub mod exclusion;
    pub mod pairing;
    pub mod scanner;
    pub mod walker;
}

// Vim script generation and editor launch
pub mod session;

// Re-export primary types for convenience
pub use crate::core::config::TabdiffConfig;
pub use crate::core::errors::{Result, TabdiffError};
pub use crate::core::exclusion::ExclusionMatcher;
pub use crate::core::pairing::{pair, Pair, Side};
pub use crate::core::walker::{walk_trees, FilePair, FilePairs, TreeWalker, WalkStats};
pub use session::{Session, SessionSummary};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
