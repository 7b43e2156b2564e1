//! Test utilities for mdfind
//!
//! Builds throwaway source and destination trees with controlled
//! modification times, plus a visitor that records everything a walk reports.

pub mod builders;
pub mod visitors;

pub use builders::{TestTree, TreeBuilder, set_mtime, write_file_at};
pub use visitors::RecordingVisitor;
