//! mdfind core library
//!
//! Finds source documents by glob pattern and works out which of them are
//! newer than their rendered output. The conversion itself lives elsewhere;
//! this crate only reads directory listings and modification times.

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod staleness;

pub use api::{compute_update_list, compute_update_list_with, discover, discover_with};
pub use config::{DEFAULT_OUT_EXTENSION, StalenessConfig, TraversalConfig};
pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticSink, Diagnostics, NullSink, StderrSink, Verbosity,
};
pub use discovery::{
    DEFAULT_PATTERN, EntryVisitor, LISTING_PATTERN, MatchCollector, MatchSet, PatternMatcher,
    TreeWalker, WalkControl, WalkStats,
};
pub use error::{Error, Result};
pub use staleness::{RebuildPair, Staleness, StalenessResolver};
