//! Entry points used by the conversion front end
//!
//! [`discover`] lists matching files; [`compute_update_list`] pairs each stale
//! source with the output it should be rendered to. Both print diagnostics to
//! stderr at the requested verbosity. The `_with` variants take prebuilt
//! configuration and a caller-supplied [`DiagnosticSink`].

use std::path::Path;

use crate::config::{StalenessConfig, TraversalConfig};
use crate::diagnostics::{DiagnosticSink, Diagnostics, StderrSink, Verbosity};
use crate::discovery::{MatchCollector, MatchSet, TreeWalker, collect_matches};
use crate::error::Result;
use crate::staleness::{RebuildPair, StalenessResolver};

/// List files under `source_dir` whose base name matches `pattern`
///
/// `source_dir` defaults to the working directory and `pattern` to `*.md`.
/// Only the top level is searched unless `recursive` is set.
pub fn discover(
    source_dir: Option<&Path>,
    pattern: Option<&str>,
    recursive: bool,
    verbosity: impl Into<Verbosity>,
) -> Result<MatchSet> {
    let config = TraversalConfig::new()
        .with_root_opt(source_dir)
        .with_pattern_opt(pattern)
        .with_recursive(recursive)
        .with_verbosity(verbosity);

    discover_with(&config, &StderrSink)
}

/// [`discover`] with explicit configuration and diagnostics
pub fn discover_with(config: &TraversalConfig, sink: &dyn DiagnosticSink) -> Result<MatchSet> {
    collect_matches(config, Diagnostics::new(sink, config.verbosity))
}

/// Sources under `source_dir` that need rebuilding, paired with their outputs
///
/// Outputs are placed under `dest_dir` with the source root stripped, or next
/// to each source when `dest_dir` is `None`. The extension defaults to
/// `.html`. Pairs come back sorted by source path.
pub fn compute_update_list(
    source_dir: Option<&Path>,
    dest_dir: Option<&Path>,
    pattern: Option<&str>,
    out_extension: Option<&str>,
    recursive: bool,
    verbosity: impl Into<Verbosity>,
) -> Result<Vec<RebuildPair>> {
    let traversal = TraversalConfig::new()
        .with_root_opt(source_dir)
        .with_pattern_opt(pattern)
        .with_recursive(recursive)
        .with_verbosity(verbosity);
    let staleness = StalenessConfig::new()
        .with_source_root(source_dir)
        .with_dest_root(dest_dir)
        .with_out_extension(out_extension);

    compute_update_list_with(&traversal, &staleness, &StderrSink)
}

/// [`compute_update_list`] with explicit configuration and diagnostics
///
/// When `staleness.source_root` is unset it is taken from `traversal.root`.
pub fn compute_update_list_with(
    traversal: &TraversalConfig,
    staleness: &StalenessConfig,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<RebuildPair>> {
    let diagnostics = Diagnostics::new(sink, traversal.verbosity);

    let mut staleness = staleness.clone();
    if staleness.source_root.is_none() {
        staleness.source_root = traversal.root.clone();
    }

    // Pattern and both roots are checked before any directory is listed
    let walker = TreeWalker::new(traversal)?;
    let resolver = StalenessResolver::new(staleness);
    resolver.check_destination_root()?;

    let mut collector = MatchCollector::new();
    walker.walk(&mut collector, diagnostics)?;

    resolver.resolve(&collector.finish(), diagnostics)
}
