//! File discovery for finding files by glob pattern
//!
//! A [`TreeWalker`] walks the tree and tests base names with a
//! [`PatternMatcher`]; a [`MatchCollector`] gathers the matches into a sorted,
//! duplicate-free [`MatchSet`].

mod collector;
mod pattern;
mod walker;

pub use collector::{MatchCollector, MatchSet};
pub(crate) use collector::serialize_path_lossy;
pub use pattern::{DEFAULT_PATTERN, LISTING_PATTERN, PatternMatcher};
pub use walker::{EntryVisitor, OnFile, TreeWalker, WalkControl, WalkError, WalkStats};

use crate::config::TraversalConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;

/// Walk `config.root` and collect every matching leaf entry
pub fn collect_matches(config: &TraversalConfig, diagnostics: Diagnostics<'_>) -> Result<MatchSet> {
    let walker = TreeWalker::new(config)?;
    let mut collector = MatchCollector::new();

    let stats = walker.walk(&mut collector, diagnostics)?;
    log::debug!(
        "Walked {}: {} visited, {} matched, {} failed",
        walker.root().display(),
        stats.visited,
        stats.matched,
        stats.failed
    );

    Ok(collector.finish())
}
