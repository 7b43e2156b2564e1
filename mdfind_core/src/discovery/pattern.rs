//! Glob pattern matching against entry base names
//!
//! Patterns are compiled with `literal_separator` enabled so that `*` and `?`
//! never cross a `/`: a pattern describes a single file name, not a path.

use globset::{GlobBuilder, GlobMatcher};
use std::ffi::OsStr;
use std::path::Path;

use crate::error::{PatternError, Result};

/// Pattern used when discovering documents and none was supplied
pub const DEFAULT_PATTERN: &str = "*.md";

/// Pattern that matches every entry, used for plain listings
pub const LISTING_PATTERN: &str = "*";

/// Compiled glob that tests base names
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    matcher: GlobMatcher,
}

impl PatternMatcher {
    /// Compile a glob pattern
    ///
    /// Fails with [`PatternError`] on malformed syntax such as an unclosed
    /// character class (`"[ "`) or alternation (`"*.{md"`).
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|e| PatternError::from_glob(pattern, &e))?;

        log::trace!("Compiled pattern {pattern:?} to {:?}", glob.regex());

        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    /// Compile `pattern`, or [`DEFAULT_PATTERN`] when absent
    pub fn or_default(pattern: Option<&str>) -> Result<Self> {
        Self::new(pattern.unwrap_or(DEFAULT_PATTERN))
    }

    /// Check a base name against the pattern
    pub fn matches(&self, base_name: &OsStr) -> bool {
        self.matcher.is_match(Path::new(base_name))
    }

    /// Check the final component of `path`
    ///
    /// Paths without a final component (`/`, `..`) never match.
    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| self.matches(name))
    }

    /// The pattern as supplied
    pub fn pattern(&self) -> &str {
        self.matcher.glob().glob()
    }
}
