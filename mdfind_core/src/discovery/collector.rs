//! Match accumulation
//!
//! [`MatchSet`] orders paths by their rendered string, byte for byte, rather
//! than component-wise like `PathBuf`'s own `Ord`. `a-b/x` therefore sorts
//! before `a/x`, the same order a plain string sort gives.
//!
//! Paths serialize as strings; bytes that are not valid UTF-8 become U+FFFD.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use super::walker::EntryVisitor;

/// Path ordered lexically by its OS string
#[derive(Debug, Clone)]
struct LexicalPath(PathBuf);

impl PartialEq for LexicalPath {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_os_str() == other.0.as_os_str()
    }
}

impl Eq for LexicalPath {}

impl Ord for LexicalPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.as_os_str().cmp(other.0.as_os_str())
    }
}

impl PartialOrd for LexicalPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sorted, duplicate-free set of matched paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    paths: BTreeSet<LexicalPath>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path, returning false if it was already present
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        self.paths.insert(LexicalPath(path.into()))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(&LexicalPath(path.to_path_buf()))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in lexical order
    pub fn iter(&self) -> impl Iterator<Item = &Path> + '_ {
        self.paths.iter().map(|p| p.0.as_path())
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths.into_iter().map(|p| p.0).collect()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for MatchSet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

impl IntoIterator for MatchSet {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl Serialize for MatchSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(Path::to_string_lossy))
    }
}

/// Serialize a path as a string, replacing invalid UTF-8
pub(crate) fn serialize_path_lossy<S: Serializer>(
    path: &Path,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Visitor that gathers every match into a [`MatchSet`]
#[derive(Debug, Default)]
pub struct MatchCollector {
    matches: MatchSet,
}

impl MatchCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> MatchSet {
        self.matches
    }
}

impl EntryVisitor for MatchCollector {
    fn on_file(&mut self, path: &Path) {
        if !self.matches.insert(path) {
            log::trace!("Ignoring repeated match {}", path.display());
        }
    }
}
