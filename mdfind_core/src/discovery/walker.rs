//! Depth-bounded directory walker
//!
//! Walks a tree with walkdir, tests each leaf entry's base name against a
//! [`PatternMatcher`] and hands matches to an [`EntryVisitor`]. Errors on
//! individual entries are reported and skipped; only a root that cannot be
//! opened ends the walk.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::pattern::PatternMatcher;
use crate::config::TraversalConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{IoError, Result};

pub use walkdir::Error as WalkError;

/// What the walker should do after a visitor callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
    /// Keep walking
    Continue,
    /// Do not descend into the current directory
    SkipSubtree,
    /// Stop the walk and fail with an aborted error
    Abort,
}

/// Callbacks invoked during a walk
///
/// Only `on_file` is required. Directories are entered and errors are
/// skipped unless the visitor says otherwise.
pub trait EntryVisitor {
    /// A leaf entry whose base name matched the pattern
    fn on_file(&mut self, path: &Path);

    /// A directory below the root, before its children are read
    fn on_directory_enter(&mut self, _path: &Path) -> WalkControl {
        WalkControl::Continue
    }

    /// An entry that could not be read
    fn on_error(&mut self, _path: Option<&Path>, _cause: &WalkError) -> WalkControl {
        WalkControl::Continue
    }
}

/// Adapts a closure into an [`EntryVisitor`] that only sees matches
pub struct OnFile<F>(pub F);

impl<F: FnMut(&Path)> EntryVisitor for OnFile<F> {
    fn on_file(&mut self, path: &Path) {
        (self.0)(path)
    }
}

/// Counters for one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Entries below the root that were read
    pub visited: usize,
    /// Entries handed to `on_file`
    pub matched: usize,
    /// Entries that failed and were skipped
    pub failed: usize,
}

/// Walker bound to one traversal configuration
#[derive(Debug)]
pub struct TreeWalker {
    root: PathBuf,
    /// Walking the implicit working directory: render paths without `./`
    relative_to_cwd: bool,
    matcher: PatternMatcher,
    max_depth: Option<usize>,
    follow_links: bool,
}

impl TreeWalker {
    /// Prepare a walk, compiling the pattern before anything touches disk
    pub fn new(config: &TraversalConfig) -> Result<Self> {
        let matcher = PatternMatcher::or_default(config.pattern.as_deref())?;

        let (root, relative_to_cwd) = match config.explicit_root() {
            Some(root) => (root.to_path_buf(), false),
            None => (PathBuf::from("."), true),
        };

        Ok(Self {
            root,
            relative_to_cwd,
            matcher,
            max_depth: config.effective_max_depth(),
            follow_links: config.follow_links,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree, feeding matches to `visitor`
    ///
    /// Fails when the root is missing, is not a directory or cannot be
    /// listed, or when the visitor returns [`WalkControl::Abort`].
    pub fn walk<V: EntryVisitor + ?Sized>(
        &self,
        visitor: &mut V,
        diagnostics: Diagnostics<'_>,
    ) -> Result<WalkStats> {
        self.check_root()?;

        let mut walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut stats = WalkStats::default();
        let mut entries = walker.into_iter();

        while let Some(next) = entries.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(root_error(&self.root, err).into());
                }
                Err(err) => {
                    stats.failed += 1;
                    let path = err.path().map(|p| self.display_path(p).to_path_buf());
                    log::debug!("Walk error under {}: {err}", self.root.display());
                    diagnostics.report(Diagnostic::EntryFailed {
                        path: path.clone(),
                        message: entry_error_message(&err),
                    });

                    match visitor.on_error(path.as_deref(), &err) {
                        WalkControl::Abort => {
                            return Err(IoError::aborted(path.as_deref(), err.into_io_error()).into());
                        }
                        WalkControl::Continue | WalkControl::SkipSubtree => continue,
                    }
                }
            };

            if entry.depth() == 0 {
                continue;
            }
            stats.visited += 1;

            let path = self.display_path(entry.path());

            if entry.file_type().is_dir() {
                match visitor.on_directory_enter(path) {
                    WalkControl::Continue => {}
                    WalkControl::SkipSubtree => entries.skip_current_dir(),
                    WalkControl::Abort => {
                        return Err(IoError::aborted(Some(path), None).into());
                    }
                }
                continue;
            }

            if self.is_match(&entry) {
                stats.matched += 1;
                log::trace!("Matched {}", path.display());
                diagnostics.report(Diagnostic::Matched(path.to_path_buf()));
                visitor.on_file(path);
            }
        }

        report_summary(&stats, diagnostics);
        Ok(stats)
    }

    fn check_root(&self) -> Result<()> {
        let metadata = fs::metadata(&self.root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IoError::not_found(&self.root),
            std::io::ErrorKind::PermissionDenied => IoError::permission_denied(&self.root, e),
            _ => IoError::from_std(e).with_path(&self.root),
        })?;

        if !metadata.is_dir() {
            return Err(IoError::not_a_directory(&self.root).into());
        }
        Ok(())
    }

    fn is_match(&self, entry: &DirEntry) -> bool {
        self.matcher.matches(entry.file_name())
    }

    fn display_path<'p>(&self, path: &'p Path) -> &'p Path {
        if self.relative_to_cwd {
            path.strip_prefix(".").unwrap_or(path)
        } else {
            path
        }
    }
}

fn report_summary(stats: &WalkStats, diagnostics: Diagnostics<'_>) {
    if !diagnostics.enabled(crate::diagnostics::Verbosity::Summary) {
        return;
    }

    match std::env::current_dir() {
        Ok(cwd) => diagnostics.report(Diagnostic::WorkingDirectory(cwd)),
        Err(e) => log::debug!("Could not resolve working directory: {e}"),
    }
    diagnostics.report(Diagnostic::MatchCount(stats.matched));
}

fn root_error(root: &Path, err: WalkError) -> IoError {
    match err.into_io_error() {
        Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
            IoError::permission_denied(root, io)
        }
        Some(io) => IoError::from_std(io).with_path(root),
        None => IoError::aborted(Some(root), None),
    }
}

fn entry_error_message(err: &WalkError) -> String {
    if let Some(ancestor) = err.loop_ancestor() {
        return format!("symlink loop back to {}", ancestor.display());
    }
    match err.io_error() {
        Some(io) => io.to_string(),
        None => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, Verbosity};
    use crate::error::{Error, IoErrorKind};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("intro.md"), b"# intro").unwrap();
        fs::write(base.join("notes.txt"), b"notes").unwrap();
        fs::create_dir(base.join("guide.md")).unwrap();

        let chapters = base.join("chapters");
        fs::create_dir(&chapters).unwrap();
        fs::write(chapters.join("one.md"), b"# one").unwrap();

        let drafts = chapters.join("drafts");
        fs::create_dir(&drafts).unwrap();
        fs::write(drafts.join("two.md"), b"# two").unwrap();

        dir
    }

    #[derive(Default)]
    struct Recorder {
        files: Vec<PathBuf>,
        dirs: Vec<PathBuf>,
        skip: Option<&'static str>,
    }

    impl EntryVisitor for Recorder {
        fn on_file(&mut self, path: &Path) {
            self.files.push(path.to_path_buf());
        }

        fn on_directory_enter(&mut self, path: &Path) -> WalkControl {
            self.dirs.push(path.to_path_buf());
            match self.skip {
                Some(name) if path.file_name().is_some_and(|n| n == name) => {
                    WalkControl::SkipSubtree
                }
                _ => WalkControl::Continue,
            }
        }
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_non_recursive_walk_stays_at_top() {
        let dir = create_test_directory();
        let config = TraversalConfig::new().with_root(dir.path());
        let walker = TreeWalker::new(&config).unwrap();

        let mut recorder = Recorder::default();
        let stats = walker.walk(&mut recorder, Diagnostics::silent()).unwrap();

        assert_eq!(names(&recorder.files), vec!["intro.md"]);
        assert_eq!(stats.matched, 1);
        // intro.md, notes.txt, guide.md/, chapters/
        assert_eq!(stats.visited, 4);
    }

    #[test]
    fn test_recursive_walk_reaches_every_level() {
        let dir = create_test_directory();
        let config = TraversalConfig::new()
            .with_root(dir.path())
            .with_recursive(true);
        let walker = TreeWalker::new(&config).unwrap();

        let mut recorder = Recorder::default();
        walker.walk(&mut recorder, Diagnostics::silent()).unwrap();

        assert_eq!(names(&recorder.files), vec!["intro.md", "one.md", "two.md"]);
    }

    #[test]
    fn test_directories_are_never_matched() {
        let dir = create_test_directory();
        let config = TraversalConfig::new()
            .with_root(dir.path())
            .with_recursive(true);
        let walker = TreeWalker::new(&config).unwrap();

        let mut recorder = Recorder::default();
        walker.walk(&mut recorder, Diagnostics::silent()).unwrap();

        assert!(!recorder.files.iter().any(|p| p.ends_with("guide.md")));
        assert!(recorder.dirs.iter().any(|p| p.ends_with("guide.md")));
    }

    #[test]
    fn test_skip_subtree() {
        let dir = create_test_directory();
        let config = TraversalConfig::new()
            .with_root(dir.path())
            .with_recursive(true);
        let walker = TreeWalker::new(&config).unwrap();

        let mut recorder = Recorder {
            skip: Some("drafts"),
            ..Default::default()
        };
        walker.walk(&mut recorder, Diagnostics::silent()).unwrap();

        assert_eq!(names(&recorder.files), vec!["intro.md", "one.md"]);
    }

    #[test]
    fn test_max_depth_caps_recursion() {
        let dir = create_test_directory();
        let config = TraversalConfig::new()
            .with_root(dir.path())
            .with_recursive(true)
            .with_max_depth(Some(2));
        let walker = TreeWalker::new(&config).unwrap();

        let mut found = Vec::new();
        walker
            .walk(
                &mut OnFile(|p: &Path| found.push(p.to_path_buf())),
                Diagnostics::silent(),
            )
            .unwrap();

        assert_eq!(names(&found), vec!["intro.md", "one.md"]);
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let config = TraversalConfig::new().with_root(&missing);
        let walker = TreeWalker::new(&config).unwrap();

        let err = walker
            .walk(&mut Recorder::default(), Diagnostics::silent())
            .unwrap_err();

        match err {
            Error::Io(io) => {
                assert_eq!(io.kind, IoErrorKind::NotFound);
                assert_eq!(io.path, Some(missing));
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_file_root_fails() {
        let dir = create_test_directory();
        let config = TraversalConfig::new().with_root(dir.path().join("intro.md"));
        let walker = TreeWalker::new(&config).unwrap();

        let err = walker
            .walk(&mut Recorder::default(), Diagnostics::silent())
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Io(IoError {
                kind: IoErrorKind::NotADirectory,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_pattern_fails_before_walk() {
        let config = TraversalConfig::new()
            .with_root("/definitely/not/here")
            .with_pattern("[ ");

        let err = TreeWalker::new(&config).unwrap_err();
        assert!(err.is_pattern_error());
    }

    #[test]
    fn test_summary_diagnostics() {
        let dir = create_test_directory();
        let config = TraversalConfig::new()
            .with_root(dir.path())
            .with_recursive(true);
        let walker = TreeWalker::new(&config).unwrap();
        let sink = CollectingSink::new();

        walker
            .walk(
                &mut Recorder::default(),
                Diagnostics::new(&sink, Verbosity::Summary),
            )
            .unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("PWD: "));
        assert_eq!(lines[1], "Matched: 3");
    }

    #[test]
    fn test_detailed_diagnostics_list_matches() {
        let dir = create_test_directory();
        let config = TraversalConfig::new().with_root(dir.path());
        let walker = TreeWalker::new(&config).unwrap();
        let sink = CollectingSink::new();

        walker
            .walk(
                &mut Recorder::default(),
                Diagnostics::new(&sink, Verbosity::Detailed),
            )
            .unwrap();

        let events = sink.events();
        assert_eq!(
            events[0],
            Diagnostic::Matched(dir.path().join("intro.md"))
        );
        assert_eq!(events.last(), Some(&Diagnostic::MatchCount(1)));
    }
}
