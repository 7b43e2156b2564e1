//! Per-invocation configuration for discovery and staleness resolution

use std::path::{Path, PathBuf};

use crate::diagnostics::Verbosity;

/// Output extension used when none was supplied
pub const DEFAULT_OUT_EXTENSION: &str = ".html";

/// Options for a single tree walk
#[derive(Debug, Clone, Default)]
pub struct TraversalConfig {
    /// Directory to start from (None = current working directory)
    pub root: Option<PathBuf>,
    /// Glob pattern for base names (None = `*.md`)
    pub pattern: Option<String>,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Depth cap for recursive walks (None = unlimited)
    pub max_depth: Option<usize>,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Diagnostic verbosity
    pub verbosity: Verbosity,
}

impl TraversalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_root_opt(mut self, root: Option<&Path>) -> Self {
        self.root = root.map(Path::to_path_buf);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_pattern_opt(mut self, pattern: Option<&str>) -> Self {
        self.pattern = pattern.map(str::to_string);
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Cap recursive walks at `depth` levels; ignored when not recursive
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_verbosity(mut self, verbosity: impl Into<Verbosity>) -> Self {
        self.verbosity = verbosity.into();
        self
    }

    /// Depth bound handed to the walker: 1 unless recursive
    pub fn effective_max_depth(&self) -> Option<usize> {
        if self.recursive {
            self.max_depth
        } else {
            Some(1)
        }
    }

    /// The root if one was given and it is not the empty path
    pub fn explicit_root(&self) -> Option<&Path> {
        self.root
            .as_deref()
            .filter(|root| !root.as_os_str().is_empty())
    }
}

/// Options for mapping sources onto destinations
#[derive(Debug, Clone, Default)]
pub struct StalenessConfig {
    /// Source root whose prefix is stripped from matched paths
    pub source_root: Option<PathBuf>,
    /// Destination root (None = next to each source)
    pub dest_root: Option<PathBuf>,
    /// Output extension including the dot (None = `.html`)
    pub out_extension: Option<String>,
}

impl StalenessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_root(mut self, root: Option<&Path>) -> Self {
        self.source_root = root.map(Path::to_path_buf);
        self
    }

    pub fn with_dest_root(mut self, root: Option<&Path>) -> Self {
        self.dest_root = root.map(Path::to_path_buf);
        self
    }

    pub fn with_out_extension(mut self, extension: Option<&str>) -> Self {
        self.out_extension = extension.map(str::to_string);
        self
    }

    pub fn out_extension(&self) -> &str {
        self.out_extension
            .as_deref()
            .unwrap_or(DEFAULT_OUT_EXTENSION)
    }

    /// The prefix to strip from sources, if stripping applies
    ///
    /// Stripping only happens when both a non-empty source root and a
    /// destination root are set; otherwise outputs land beside the sources.
    pub fn strip_prefix(&self) -> Option<&Path> {
        self.dest_root.as_ref()?;
        self.source_root
            .as_deref()
            .filter(|root| !root.as_os_str().is_empty())
    }
}
