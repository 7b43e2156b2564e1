//! Builders for on-disk test trees

use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the source subdirectory inside a [`TestTree`]
pub const SOURCE_DIR: &str = "src";

/// Name of the destination subdirectory inside a [`TestTree`]
pub const DEST_DIR: &str = "site";

/// Modification time used when a test does not care
pub const DEFAULT_MTIME: i64 = 1_600_000_000;

/// Write `path` (creating parents) and set its modification time
pub fn write_file_at(path: &Path, unix_seconds: i64) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, b"# test\n")?;
    set_mtime(path, unix_seconds)
}

/// Set the modification time of an existing file
pub fn set_mtime(path: &Path, unix_seconds: i64) -> io::Result<()> {
    set_file_mtime(path, FileTime::from_unix_time(unix_seconds, 0))
}

/// A temporary directory holding a source tree and a destination tree
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create empty `src/` and `site/` directories
    pub fn new() -> io::Result<Self> {
        let dir = TempDir::new()?;
        fs::create_dir(dir.path().join(SOURCE_DIR))?;
        fs::create_dir(dir.path().join(DEST_DIR))?;
        Ok(Self { dir })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root().join(SOURCE_DIR)
    }

    pub fn dest_dir(&self) -> PathBuf {
        self.root().join(DEST_DIR)
    }

    /// Path of a source file relative to `src/`
    pub fn source(&self, relative: &str) -> PathBuf {
        self.source_dir().join(relative)
    }

    /// Path of an output file relative to `site/`
    pub fn output(&self, relative: &str) -> PathBuf {
        self.dest_dir().join(relative)
    }

    /// Rewrite an output with a new modification time, as a build would
    pub fn render(&self, relative: &str, unix_seconds: i64) -> io::Result<PathBuf> {
        let path = self.output(relative);
        write_file_at(&path, unix_seconds)?;
        Ok(path)
    }
}

/// Builder for [`TestTree`]
pub struct TreeBuilder {
    sources: Vec<(String, i64)>,
    outputs: Vec<(String, i64)>,
    dirs: Vec<String>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            outputs: Vec::new(),
            dirs: Vec::new(),
        }
    }

    /// Add a source file under `src/`
    pub fn with_source(mut self, relative: &str, unix_seconds: i64) -> Self {
        self.sources.push((relative.to_string(), unix_seconds));
        self
    }

    /// Add several source files sharing [`DEFAULT_MTIME`]
    pub fn with_sources(mut self, relatives: &[&str]) -> Self {
        self.sources
            .extend(relatives.iter().map(|r| (r.to_string(), DEFAULT_MTIME)));
        self
    }

    /// Add an already rendered output under `site/`
    pub fn with_output(mut self, relative: &str, unix_seconds: i64) -> Self {
        self.outputs.push((relative.to_string(), unix_seconds));
        self
    }

    /// Add an empty directory under `src/`
    pub fn with_source_dir(mut self, relative: &str) -> Self {
        self.dirs.push(relative.to_string());
        self
    }

    pub fn build(self) -> io::Result<TestTree> {
        let tree = TestTree::new()?;

        for dir in &self.dirs {
            fs::create_dir_all(tree.source(dir))?;
        }
        for (relative, mtime) in &self.sources {
            write_file_at(&tree.source(relative), *mtime)?;
        }
        for (relative, mtime) in &self.outputs {
            write_file_at(&tree.output(relative), *mtime)?;
        }

        Ok(tree)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
