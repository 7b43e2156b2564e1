//! Visitor implementations for exercising the walker directly

use mdfind_core::discovery::{EntryVisitor, WalkControl, WalkError};
use std::path::{Path, PathBuf};

/// Records every callback in the order the walker made them
#[derive(Debug, Default)]
pub struct RecordingVisitor {
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
    pub errors: Vec<Option<PathBuf>>,
    /// Reply to `on_error`
    pub on_error_reply: Option<WalkControl>,
}

impl RecordingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the walk at the first failing entry
    pub fn aborting() -> Self {
        Self {
            on_error_reply: Some(WalkControl::Abort),
            ..Self::default()
        }
    }
}

impl EntryVisitor for RecordingVisitor {
    fn on_file(&mut self, path: &Path) {
        self.files.push(path.to_path_buf());
    }

    fn on_directory_enter(&mut self, path: &Path) -> WalkControl {
        self.directories.push(path.to_path_buf());
        WalkControl::Continue
    }

    fn on_error(&mut self, path: Option<&Path>, _cause: &WalkError) -> WalkControl {
        self.errors.push(path.map(Path::to_path_buf));
        self.on_error_reply.unwrap_or(WalkControl::Continue)
    }
}
