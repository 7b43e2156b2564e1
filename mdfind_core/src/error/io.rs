//! I/O related error types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// I/O error with additional context
#[derive(Error, Debug)]
#[error("{}", format_io_error(self))]
pub struct IoError {
    /// The kind of I/O error
    pub kind: IoErrorKind,
    /// Path associated with the error (if any)
    pub path: Option<PathBuf>,
    /// Underlying I/O error (if any)
    #[source]
    pub source: Option<std::io::Error>,
}

/// Kind of I/O error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoErrorKind {
    /// Path does not exist
    NotFound,
    /// Permission denied
    PermissionDenied,
    /// A directory was expected
    NotADirectory,
    /// Traversal stopped by the entry visitor
    Aborted,
    /// Generic I/O error
    Other,
}

impl IoError {
    /// Create a not found error
    pub fn not_found(path: &Path) -> Self {
        Self {
            kind: IoErrorKind::NotFound,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: &Path, source: std::io::Error) -> Self {
        Self {
            kind: IoErrorKind::PermissionDenied,
            path: Some(path.to_path_buf()),
            source: Some(source),
        }
    }

    /// Create an error for a path that should have been a directory
    pub fn not_a_directory(path: &Path) -> Self {
        Self {
            kind: IoErrorKind::NotADirectory,
            path: Some(path.to_path_buf()),
            source: None,
        }
    }

    /// Create an error for a walk the visitor chose to stop
    pub fn aborted(path: Option<&Path>, source: Option<std::io::Error>) -> Self {
        Self {
            kind: IoErrorKind::Aborted,
            path: path.map(Path::to_path_buf),
            source,
        }
    }

    /// Create an I/O error from a standard I/O error
    pub fn from_std(source: std::io::Error) -> Self {
        let kind = match source.kind() {
            std::io::ErrorKind::NotFound => IoErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => IoErrorKind::PermissionDenied,
            std::io::ErrorKind::NotADirectory => IoErrorKind::NotADirectory,
            _ => IoErrorKind::Other,
        };

        Self {
            kind,
            path: None,
            source: Some(source),
        }
    }

    /// Create an I/O error with a path
    pub fn with_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

fn format_io_error(error: &IoError) -> String {
    match (&error.kind, &error.path) {
        (IoErrorKind::NotFound, Some(path)) => format!("Path not found: {}", path.display()),
        (IoErrorKind::NotFound, None) => "Path not found".to_string(),
        (IoErrorKind::PermissionDenied, Some(path)) => {
            format!("Permission denied: {}", path.display())
        }
        (IoErrorKind::PermissionDenied, None) => "Permission denied".to_string(),
        (IoErrorKind::NotADirectory, Some(path)) => {
            format!("Not a directory: {}", path.display())
        }
        (IoErrorKind::NotADirectory, None) => "Not a directory".to_string(),
        (IoErrorKind::Aborted, Some(path)) => {
            format!("Traversal aborted at {}", path.display())
        }
        (IoErrorKind::Aborted, None) => "Traversal aborted".to_string(),
        (IoErrorKind::Other, path) => {
            let detail = error
                .source
                .as_ref()
                .map(|source| source.to_string())
                .unwrap_or_else(|| "unknown cause".to_string());
            match path {
                Some(path) => format!("I/O error on {}: {detail}", path.display()),
                None => format!("I/O error: {detail}"),
            }
        }
    }
}
