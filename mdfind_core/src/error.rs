//! Error types for the mdfind core library
//!
//! Errors fall into two categories that callers treat differently:
//! - Pattern errors: the glob could not be compiled, nothing was touched
//! - I/O errors: a root directory or a matched file could not be read

use thiserror::Error;

pub mod io;
pub mod pattern;

pub use self::io::{IoError, IoErrorKind};
pub use self::pattern::PatternError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the mdfind core library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Glob pattern errors
    #[error(transparent)]
    Pattern(#[from] PatternError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl Error {
    /// Whether this error was raised before any filesystem access
    pub fn is_pattern_error(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    /// The path this error refers to, if known
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io(err) => err.path.as_deref(),
            Self::Pattern(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_root_not_found_error_creation() {
        let path = Path::new("/no/such/docs");
        let error = Error::Io(IoError::not_found(path));

        match error {
            Error::Io(io_err) => {
                assert_eq!(io_err.kind, IoErrorKind::NotFound);
                assert_eq!(io_err.path, Some(path.to_path_buf()));
            }
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_pattern_error_is_flagged() {
        let error = Error::Pattern(PatternError::new("[ ", "unclosed character class"));

        assert!(error.is_pattern_error());
        assert!(error.path().is_none());
        assert!(error.to_string().contains("[ "));
    }

    #[test]
    fn test_from_std_io_error() {
        let error: Error = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();

        assert!(!error.is_pattern_error());
        assert!(matches!(
            error,
            Error::Io(IoError {
                kind: IoErrorKind::PermissionDenied,
                ..
            })
        ));
    }

    #[test]
    fn test_error_path_accessor() {
        let path = Path::new("site/index.html");
        let error = Error::Io(IoError::from_std(io::Error::other("boom")).with_path(path));

        assert_eq!(error.path(), Some(path));
    }
}
