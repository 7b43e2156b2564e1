//! Verbosity-gated diagnostic reporting
//!
//! Discovery and staleness resolution report what they are doing through a
//! [`DiagnosticSink`], so the library never writes to stderr directly and
//! tests can capture exactly what a user would see at a given verbosity.

use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

/// How much diagnostic output an operation produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verbosity {
    /// Emit nothing
    #[default]
    Silent = 0,
    /// Working directory and match totals
    Summary = 1,
    /// Every matched entry, candidate destination and per-entry failure
    Detailed = 2,
}

impl Verbosity {
    /// Map a numeric level onto a verbosity, saturating above 2
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::Silent,
            1 => Self::Summary,
            _ => Self::Detailed,
        }
    }

    pub fn level(self) -> u8 {
        self as u8
    }
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        Self::from_level(level)
    }
}

/// A single diagnostic event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Absolute working directory the operation resolved relative paths against
    WorkingDirectory(PathBuf),
    /// An entry whose base name matched the pattern
    Matched(PathBuf),
    /// Total number of matches after a walk
    MatchCount(usize),
    /// An entry that could not be read during traversal
    EntryFailed {
        path: Option<PathBuf>,
        message: String,
    },
    /// Destination computed for a stale source
    Candidate(PathBuf),
    /// A matched source dropped because no destination could be derived
    Excluded { path: PathBuf, reason: String },
    /// Final list of destinations that need rebuilding
    UpdateList(Vec<PathBuf>),
}

impl Diagnostic {
    /// Minimum verbosity at which this diagnostic is shown
    pub fn verbosity(&self) -> Verbosity {
        match self {
            Self::WorkingDirectory(_) | Self::MatchCount(_) => Verbosity::Summary,
            Self::Matched(_)
            | Self::EntryFailed { .. }
            | Self::Candidate(_)
            | Self::Excluded { .. }
            | Self::UpdateList(_) => Verbosity::Detailed,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkingDirectory(dir) => write!(f, "PWD: {}", dir.display()),
            Self::Matched(path) => write!(f, "{}", path.display()),
            Self::MatchCount(count) => write!(f, "Matched: {count}"),
            Self::EntryFailed {
                path: Some(path),
                message,
            } => write!(f, "Failed to visit {}: {message}", path.display()),
            Self::EntryFailed {
                path: None,
                message,
            } => write!(f, "Failed to visit entry: {message}"),
            Self::Candidate(path) => write!(f, "{}", path.display()),
            Self::Excluded { path, reason } => {
                write!(f, "Excluded {}: {reason}", path.display())
            }
            Self::UpdateList(paths) => {
                write!(f, "Update list:")?;
                for path in paths {
                    write!(f, "\n{}", path.display())?;
                }
                Ok(())
            }
        }
    }
}

/// Destination for diagnostic events
pub trait DiagnosticSink {
    /// Receive a diagnostic that already passed the verbosity gate
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Writes diagnostics to stderr, one event per line
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        eprintln!("{diagnostic}");
    }
}

/// Discards every diagnostic
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps every diagnostic in memory
#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Events rendered the way [`StderrSink`] would print them
    pub fn lines(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        if let Ok(mut events) = self.events.lock() {
            events.push(diagnostic.clone());
        }
    }
}

/// A sink paired with the verbosity of the current operation
#[derive(Clone, Copy)]
pub struct Diagnostics<'a> {
    sink: &'a dyn DiagnosticSink,
    verbosity: Verbosity,
}

impl<'a> Diagnostics<'a> {
    pub fn new(sink: &'a dyn DiagnosticSink, verbosity: Verbosity) -> Self {
        Self { sink, verbosity }
    }

    /// Diagnostics that go nowhere
    pub fn silent() -> Diagnostics<'static> {
        Diagnostics {
            sink: &NullSink,
            verbosity: Verbosity::Silent,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Whether a diagnostic at `level` would reach the sink
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        if self.enabled(diagnostic.verbosity()) {
            self.sink.emit(&diagnostic);
        }
    }
}
