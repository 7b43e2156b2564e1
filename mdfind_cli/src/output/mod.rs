mod formatters;

pub use formatters::{CsvFormatter, JsonFormatter, TextFormatter};

use anyhow::Result;
use clap::ValueEnum;
use mdfind_core::{MatchSet, RebuildPair};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }

    /// Build the formatter for this format
    pub fn formatter(self, use_color: bool) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(use_color)),
            Self::Json => Box::new(JsonFormatter::new(true)),
            Self::Csv => Box::new(CsvFormatter::new()),
        }
    }
}

/// Renders discovery and update results
pub trait OutputFormatter {
    /// Format the matches from a listing
    fn format_matches(&self, matches: &MatchSet) -> Result<String>;

    /// Format the source/destination pairs that need rebuilding
    fn format_pairs(&self, pairs: &[RebuildPair]) -> Result<String>;
}
