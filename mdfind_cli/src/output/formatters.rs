//! Text, JSON and CSV renderers
//!
//! Every format renders paths lossily: bytes that are not valid UTF-8 become
//! U+FFFD instead of failing the command.

use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use mdfind_core::{MatchSet, RebuildPair};

/// One path per line, or `source -> destination` for pairs
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_matches(&self, matches: &MatchSet) -> Result<String> {
        let lines: Vec<String> = matches
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        Ok(lines.join("\n"))
    }

    fn format_pairs(&self, pairs: &[RebuildPair]) -> Result<String> {
        let lines: Vec<String> = pairs
            .iter()
            .map(|pair| {
                let arrow = if self.use_color {
                    "->".dimmed().to_string()
                } else {
                    "->".to_string()
                };
                format!(
                    "{} {} {}",
                    self.colorize(&pair.source().to_string_lossy(), Color::Cyan),
                    arrow,
                    self.colorize(&pair.destination().to_string_lossy(), Color::Green)
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_matches(&self, matches: &MatchSet) -> Result<String> {
        self.render(matches)
    }

    fn format_pairs(&self, pairs: &[RebuildPair]) -> Result<String> {
        self.render(pairs)
    }
}

#[derive(Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn new() -> Self {
        Self
    }

    fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
        let data = wtr.into_inner()?;
        Ok(String::from_utf8(data)?)
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_matches(&self, matches: &MatchSet) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(["path"])?;

        for path in matches.iter() {
            wtr.write_record([path.to_string_lossy().as_ref()])?;
        }

        Self::finish(wtr)
    }

    fn format_pairs(&self, pairs: &[RebuildPair]) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(["source", "destination"])?;

        for pair in pairs {
            wtr.write_record([
                pair.source().to_string_lossy().as_ref(),
                pair.destination().to_string_lossy().as_ref(),
            ])?;
        }

        Self::finish(wtr)
    }
}
