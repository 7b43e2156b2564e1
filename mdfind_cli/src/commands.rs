//! Command handlers
//!
//! Each handler merges its flags over the loaded [`AppConfig`], runs the
//! library call and returns the rendered output for `main` to print.

use std::path::PathBuf;

use anyhow::Context;
use mdfind_core::{
    DiagnosticSink, LISTING_PATTERN, StalenessConfig, TraversalConfig, Verbosity,
    compute_update_list_with, discover_with,
};

use crate::config::{AppConfig, ConfigManager};
use crate::error::{CliError, CliResult, ErrorContext};
use crate::output::OutputFormat;

/// Flags for `mdfind list`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub dir: Option<PathBuf>,
    pub pattern: Option<String>,
    pub all: bool,
    pub recursive: bool,
    pub verbose: u8,
    pub format: Option<OutputFormat>,
}

/// Flags for `mdfind update`
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub source: Option<PathBuf>,
    pub dest: Option<PathBuf>,
    pub pattern: Option<String>,
    pub extension: Option<String>,
    pub recursive: bool,
    pub verbose: u8,
    pub format: Option<OutputFormat>,
}

fn resolve_format(flag: Option<OutputFormat>, config: &AppConfig) -> CliResult<OutputFormat> {
    match flag {
        Some(format) => Ok(format),
        None => OutputFormat::from_string(&config.output.format).map_err(|e| {
            CliError::misuse(&e.to_string())
                .with_suggestion("Set output.format to text, json or csv")
        }),
    }
}

/// `-v` flags win over the configured level when given
fn resolve_verbosity(count: u8, config: &AppConfig) -> Verbosity {
    if count > 0 {
        Verbosity::from_level(count)
    } else {
        Verbosity::from_level(config.output.verbosity)
    }
}

/// List matching files
pub fn list(
    options: &ListOptions,
    config: &AppConfig,
    sink: &dyn DiagnosticSink,
    use_color: bool,
) -> CliResult<String> {
    let pattern = match (&options.pattern, options.all) {
        (Some(_), true) => {
            return Err(CliError::misuse("--pattern and --all cannot be combined"));
        }
        (Some(pattern), false) => pattern.clone(),
        (None, true) => LISTING_PATTERN.to_string(),
        (None, false) => config.discovery.pattern.clone(),
    };
    let format = resolve_format(options.format, config)?;

    let traversal = TraversalConfig::new()
        .with_root_opt(options.dir.as_deref())
        .with_pattern(pattern)
        .with_recursive(options.recursive || config.discovery.recursive)
        .with_follow_links(config.discovery.follow_links)
        .with_verbosity(resolve_verbosity(options.verbose, config));
    log::debug!("Listing with {traversal:?}");

    let matches = discover_with(&traversal, sink)?;
    log::info!("Found {} matching files", matches.len());

    Ok(format.formatter(use_color).format_matches(&matches)?)
}

/// Compute the sources whose outputs are missing or out of date
pub fn update(
    options: &UpdateOptions,
    config: &AppConfig,
    sink: &dyn DiagnosticSink,
    use_color: bool,
) -> CliResult<String> {
    let format = resolve_format(options.format, config)?;
    let pattern = options
        .pattern
        .clone()
        .unwrap_or_else(|| config.discovery.pattern.clone());
    let extension = options
        .extension
        .clone()
        .unwrap_or_else(|| config.update.out_extension.clone());
    let dest = options.dest.clone().or_else(|| config.update.dest_dir.clone());

    let traversal = TraversalConfig::new()
        .with_root_opt(options.source.as_deref())
        .with_pattern(pattern)
        .with_recursive(options.recursive || config.discovery.recursive)
        .with_follow_links(config.discovery.follow_links)
        .with_verbosity(resolve_verbosity(options.verbose, config));
    let staleness = StalenessConfig::new()
        .with_source_root(options.source.as_deref())
        .with_dest_root(dest.as_deref())
        .with_out_extension(Some(&extension));
    log::debug!("Updating with {traversal:?} {staleness:?}");

    let pairs = compute_update_list_with(&traversal, &staleness, sink)?;
    log::info!("{} files need rebuilding", pairs.len());

    Ok(format.formatter(use_color).format_pairs(&pairs)?)
}

/// Subcommands of `mdfind config`
#[derive(Debug, Clone)]
pub enum ConfigAction {
    Show,
    Get(String),
    Path,
}

/// Inspect the effective configuration
pub fn config(action: &ConfigAction, manager: &ConfigManager) -> CliResult<String> {
    match action {
        ConfigAction::Show => {
            let items = manager.list()?;
            Ok(items
                .iter()
                .map(|(key, value)| format!("{key} = {value}"))
                .collect::<Vec<_>>()
                .join("\n"))
        }
        ConfigAction::Get(key) => manager
            .get(key)
            .with_context(|| format!("Cannot read configuration key '{key}'"))
            .map_err(|e| CliError::misuse(&format!("{e:#}"))),
        ConfigAction::Path => Ok(manager.get_config_path().display().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;
    use mdfind_core::{CollectingSink, NullSink};
    use mdfind_test_utils::TreeBuilder;
    use mdfind_test_utils::builders::DEFAULT_MTIME;

    #[test]
    fn test_list_uses_configured_pattern() {
        let tree = TreeBuilder::new()
            .with_sources(&["a.md", "b.txt"])
            .build()
            .unwrap();
        let mut config = AppConfig::default();
        config.discovery.pattern = "*.txt".to_string();

        let options = ListOptions {
            dir: Some(tree.source_dir()),
            format: Some(OutputFormat::Text),
            ..Default::default()
        };
        let output = list(&options, &config, &NullSink, false).unwrap();

        assert_eq!(output, tree.source("b.txt").display().to_string());
    }

    #[test]
    fn test_list_all_conflicts_with_pattern() {
        let options = ListOptions {
            pattern: Some("*.md".to_string()),
            all: true,
            ..Default::default()
        };
        let err = list(&options, &AppConfig::default(), &NullSink, false).unwrap_err();

        assert_eq!(err.exit_code(), ExitCode::Misuse);
    }

    #[test]
    fn test_bad_configured_format_is_misuse() {
        let mut config = AppConfig::default();
        config.output.format = "yaml".to_string();

        let err = list(&ListOptions::default(), &config, &NullSink, false).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Misuse);
    }

    #[test]
    fn test_verbose_flag_overrides_config() {
        let tree = TreeBuilder::new().with_source("a.md", DEFAULT_MTIME).build().unwrap();
        let mut config = AppConfig::default();
        config.output.verbosity = 2;

        let sink = CollectingSink::new();
        let options = ListOptions {
            dir: Some(tree.source_dir()),
            verbose: 1,
            format: Some(OutputFormat::Text),
            ..Default::default()
        };
        list(&options, &config, &sink, false).unwrap();

        let lines = sink.lines();
        assert!(lines.iter().any(|l| l == "Matched: 1"));
        assert!(!lines.iter().any(|l| l.ends_with("a.md")));
    }

    #[test]
    fn test_update_uses_configured_destination() {
        let tree = TreeBuilder::new().with_source("a.md", DEFAULT_MTIME).build().unwrap();
        let mut config = AppConfig::default();
        config.update.dest_dir = Some(tree.dest_dir());
        config.update.out_extension = ".htm".to_string();

        let options = UpdateOptions {
            source: Some(tree.source_dir()),
            format: Some(OutputFormat::Csv),
            ..Default::default()
        };
        let output = update(&options, &config, &NullSink, false).unwrap();

        let expected = format!(
            "source,destination\n{},{}\n",
            tree.source("a.md").display(),
            tree.output("a.htm").display()
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn test_config_get_unknown_key_is_misuse() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));

        let err = config(&ConfigAction::Get("nope.key".to_string()), &manager).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Misuse);
        assert!(err.message().contains("Key 'nope.key' not found"));
    }
}
