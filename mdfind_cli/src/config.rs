use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use mdfind_core::{DEFAULT_OUT_EXTENSION, DEFAULT_PATTERN};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::paths;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub update: UpdateConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DiscoveryConfig {
    pub pattern: String,
    pub recursive: bool,
    pub follow_links: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct UpdateConfig {
    pub out_extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub format: String,
    pub color_enabled: bool,
    pub verbosity: u8,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            recursive: false,
            follow_links: false,
        }
    }
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            out_extension: DEFAULT_OUT_EXTENSION.to_string(),
            dest_dir: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            color_enabled: true,
            verbosity: 0,
        }
    }
}

/// Loads layered configuration from defaults, the config file and `MDFIND_*` variables
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a ConfigManager for the platform config path
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// Command line flags are applied on top by each command.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            log::debug!("Reading configuration from {}", self.config_path.display());
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables, e.g. MDFIND_DISCOVERY__PATTERN
        figment = figment.merge(Env::prefixed("MDFIND_").split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let value = Self::to_toml(&self.load()?)?;
        let mut current = &value;

        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// List all configuration values, sorted by key
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let value = Self::to_toml(&self.load()?)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    fn to_toml(config: &AppConfig) -> Result<toml::Value> {
        let toml_string = toml::to_string(config)?;
        Ok(toml::from_str(&toml_string)?)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {}
        }
    }
}
