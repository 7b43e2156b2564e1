//! Locations of mdfind's configuration on disk

use std::path::PathBuf;

/// Directory name used under the platform config directory
const APP_CONFIG_DIR: &str = "mdfind";

/// Name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Returns the configuration directory
///
/// `$XDG_CONFIG_HOME/mdfind` when set (Linux, macOS), otherwise the platform
/// config directory from `dirs`:
/// - Linux: `~/.config/mdfind`
/// - macOS: `~/Library/Application Support/mdfind`
/// - Windows: `%APPDATA%\mdfind`
///
/// Falls back to `.mdfind` in the current directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Some(xdg_config) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg_config).join(APP_CONFIG_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_CONFIG_DIR))
        .unwrap_or_else(|| PathBuf::from(".mdfind"))
}

/// Returns the path to `config.toml`
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}
