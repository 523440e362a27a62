//! Default values for ghq configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Environment variable holding one or more root directories.
pub const ROOT_ENV: &str = "GHQ_ROOT";

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "GHQ_CONFIG";

/// Returns the default root directory for working copies: `~/ghq`.
///
/// Falls back to `ghq` in the current directory if the home directory cannot
/// be determined.
///
/// This can be overridden by the `--root` CLI flag, the `GHQ_ROOT`
/// environment variable, or `roots` in the config file.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ghq")
}

/// Returns the location of the user configuration file, if the platform has a
/// configuration directory:
/// - Linux: `~/.config/ghq/config.yaml`
/// - macOS: `~/Library/Application Support/ghq/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\ghq\config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ghq").join("config.yaml"))
}
