//! Configuration loading and root folder resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed TOML file is never fatal: callers log a warning and
//! fall back to `TomlConfig::default()`.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "YTA_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "entries.db";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the catalog database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Explicit database path (overrides `<root_folder>/entries.db`)
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL clips are served from, used to build Yomitan audio source URLs
    #[serde(default)]
    pub media_base_url: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5780
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            database_path: None,
            host: default_host(),
            port: default_port(),
            media_base_url: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML configuration: {}", e)))
    }
}

/// Default configuration file path for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("yta").join("config.toml"))
}

/// Resolve the root folder
///
/// Priority: command-line argument, `YTA_ROOT_FOLDER`, TOML `root_folder`,
/// OS default.
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/yta (or /var/lib/yta for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("yta"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/yta"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/yta
        dirs::data_dir()
            .map(|d| d.join("yta"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/yta"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\yta
        dirs::data_local_dir()
            .map(|d| d.join("yta"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\yta"))
    } else {
        PathBuf::from("./yta_data")
    }
}

/// Resolve the catalog database path
///
/// Priority: command-line argument, TOML `database_path`,
/// `<root_folder>/entries.db`.
pub fn resolve_database_path(
    cli_arg: Option<&Path>,
    config: &TomlConfig,
    root_folder: &Path,
) -> PathBuf {
    cli_arg
        .map(Path::to_path_buf)
        .or_else(|| config.database_path.clone())
        .unwrap_or_else(|| root_folder.join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5780);
        assert_eq!(config.logging.level, "info");
        assert!(config.media_base_url.is_none());
    }

    #[test]
    fn test_parse_partial_toml_fills_defaults() {
        let config = TomlConfig::parse("port = 9000\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_invalid_toml_is_config_error() {
        let result = TomlConfig::parse("port = \"not a number\"");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_database_path_priority() {
        let root = PathBuf::from("/srv/yta");
        let mut config = TomlConfig::default();

        assert_eq!(
            resolve_database_path(None, &config, &root),
            root.join(DATABASE_FILE_NAME)
        );

        config.database_path = Some(PathBuf::from("/data/toml.db"));
        assert_eq!(
            resolve_database_path(None, &config, &root),
            PathBuf::from("/data/toml.db")
        );

        assert_eq!(
            resolve_database_path(Some(Path::new("/data/cli.db")), &config, &root),
            PathBuf::from("/data/cli.db")
        );
    }
}
