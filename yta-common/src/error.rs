//! Errors raised while loading configuration or touching the audio catalog

use thiserror::Error;

/// Result alias used across yta-common
pub type Result<T> = std::result::Result<T, Error>;

/// Failure in configuration, filesystem or catalog database access
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite query or connection failure
    #[error("Catalog database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Reading a config file or creating the root folder failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML config could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog database file does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}
