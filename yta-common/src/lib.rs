//! # YTA Common Library
//!
//! Shared code for the Yomitan audio lookup service:
//! - Audio catalog model and database access
//! - Configuration loading and root folder resolution
//! - Kana script normalization
//! - Common error type

pub mod config;
pub mod db;
pub mod error;
pub mod kana;

pub use db::models::AudioEntry;
pub use error::{Error, Result};
