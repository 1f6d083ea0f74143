//! HTTP API handlers for yta-server

pub mod audio;
pub mod buildinfo;
pub mod health;

pub use audio::{get_audio, get_audio_source_list};
pub use buildinfo::get_build_info;
pub use health::health_routes;
