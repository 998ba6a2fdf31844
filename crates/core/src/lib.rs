//! Climate API Core Library
//!
//! Shared utilities for the climate API server:
//! - Configuration loading (XDG-compliant)
//! - File system utilities

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::is_file;

/// Application name used for XDG paths
pub const APP_NAME: &str = "climate-api";

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

/// Default location of the SQLite dataset, relative to the working directory
pub const DEFAULT_DATASET: &str = "./resources/hawaii.sqlite";
