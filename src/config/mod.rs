//! Configuration module - Application settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.hotkey-registry/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, ShortcutConfig, LogConfig)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_CONFIG_PATH, DEFAULT_JSON_LOG_ENABLED, DEFAULT_LOG_FILE_NAME, DEFAULT_LOG_LEVEL,
    DEFAULT_SHORTCUT,
};

pub use types::{Config, LogConfig, ShortcutConfig};

pub use loader::{default_config_path, load_config, load_config_from_path, parse_config};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
