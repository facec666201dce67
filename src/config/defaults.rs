//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Default config file location (tilde-expanded)
pub const DEFAULT_CONFIG_PATH: &str = "~/.hotkey-registry/config.json";

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default JSONL log file name inside the log directory
pub const DEFAULT_LOG_FILE_NAME: &str = "hotkey-registry.jsonl";

/// JSONL file logging is on by default
pub const DEFAULT_JSON_LOG_ENABLED: bool = true;

/// Accelerator registered when the config lists no shortcuts
pub const DEFAULT_SHORTCUT: &str = "CommandOrControl+Shift+Space";
