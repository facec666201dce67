//! Configuration type definitions
//!
//! This module contains all the struct and enum definitions for configuration.

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::trust::TrustGateMode;

// ============================================
// SHORTCUTS
// ============================================

/// One global shortcut to register at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutConfig {
    /// Accelerator string, e.g. "CommandOrControl+Shift+K" or "MediaPlayPause"
    pub accelerator: String,
    /// Name used in log output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ShortcutConfig {
    pub fn new(accelerator: impl Into<String>) -> Self {
        Self {
            accelerator: accelerator.into(),
            label: None,
        }
    }

    /// The label, or the accelerator string if none is set.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.accelerator)
    }
}

// ============================================
// LOGGING
// ============================================

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Tracing filter used when RUST_LOG is unset (default: "info")
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write a JSONL log file next to stderr output (default: true)
    #[serde(default = "default_json_file")]
    pub json_file: bool,
    /// Directory for the JSONL log (default: ~/.hotkey-registry/logs)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
fn default_json_file() -> bool {
    DEFAULT_JSON_LOG_ENABLED
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_file: DEFAULT_JSON_LOG_ENABLED,
            dir: None,
        }
    }
}

// ============================================
// MAIN CONFIG
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Shortcuts registered at startup, as one all-or-nothing batch
    #[serde(default)]
    pub shortcuts: Vec<ShortcutConfig>,
    /// Which trust gate guards restricted accelerators (default: "platform")
    #[serde(default)]
    pub trust_gate: TrustGateMode,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            shortcuts: Vec::new(), // Will use DEFAULT_SHORTCUT via getter
            trust_gate: TrustGateMode::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Returns the configured shortcuts, or the default shortcut if none are set.
    pub fn get_shortcuts(&self) -> Vec<ShortcutConfig> {
        if self.shortcuts.is_empty() {
            vec![ShortcutConfig::new(DEFAULT_SHORTCUT)]
        } else {
            self.shortcuts.clone()
        }
    }
}
