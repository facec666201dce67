//! Structured JSONL logging plus human-readable stderr output.
//!
//! This module provides dual-output logging:
//! - **JSONL to file** (~/.hotkey-registry/logs/hotkey-registry.jsonl) - structured for tooling
//! - **Pretty to stderr** - human-readable for developers
//!
//! # Usage
//!
//! ```rust,ignore
//! use hotkey_registry::{config::LogConfig, logging};
//!
//! // Initialize logging - MUST keep guard alive for duration of program
//! let _guard = logging::init(&LogConfig::default());
//!
//! tracing::info!(category = "HOTKEY", "Registry started");
//! ```
//!
//! # JSONL Output Format
//!
//! Each line is a valid JSON object:
//! ```json
//! {"timestamp":"2026-10-19T10:30:45.123Z","level":"INFO","target":"hotkey_registry::registry","fields":{"message":"Registered accelerator","category":"HOTKEY","accelerator":"Ctrl+Shift+K"}}
//! ```

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{LogConfig, DEFAULT_LOG_FILE_NAME};

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
    log_path: Option<PathBuf>,
}

impl LoggingGuard {
    /// Path of the JSONL log, if file logging is active.
    pub fn log_path(&self) -> Option<&PathBuf> {
        self.log_path.as_ref()
    }
}

/// Initialize the dual-output logging system.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
/// `RUST_LOG` overrides `config.level`. Calling this twice in one process
/// keeps the first subscriber.
pub fn init(config: &LogConfig) -> LoggingGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    // Pretty layer for stderr (human developers)
    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let log_path = config.json_file.then(|| log_path(config));
    let file = log_path.as_ref().and_then(|path| open_log_file(path));

    let (json_layer, file_guard) = match file {
        Some(file) => {
            // Non-blocking writer so hotkey dispatch never waits on disk
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let active_path = file_guard.as_ref().and(log_path);

    let initialized = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!(
            event_type = "app_lifecycle",
            action = "started",
            log_path = ?active_path,
            "Logging initialized"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
        log_path: active_path,
    }
}

/// Quiet third-party crates unless the user asked for them.
fn filter_directive(level: &str) -> String {
    format!("{},global_hotkey=warn", level)
}

fn open_log_file(path: &Path) -> Option<fs::File> {
    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("[LOGGING] Failed to create log directory: {}", e);
            return None;
        }
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            None
        }
    }
}

/// Get the log directory path (config override, else ~/.hotkey-registry/logs/)
fn get_log_dir(config: &LogConfig) -> PathBuf {
    if let Some(dir) = &config.dir {
        return PathBuf::from(shellexpand::tilde(dir).as_ref());
    }
    dirs::home_dir()
        .map(|h| h.join(".hotkey-registry").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("hotkey-registry-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path(config: &LogConfig) -> PathBuf {
    get_log_dir(config).join(DEFAULT_LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_uses_configured_dir() {
        let config = LogConfig {
            dir: Some("/tmp/hk-logs".to_string()),
            ..LogConfig::default()
        };
        assert_eq!(
            log_path(&config),
            PathBuf::from("/tmp/hk-logs").join(DEFAULT_LOG_FILE_NAME)
        );
    }

    #[test]
    fn test_default_log_path_file_name() {
        let path = log_path(&LogConfig::default());
        assert!(path.ends_with(DEFAULT_LOG_FILE_NAME));
    }

    #[test]
    fn test_filter_directive_quiets_listener_crate() {
        assert_eq!(filter_directive("debug"), "debug,global_hotkey=warn");
    }

    #[test]
    fn test_init_without_file_has_no_path() {
        let config = LogConfig {
            json_file: false,
            ..LogConfig::default()
        };
        let guard = init(&config);
        assert!(guard.log_path().is_none());
    }

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("log.jsonl");
        assert!(open_log_file(&path).is_some());
        assert!(path.exists());
    }
}
