//! Configuration loading from file system
//!
//! Reads the JSON config file and parses it into a `Config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::Config;

/// Default config file path with `~` expanded.
pub fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref())
}

/// Parse config JSON.
pub fn parse_config(json: &str) -> Result<Config> {
    serde_json::from_str::<Config>(json.trim()).context("Failed to parse config JSON")
}

/// Load configuration from `path`, failing on unreadable or invalid files.
///
/// A missing file is not an error: defaults are returned.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    info!(
        path = %path.display(),
        shortcuts = config.shortcuts.len(),
        "Successfully loaded config"
    );
    Ok(config)
}

/// Load configuration from `path` (or the default location).
///
/// Returns Config::default() if the file is missing or invalid.
#[instrument(name = "load_config")]
pub fn load_config(path: Option<&Path>) -> Config {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    match load_config_from_path(&path) {
        Ok(config) => config,
        Err(e) => {
            // Provide a helpful hint for the most common mistake
            let error_hint = if format!("{:#}", e).contains("accelerator") {
                "\n\nHint: each entry in 'shortcuts' needs an 'accelerator' string. Example:\n\
                {\n\
                  \"shortcuts\": [\n\
                    { \"accelerator\": \"CommandOrControl+Shift+K\", \"label\": \"toggle\" }\n\
                  ]\n\
                }"
            } else {
                ""
            };

            warn!(
                error = %format!("{:#}", e),
                hint = %error_hint,
                "Failed to load config, using defaults"
            );
            Config::default()
        }
    }
}
