//! Configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are the base layer; a user file overrides any subset of keys; command
//! line flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! input = "input"           # Directory scanned for source images
//! output = "output"         # Directory receiving *_Greyscale.png / *_Sobel.png
//!
//! [scan]
//! # Every entry needs a compiled-in decoder
//! extensions = ["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"]
//!
//! [sobel]
//! threshold = 64            # Gradient components below this are dropped (0-255)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::imaging::{RangeError, Threshold, supported_input_extensions};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Input and output directories.
    pub paths: PathsConfig,
    /// Which files in the input directory are picked up.
    pub scan: ScanConfig,
    /// Edge detection settings.
    pub sobel: SobelConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.threshold()
            .map_err(|e| ConfigError::Validation(format!("sobel.threshold: {e}")))?;
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        let supported = supported_input_extensions();
        if let Some(ext) = self.scan.extensions.iter().find(|e| {
            let e = e.trim_start_matches('.');
            !supported.iter().any(|s| s.eq_ignore_ascii_case(e))
        }) {
            return Err(ConfigError::Validation(format!(
                "scan.extensions: no decoder for \"{ext}\" (supported: {})",
                supported.join(", ")
            )));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The configured Sobel threshold as a validated value.
    pub fn threshold(&self) -> Result<Threshold, RangeError> {
        Threshold::new(self.sobel.threshold)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input"),
            output: PathBuf::from("output"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Accepted file extensions, compared case-insensitively, without the dot.
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: ["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SobelConfig {
    /// Kept wide so out-of-range values reach validation instead of a
    /// generic parse error.
    pub threshold: i64,
}

impl Default for SobelConfig {
    fn default() -> Self {
        Self { threshold: 64 }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective worker count.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                let merged = match table.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, overlay) => overlay,
    }
}

/// Load config from the TOML file at `path`.
///
/// A missing file yields the stock defaults. User values are merged on top
/// of the defaults, unknown keys are rejected, and the result is validated.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let merged = if path.exists() {
        let overlay: toml::Value = toml::from_str(&fs::read_to_string(path)?)?;
        merge_toml(base, overlay)
    } else {
        base
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# greyedge configuration
# ======================
# Every key is optional; the values below are the defaults.
# Command line flags (--input, --output, --jobs, --threshold) take precedence.

[paths]
# Directory scanned (non-recursively) for source images.
input = "input"
# Directory receiving <name>_Greyscale.png and <name>_Sobel.png.
# Created on first use.
output = "output"

[scan]
# File extensions picked up from the input directory (case-insensitive).
# Anything else is listed as dropped. Each entry must be one of the
# formats listed here; other extensions are rejected at startup.
extensions = ["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"]

[sobel]
# Gradient components below this value are discarded before the magnitude
# is computed. Must be between 0 and 255.
threshold = 64

[processing]
# Maximum number of images processed at once.
# Omit to use every CPU core; larger values are clamped to the core count.
# max_processes = 4
"##
}
