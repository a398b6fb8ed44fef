//! Configuration module for ByteFlow
//!
//! Settings that shape engine behaviour and logging, stored as TOML.
//!
//! # File Location
//!
//! The default configuration file lives in the platform config directory:
//! - **Linux**: `~/.config/byteflow/config.toml`
//! - **macOS**: `~/Library/Application Support/byteflow/config.toml`
//! - **Windows**: `%APPDATA%\byteflow\config.toml`
//!
//! A missing file is not an error; every field has a default.
//!
//! # Example
//!
//! ```toml
//! [engine]
//! preview_len = 64
//!
//! [logging]
//! filter = "warn,byteflow=debug"
//! ```

use crate::error::{ByteflowError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "byteflow";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Default number of bytes kept as a sink preview
pub const DEFAULT_PREVIEW_LEN: usize = 64;

/// Default tracing filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn,byteflow=info";

/// Get the default configuration file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Evaluation engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bytes of each sink buffer kept as a preview
    pub preview_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(ByteflowError::from)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            ByteflowError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load configuration, returning defaults if the file is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(ByteflowError::from)
                .context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ByteflowError::Serialization(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(ByteflowError::from)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
