//! Runtime configuration
//!
//! Centralized configuration with:
//! - Environment variable support
//! - Optional TOML config file loading
//! - Runtime defaults
//! - Validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Stream buffer sizes for the parse and render phases
    pub io: IoConfig,

    /// Paths configuration
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IoConfig {
    pub read_buffer_kb: usize,
    pub write_buffer_kb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub log_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "ERROR".to_string(),
                format: "pretty".to_string(),
                output: "console".to_string(),
            },
            io: IoConfig {
                read_buffer_kb: 64,
                write_buffer_kb: 64,
            },
            paths: PathsConfig {
                log_directory: PathBuf::from("logs"),
            },
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and defaults
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        let config_paths = [
            PathBuf::from("session-report.toml"),
            PathBuf::from(".session-report.toml"),
            dirs::config_dir()
                .map(|d| d.join("session-report").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                info!(config_file = %path.display(), "Loading configuration from file");
                config = Self::load_from_file(path)?;
                break;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = env::var("LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("LOG_OUTPUT") {
            self.logging.output = val;
        }

        if let Ok(val) = env::var("SESSION_REPORT_READ_BUFFER_KB") {
            self.io.read_buffer_kb = val
                .parse()
                .context("Invalid SESSION_REPORT_READ_BUFFER_KB")?;
        }
        if let Ok(val) = env::var("SESSION_REPORT_WRITE_BUFFER_KB") {
            self.io.write_buffer_kb = val
                .parse()
                .context("Invalid SESSION_REPORT_WRITE_BUFFER_KB")?;
        }

        if let Ok(val) = env::var("SESSION_REPORT_LOG_DIR") {
            self.paths.log_directory = PathBuf::from(val);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.io.read_buffer_kb < 1 || self.io.read_buffer_kb > 1024 {
            return Err(anyhow::anyhow!(
                "Read buffer must be between 1KB and 1024KB, got {}KB",
                self.io.read_buffer_kb
            ));
        }

        if self.io.write_buffer_kb < 1 || self.io.write_buffer_kb > 1024 {
            return Err(anyhow::anyhow!(
                "Write buffer must be between 1KB and 1024KB, got {}KB",
                self.io.write_buffer_kb
            ));
        }

        // The log directory is only needed when logs actually go to files
        if self.logging.output != "console" && !self.paths.log_directory.exists() {
            fs::create_dir_all(&self.paths.log_directory)
                .context("Failed to create log directory")?;
        }

        Ok(())
    }
}

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| Config::load().expect("Failed to load configuration"))
}
