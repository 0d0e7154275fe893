//! Runtime preferences
//!
//! Each section defaults from `NNET3_*` environment variables and can be
//! overridden by a TOML preferences file.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;

/// Errors raised while loading a runtime preferences file
#[derive(Debug, thiserror::Error)]
pub enum RuntimeConfigError {
    #[error("Failed to read configuration file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid TOML in configuration file: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

impl RuntimeConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        crate::logging::codes::system::CONFIGURATION_ERROR
    }
}

/// Boolean environment override, falling back to `default` when unset or malformed
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to enable detailed performance logging (user preference)
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserPreferences {
    /// Whether to log attribute tags the component tables do not recognize
    pub log_skipped_tags: bool,

    /// Whether to log a summary line for every parsed component
    pub log_component_summaries: bool,
}

impl Default for ParserPreferences {
    fn default() -> Self {
        Self {
            log_skipped_tags: env_flag(env_vars::PARSER_LOG_SKIPPED_TAGS, false),
            log_component_summaries: env_flag(env_vars::PARSER_LOG_COMPONENT_SUMMARIES, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Accepts level names in any case, `warn`, or the numeric rank
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(level: &str) -> Result<Self, Self::Err> {
        match level.to_lowercase().as_str() {
            "error" | "0" => Ok(LogLevel::Error),
            "warning" | "warn" | "1" => Ok(LogLevel::Warning),
            "info" | "2" => Ok(LogLevel::Info),
            "debug" | "3" => Ok(LogLevel::Debug),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub parser: ParserPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML text; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, RuntimeConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load preferences from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, RuntimeConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RuntimeConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "NNET3_ENABLE_PERFORMANCE_LOGGING";

    pub const PARSER_LOG_SKIPPED_TAGS: &str = "NNET3_PARSER_LOG_SKIPPED_TAGS";
    pub const PARSER_LOG_COMPONENT_SUMMARIES: &str = "NNET3_PARSER_LOG_COMPONENT_SUMMARIES";

    pub const LOGGING_USE_STRUCTURED: &str = "NNET3_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "NNET3_LOGGING_MIN_LEVEL";
}
