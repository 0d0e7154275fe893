//! Logging configuration
//!
//! Level and output format come from the runtime preferences installed at
//! startup; the in-memory buffer size is a compile-time limit.

use crate::config::compile_time::logging::LOG_BUFFER_SIZE;
use crate::config::runtime::{LogLevel, LoggingPreferences};
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Install the logging preferences; only the first call takes effect
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Logging preferences already initialized".to_string())
}

fn preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Reject buffer sizes the build profile should never produce
pub fn validate_config() -> Result<(), String> {
    match LOG_BUFFER_SIZE {
        size if size < 100 => Err(format!("Log buffer size too small: {}", size)),
        size if size > 1_000_000 => Err(format!("Log buffer size too large: {}", size)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_is_valid() {
        assert!(validate_config().is_ok());
        assert_eq!(get_error_buffer_size(), LOG_BUFFER_SIZE);
    }
}
