//! Log sinks and the level-filtering service in front of them

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Destination for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Drops events below the minimum level and forwards the rest
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Console service configured from the runtime logging preferences
    pub fn from_preferences() -> Self {
        let format = if config::use_structured_logging() {
            OutputFormat::Json
        } else {
            OutputFormat::Plain
        };

        Self::new(
            Arc::new(ConsoleLogger::new(format)),
            config::get_min_log_level(),
        )
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.enabled(event.level) {
            self.logger.log(&event);
        }
    }
}

// ============================================================================
// CONSOLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    /// One JSON object per line
    Json,
}

/// Writes every event to stderr; stdout is reserved for converter output
pub struct ConsoleLogger {
    format: OutputFormat,
}

impl ConsoleLogger {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        let line = match self.format {
            OutputFormat::Plain => event.to_string(),
            OutputFormat::Json => event.format_json().unwrap_or_else(|_| event.to_string()),
        };
        eprintln!("{}", line);
    }
}

// ============================================================================
// MEMORY
// ============================================================================

/// Keeps the most recent events, up to a fixed capacity
pub struct MemoryLogger {
    events: Mutex<VecDeque<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    /// Capacity taken from the compile-time log buffer size
    pub fn new() -> Self {
        Self::with_capacity(config::get_error_buffer_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Events carrying `code`, oldest first
    pub fn with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|event| event.code == code)
            .cloned()
            .collect()
    }

    pub fn contains_code(&self, code: Code) -> bool {
        self.lock().iter().any(|event| event.code == code)
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_service_filters_by_level() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Info);

        service.log_event(LogEvent::debug("Skipping tag"));
        service.log_event(LogEvent::success(codes::success::COMPONENT_PARSED, "Parsed"));
        service.log_event(LogEvent::error(codes::parsing::RAGGED_MATRIX, "Ragged"));

        assert_eq!(memory.len(), 2);
        assert!(memory.contains_code(codes::success::COMPONENT_PARSED));
        assert!(!memory.contains_code(codes::generic::DEBUG));
        assert!(service.enabled(LogLevel::Warning));
        assert!(!service.enabled(LogLevel::Debug));
    }

    #[test]
    fn test_memory_logger_keeps_most_recent() {
        let memory = MemoryLogger::with_capacity(2);
        for component in ["lda", "affine1", "relu1"] {
            memory.log(
                &LogEvent::success(codes::success::COMPONENT_PARSED, "Parsed")
                    .with_context("name", component),
            );
        }

        let names: Vec<String> = memory
            .events()
            .iter()
            .map(|event| event.context["name"].clone())
            .collect();
        assert_eq!(names, vec!["affine1", "relu1"]);

        memory.clear();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_with_code() {
        let memory = MemoryLogger::new();
        memory.log(&LogEvent::error(codes::parsing::INVALID_NUMBER, "x1"));
        memory.log(&LogEvent::info("Reading"));

        let errors = memory.with_code(codes::parsing::INVALID_NUMBER);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_error());
    }

    #[test]
    fn test_console_logger_formats_do_not_panic() {
        let event = LogEvent::error(codes::parsing::RAGGED_MATRIX, "Ragged").with_context("row", "2");
        ConsoleLogger::new(OutputFormat::Plain).log(&event);
        ConsoleLogger::new(OutputFormat::Json).log(&event);
    }
}
