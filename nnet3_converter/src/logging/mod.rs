//! Global logging for the nnet3 converter
//!
//! One process-wide `LoggingService`, a per-thread "current file" that is
//! attached to every event, and the `log_*!` macros. Until
//! `init_global_logging` runs nothing is emitted, so the parsing core works
//! as a plain library.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, OutputFormat};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

/// Install the console service described by the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;
    init_global_logging_with_service(Arc::new(LoggingService::from_preferences()))?;

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
        "buffer_size" => config::get_error_buffer_size()
    );
    Ok(())
}

/// Install a caller-built service, e.g. one backed by a `MemoryLogger`
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

/// Whether an event at `level` would be kept; false before initialization
pub fn enabled(level: LogLevel) -> bool {
    GLOBAL_LOGGER
        .get()
        .map(|service| service.enabled(level))
        .unwrap_or(false)
}

/// Run `f` with `file_path` attached to every event it logs on this thread
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = FILE_CONTEXT.with(|ctx| ctx.replace(Some(file_path)));
    let result = f();
    FILE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    result
}

pub fn current_file_context() -> Option<PathBuf> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Attach the file context and hand the event to the global service
pub fn emit_event(event: LogEvent) {
    let service = match GLOBAL_LOGGER.get() {
        Some(service) => service,
        None => return,
    };

    let event = match current_file_context() {
        Some(path) => event.with_context("file", &path.display().to_string()),
        None => event,
    };
    service.log_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_is_scoped() {
        assert!(current_file_context().is_none());

        let result = with_file_context(PathBuf::from("final.mdl.txt"), || {
            let inner = with_file_context(PathBuf::from("nested.txt"), current_file_context);
            assert_eq!(inner, Some(PathBuf::from("nested.txt")));
            current_file_context()
        });

        assert_eq!(result, Some(PathBuf::from("final.mdl.txt")));
        assert!(current_file_context().is_none());
    }

    #[test]
    fn test_emit_without_service_is_silent() {
        emit_event(LogEvent::error(codes::system::INTERNAL_ERROR, "Test error"));
    }
}
