//! Logging macros
//!
//! Context values are any `Display` type, written as `"key" => value`.
//! Nothing is formatted unless the global logger would keep the event,
//! except for error and success events, which are always built.

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, position = $position:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit_event(
            $crate::logging::LogEvent::error($code, $message)
                .with_position($position)
                $(.with_context($key, &$value.to_string()))*
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit_event(
            $crate::logging::LogEvent::error($code, $message)
                $(.with_context($key, &$value.to_string()))*
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::logging::emit_event(
            $crate::logging::LogEvent::success($code, $message)
                $(.with_context($key, &$value.to_string()))*
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::enabled($crate::logging::LogLevel::Info) {
            $crate::logging::emit_event(
                $crate::logging::LogEvent::info($message)
                    $(.with_context($key, &$value.to_string()))*
            )
        }
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::enabled($crate::logging::LogLevel::Warning) {
            $crate::logging::emit_event(
                $crate::logging::LogEvent::warning($message)
                    $(.with_context($key, &$value.to_string()))*
            )
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::enabled($crate::logging::LogLevel::Debug) {
            $crate::logging::emit_event(
                $crate::logging::LogEvent::debug($message)
                    $(.with_context($key, &$value.to_string()))*
            )
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::Position;

    #[test]
    fn test_macro_forms_without_global_logger() {
        let elements: usize = 42;

        log_error!(codes::parsing::UNTERMINATED_MATRIX, "Unterminated matrix");
        log_error!(codes::parsing::UNTERMINATED_MATRIX, "Unterminated matrix",
            position = Position::new(3, 0));
        log_error!(codes::parsing::UNTERMINATED_MATRIX, "Unterminated matrix",
            position = Position::new(3, 0),
            "component" => "tdnn1.affine",
            "rows_read" => elements
        );
        log_error!(codes::file_processing::IO_ERROR, "Read failed", "error" => "broken pipe");
        log_success!(codes::success::COMPONENT_PARSED, "Component parsed",
            "name" => "lda",
            "constants" => 2,
        );
        log_info!("Processing file", "lines" => elements);
        log_warning!("Unusual input");
        log_debug!("Skipping tag", "tag" => "<LearningRate>", "at" => Position::new(1, 9));
    }
}
