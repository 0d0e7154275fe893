//! Log events and their plain and JSON renderings

use super::codes::{generic, Code, ErrorMetadata};
use crate::utils::Position;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

pub use crate::config::runtime::LogLevel;

/// One diagnostic record
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Key/value pairs in the order they were attached
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub context: IndexMap<String, String>,
}

/// JSON line: the event plus the registry entry for error codes
#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(flatten)]
    event: &'a LogEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnosis: Option<&'static ErrorMetadata>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            position: None,
            context: IndexMap::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, code, message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, generic::WARNING, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, generic::INFO, message)
    }

    /// Info-level event carrying a success code
    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, generic::DEBUG, message)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn requires_halt(&self) -> bool {
        self.code.requires_halt()
    }

    /// Single-line JSON rendering for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let diagnosis = if self.is_error() {
            self.code.metadata()
        } else {
            None
        };
        serde_json::to_string(&JsonLine {
            event: self,
            diagnosis,
        })
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {}", self.level.as_str(), self.code, self.message)?;

        if let Some(position) = &self.position {
            write!(f, " at {}", position)?;
        }

        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            write!(f, " ({})", pairs.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_plain_format() {
        let event = LogEvent::error(codes::parsing::INVALID_BOOLEAN, "Expected bool")
            .with_position(Position::new(3, 17))
            .with_context("component", "bn1")
            .with_context("token", "yes");

        assert_eq!(
            event.to_string(),
            "[ERROR] E021 - Expected bool at line 3, offset 17 (component=bn1, token=yes)"
        );
        assert!(event.requires_halt());
    }

    #[test]
    fn test_json_error_carries_diagnosis() {
        let event = LogEvent::error(codes::parsing::UNTERMINATED_VECTOR, "Unterminated vector")
            .with_position(Position::new(12, 4))
            .with_context("component", "tdnn1.affine");

        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["code"], "E025");
        assert_eq!(json["position"]["line"], 12);
        assert_eq!(json["context"]["component"], "tdnn1.affine");
        assert_eq!(json["diagnosis"]["category"], "Parsing");
        assert_eq!(json["diagnosis"]["requires_halt"], true);
    }

    #[test]
    fn test_json_info_is_lean() {
        let event = LogEvent::success(codes::success::COMPONENT_PARSED, "Component parsed");
        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();

        assert_eq!(json["code"], "I020");
        assert!(json.get("diagnosis").is_none());
        assert!(json.get("position").is_none());
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_generic_codes() {
        assert_eq!(LogEvent::debug("Skipping tag").code.as_str(), "D000");
        assert_eq!(LogEvent::warning("Odd").level, LogLevel::Warning);
    }
}
