//! Fatal parse errors for the component grammar
//!
//! Every variant aborts the whole parse session; there is no recovery.

use crate::logging::codes;
use crate::utils::Position;
use std::num::{ParseFloatError, ParseIntError};

/// Parse errors raised by the tokenizer, the value readers and the
/// attribute loop
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Error reading Component at {at}, expected <xxxComponent>, got: {token}")]
    InvalidComponentType { token: String, at: Position },

    #[error("Error at {at}, expected bool but got {token}")]
    InvalidBoolean { token: String, at: Position },

    #[error("Invalid integer literal '{token}' at {at}")]
    InvalidInteger {
        token: String,
        at: Position,
        #[source]
        source: ParseIntError,
    },

    #[error("Invalid float literal '{token}' at {at}")]
    InvalidFloat {
        token: String,
        at: Position,
        #[source]
        source: ParseFloatError,
    },

    #[error("Expected {expected} at {at} but the line ended")]
    MissingValue { expected: &'static str, at: Position },

    #[error("Error at {at}, expected [ but got {token}")]
    ExpectedOpenBracket { token: String, at: Position },

    #[error("Encountered EOF while reading vector started at {start}")]
    UnterminatedVector { start: Position },

    #[error("Encountered EOF while reading matrix started at {start}")]
    UnterminatedMatrix { start: Position },

    #[error("Matrix row {row} has {found} elements, expected {expected} (at {at})")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
        at: Position,
    },

    #[error("{construct} at {at} exceeds the limit of {limit} elements")]
    TooManyElements {
        construct: &'static str,
        limit: usize,
        at: Position,
    },

    #[error("Error parsing nnet3 file: input ended at {at} inside a component declaration")]
    UnexpectedEndOfInput { at: Position },

    #[error("Unsupported component type {type_tag} at {at}")]
    UnsupportedComponentType { type_tag: String, at: Position },

    #[error("Too many components: the limit is {limit}")]
    TooManyComponents { limit: usize },

    #[error("Component '{component}' has inconsistent attributes: {message}")]
    InconsistentAttributes { component: String, message: String },
}

impl ParseError {
    /// Get the diagnostic code for this error
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ParseError::InvalidComponentType { .. } => codes::parsing::INVALID_COMPONENT_TYPE,
            ParseError::InvalidBoolean { .. } => codes::parsing::INVALID_BOOLEAN,
            ParseError::InvalidInteger { .. } | ParseError::InvalidFloat { .. } => {
                codes::parsing::INVALID_NUMBER
            }
            ParseError::MissingValue { .. } => codes::parsing::MISSING_VALUE,
            ParseError::ExpectedOpenBracket { .. } => codes::parsing::EXPECTED_OPEN_BRACKET,
            ParseError::UnterminatedVector { .. } => codes::parsing::UNTERMINATED_VECTOR,
            ParseError::UnterminatedMatrix { .. } => codes::parsing::UNTERMINATED_MATRIX,
            ParseError::RaggedMatrix { .. } => codes::parsing::RAGGED_MATRIX,
            ParseError::TooManyElements { .. } => codes::parsing::TOO_MANY_ELEMENTS,
            ParseError::UnexpectedEndOfInput { .. } => codes::parsing::UNEXPECTED_END_OF_INPUT,
            ParseError::UnsupportedComponentType { .. } => {
                codes::parsing::UNSUPPORTED_COMPONENT_TYPE
            }
            ParseError::TooManyComponents { .. } => codes::parsing::TOO_MANY_COMPONENTS,
            ParseError::InconsistentAttributes { .. } => codes::parsing::INCONSISTENT_ATTRIBUTES,
        }
    }

    /// Source position the error refers to, when it has one
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::InvalidComponentType { at, .. }
            | ParseError::InvalidBoolean { at, .. }
            | ParseError::InvalidInteger { at, .. }
            | ParseError::InvalidFloat { at, .. }
            | ParseError::MissingValue { at, .. }
            | ParseError::ExpectedOpenBracket { at, .. }
            | ParseError::RaggedMatrix { at, .. }
            | ParseError::TooManyElements { at, .. }
            | ParseError::UnexpectedEndOfInput { at }
            | ParseError::UnsupportedComponentType { at, .. } => Some(*at),
            ParseError::UnterminatedVector { start } | ParseError::UnterminatedMatrix { start } => {
                Some(*start)
            }
            ParseError::TooManyComponents { .. } | ParseError::InconsistentAttributes { .. } => {
                None
            }
        }
    }

    /// Check if this error should halt processing
    pub fn requires_halt(&self) -> bool {
        self.error_code().requires_halt()
    }

    /// Log this error through the global logger with its code and position
    pub fn log(&self) {
        let message = self.to_string();
        match self.position() {
            Some(at) => crate::log_error!(self.error_code(), &message, position = at),
            None => crate::log_error!(self.error_code(), &message),
        }
    }
}

/// Render an optional token for error messages
pub(crate) fn describe_token(token: Option<&str>) -> String {
    match token {
        Some(token) => token.to_string(),
        None => "end of line".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_halt() {
        let error = ParseError::UnterminatedVector {
            start: Position::new(4, 10),
        };
        assert_eq!(error.error_code().as_str(), "E025");
        assert!(error.requires_halt());
        assert_eq!(error.position(), Some(Position::new(4, 10)));
    }

    #[test]
    fn test_invalid_number_keeps_source() {
        let source = "x1".parse::<i64>().unwrap_err();
        let error = ParseError::InvalidInteger {
            token: "x1".to_string(),
            at: Position::new(1, 2),
            source,
        };
        assert!(std::error::Error::source(&error).is_some());
        assert!(error.to_string().contains("'x1'"));
    }

    #[test]
    fn test_messages_name_offending_token() {
        let error = ParseError::InvalidComponentType {
            token: "<Affine>".to_string(),
            at: Position::new(1, 8),
        };
        assert!(error.to_string().contains("<Affine>"));
        assert!(error.to_string().contains("expected <xxxComponent>"));
        assert_eq!(describe_token(None), "end of line");
    }
}
