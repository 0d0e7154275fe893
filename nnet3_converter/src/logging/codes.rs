//! Diagnostic codes and their metadata
//!
//! Every error code is registered once in `REGISTRY` with its category,
//! severity and guidance. Info, success and debug codes carry no metadata.

use serde::{Serialize, Serializer};
use std::fmt;

/// Stable diagnostic code such as `E022` or `I020`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Registered metadata; `None` for codes that are not errors
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        REGISTRY.iter().find(|metadata| metadata.code == *self)
    }

    pub fn category(&self) -> Category {
        self.metadata()
            .map(|metadata| metadata.category)
            .unwrap_or(Category::Info)
    }

    pub fn severity(&self) -> Severity {
        self.metadata()
            .map(|metadata| metadata.severity)
            .unwrap_or(Severity::Low)
    }

    /// Whether processing must stop once this code is raised
    pub fn requires_halt(&self) -> bool {
        self.metadata()
            .map(|metadata| metadata.requires_halt)
            .unwrap_or(false)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    System,
    FileProcessing,
    Parsing,
    /// Anything without registered metadata
    Info,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "System",
            Category::FileProcessing => "FileProcessing",
            Category::Parsing => "Parsing",
            Category::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorMetadata {
    #[serde(skip)]
    pub code: Code,
    pub category: Category,
    pub severity: Severity,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODES
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Component grammar errors
pub mod parsing {
    use super::Code;

    pub const INVALID_COMPONENT_TYPE: Code = Code::new("E020");
    pub const INVALID_BOOLEAN: Code = Code::new("E021");
    pub const INVALID_NUMBER: Code = Code::new("E022");
    pub const MISSING_VALUE: Code = Code::new("E023");
    pub const EXPECTED_OPEN_BRACKET: Code = Code::new("E024");
    pub const UNTERMINATED_VECTOR: Code = Code::new("E025");
    pub const UNTERMINATED_MATRIX: Code = Code::new("E026");
    pub const RAGGED_MATRIX: Code = Code::new("E027");
    pub const TOO_MANY_ELEMENTS: Code = Code::new("E028");
    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E029");
    pub const UNSUPPORTED_COMPONENT_TYPE: Code = Code::new("E030");
    pub const TOO_MANY_COMPONENTS: Code = Code::new("E031");
    pub const INCONSISTENT_ATTRIBUTES: Code = Code::new("E032");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const COMPONENT_PARSED: Code = Code::new("I020");
    pub const COMPONENT_SECTION_COMPLETE: Code = Code::new("I021");
    pub const PIPELINE_COMPLETE: Code = Code::new("I030");
}

/// Codes for events that have no specific code of their own
pub mod generic {
    use super::Code;

    pub const INFO: Code = Code::new("I000");
    pub const WARNING: Code = Code::new("W000");
    pub const DEBUG: Code = Code::new("D000");
}

// ============================================================================
// REGISTRY
// ============================================================================

const fn system_error(
    code: Code,
    severity: Severity,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata {
        code,
        category: Category::System,
        severity,
        requires_halt: true,
        description,
        recommended_action,
    }
}

const fn file_error(
    code: Code,
    severity: Severity,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata {
        code,
        category: Category::FileProcessing,
        severity,
        requires_halt: true,
        description,
        recommended_action,
    }
}

/// A single malformed declaration invalidates the whole input
const fn parse_error(
    code: Code,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata {
        code,
        category: Category::Parsing,
        severity: Severity::High,
        requires_halt: true,
        description,
        recommended_action,
    }
}

static REGISTRY: &[ErrorMetadata] = &[
    system_error(
        system::INTERNAL_ERROR,
        Severity::Critical,
        "Internal converter error",
        "File a bug report with the failing input",
    ),
    system_error(
        system::INITIALIZATION_FAILURE,
        Severity::Critical,
        "Logging or limits failed to initialize",
        "Check logging configuration and startup order",
    ),
    system_error(
        system::CONFIGURATION_ERROR,
        Severity::High,
        "Runtime preferences could not be loaded",
        "Check the preferences file path and its TOML syntax",
    ),
    file_error(
        file_processing::FILE_NOT_FOUND,
        Severity::Medium,
        "Model file not found",
        "Check the path passed on the command line",
    ),
    file_error(
        file_processing::FILE_TOO_LARGE,
        Severity::Medium,
        "Model file exceeds the size or line limit",
        "Rebuild with a larger limit profile",
    ),
    file_error(
        file_processing::EMPTY_FILE,
        Severity::Medium,
        "Model file is empty",
        "Provide a text model file with content",
    ),
    file_error(
        file_processing::PERMISSION_DENIED,
        Severity::Medium,
        "Permission denied reading the model file",
        "Check file permissions",
    ),
    file_error(
        file_processing::INVALID_ENCODING,
        Severity::Medium,
        "Model file is not valid UTF-8 text",
        "Convert binary models to text before converting",
    ),
    file_error(
        file_processing::IO_ERROR,
        Severity::High,
        "I/O error while reading input",
        "Check storage health and retry",
    ),
    file_error(
        file_processing::INVALID_PATH,
        Severity::Medium,
        "Path is empty or not a regular file",
        "Pass the path of a model file",
    ),
    parse_error(
        parsing::INVALID_COMPONENT_TYPE,
        "Token is not a <xxxComponent> type tag",
        "Check the declaration at the reported position",
    ),
    parse_error(
        parsing::INVALID_BOOLEAN,
        "Expected one of T, True, true, F, False, false",
        "Fix the boolean literal at the reported position",
    ),
    parse_error(
        parsing::INVALID_NUMBER,
        "Numeric literal could not be parsed",
        "Fix the numeric literal at the reported position",
    ),
    parse_error(
        parsing::MISSING_VALUE,
        "Attribute tag is not followed by a value on the same line",
        "Place the value on the same line as its tag",
    ),
    parse_error(
        parsing::EXPECTED_OPEN_BRACKET,
        "Vector or matrix literal does not start with [",
        "Check the literal following the attribute tag",
    ),
    parse_error(
        parsing::UNTERMINATED_VECTOR,
        "Input ended inside a vector literal",
        "Check that the model file is complete",
    ),
    parse_error(
        parsing::UNTERMINATED_MATRIX,
        "Input ended inside a matrix literal",
        "Check that the model file is complete",
    ),
    parse_error(
        parsing::RAGGED_MATRIX,
        "Matrix rows have different lengths",
        "Check the row breaks inside the matrix literal",
    ),
    parse_error(
        parsing::TOO_MANY_ELEMENTS,
        "Vector or matrix exceeds the element limit",
        "Rebuild with a larger limit profile",
    ),
    parse_error(
        parsing::UNEXPECTED_END_OF_INPUT,
        "Input ended inside a component declaration",
        "Check that the model file is complete",
    ),
    parse_error(
        parsing::UNSUPPORTED_COMPONENT_TYPE,
        "Component type has no registered variant",
        "Remove the component or add support for its type",
    ),
    parse_error(
        parsing::TOO_MANY_COMPONENTS,
        "Model declares more components than allowed",
        "Rebuild with a larger limit profile",
    ),
    parse_error(
        parsing::INCONSISTENT_ATTRIBUTES,
        "Component attributes are missing or disagree in length",
        "Check the statistics vectors of the component",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_codes_are_registered_and_halt() {
        let codes = [
            parsing::INVALID_COMPONENT_TYPE,
            parsing::INVALID_BOOLEAN,
            parsing::INVALID_NUMBER,
            parsing::MISSING_VALUE,
            parsing::EXPECTED_OPEN_BRACKET,
            parsing::UNTERMINATED_VECTOR,
            parsing::UNTERMINATED_MATRIX,
            parsing::RAGGED_MATRIX,
            parsing::TOO_MANY_ELEMENTS,
            parsing::UNEXPECTED_END_OF_INPUT,
            parsing::UNSUPPORTED_COMPONENT_TYPE,
            parsing::TOO_MANY_COMPONENTS,
            parsing::INCONSISTENT_ATTRIBUTES,
        ];

        for code in codes {
            assert_eq!(code.category(), Category::Parsing, "{}", code);
            assert!(code.requires_halt(), "{}", code);
        }
    }

    #[test]
    fn test_registry_codes_are_unique() {
        let unique: HashSet<&str> = REGISTRY.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(unique.len(), REGISTRY.len());
    }

    #[test]
    fn test_non_error_codes_have_no_metadata() {
        assert!(success::PIPELINE_COMPLETE.metadata().is_none());
        assert!(!generic::DEBUG.requires_halt());
        assert_eq!(success::COMPONENT_PARSED.category(), Category::Info);
        assert_eq!(success::COMPONENT_PARSED.severity(), Severity::Low);
    }

    #[test]
    fn test_metadata_lookup() {
        let metadata = file_processing::FILE_NOT_FOUND.metadata().unwrap();
        assert_eq!(metadata.category, Category::FileProcessing);
        assert_eq!(metadata.severity, Severity::Medium);
        assert_eq!(system::INTERNAL_ERROR.severity(), Severity::Critical);
    }

    #[test]
    fn test_code_serializes_as_string() {
        let json = serde_json::to_string(&parsing::RAGGED_MATRIX).unwrap();
        assert_eq!(json, "\"E027\"");
    }
}
