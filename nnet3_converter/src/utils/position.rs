//! Source location tracking
//!
//! The component grammar is line oriented, so a location is the 1-based
//! line number plus the offset inside that line where scanning stopped.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text: line number and offset within the line.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (1-based, 0 before the first line is pulled)
    pub line: usize,
    /// Byte offset into the line (always on a char boundary)
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, offset {}", self.line, self.offset)
    }
}
