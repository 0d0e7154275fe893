//! Line-oriented input cursor shared by all readers
//!
//! The cursor owns the current line, the byte offset into it and the source
//! that supplies further lines. Scalar readers only consume tokens; vector and
//! matrix readers pull lines through `advance_line`.

use super::error::{describe_token, ParseError};
use super::tokenizer;
use crate::utils::Position;
use std::io::BufRead;

// ============================================================================
// LINE SOURCES
// ============================================================================

/// Supplier of raw text lines, each including its trailing line feed
pub trait LineSource {
    /// Next line, or `None` at end of input
    fn next_line(&mut self) -> Option<String>;
}

/// Lines taken from an in-memory string
pub struct TextLines<'a> {
    lines: std::str::SplitInclusive<'a, char>,
}

impl<'a> TextLines<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.split_inclusive('\n'),
        }
    }
}

impl LineSource for TextLines<'_> {
    fn next_line(&mut self) -> Option<String> {
        self.lines.next().map(str::to_owned)
    }
}

/// Lines read lazily from a buffered reader
pub struct ReaderLines<R> {
    reader: R,
    read_error: Option<String>,
}

impl<R: BufRead> ReaderLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            read_error: None,
        }
    }

    /// The read failure that ended the input early, if any
    pub fn read_error(&self) -> Option<&str> {
        self.read_error.as_deref()
    }
}

impl<R: BufRead> LineSource for ReaderLines<R> {
    fn next_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                // A read failure ends the input; the caller reports end of input
                crate::log_error!(
                    crate::logging::codes::file_processing::IO_ERROR,
                    "Failed to read line from input",
                    "error" => e
                );
                self.read_error = Some(e.to_string());
                None
            }
        }
    }
}

// ============================================================================
// CURSOR
// ============================================================================

/// Current line, offset and line number over a line source
pub struct LineCursor<S> {
    source: S,
    line: String,
    pos: usize,
    line_number: usize,
}

impl<S: LineSource> LineCursor<S> {
    /// Cursor before the first line of `source`
    pub fn new(source: S) -> Self {
        Self {
            source,
            line: String::new(),
            pos: 0,
            line_number: 0,
        }
    }

    /// Cursor positioned inside an already-read line
    pub fn with_line(source: S, line: impl Into<String>, pos: usize) -> Self {
        Self {
            source,
            line: line.into(),
            pos,
            line_number: 1,
        }
    }

    /// Next token on the current line, without pulling new lines
    pub fn next_token(&mut self) -> Option<&str> {
        let (token, pos) = tokenizer::next_token(&self.line, self.pos);
        self.pos = pos;
        token
    }

    /// Replace the current line with the next one from the source.
    ///
    /// Returns false at end of input, leaving the cursor unchanged.
    pub fn advance_line(&mut self) -> bool {
        match self.source.next_line() {
            Some(line) => {
                self.line = line;
                self.pos = 0;
                self.line_number += 1;
                true
            }
            None => false,
        }
    }

    /// Skip whitespace, reporting whether a line feed was crossed
    pub fn skip_whitespace(&mut self) -> bool {
        let (saw_newline, pos) = tokenizer::skip_whitespace(&self.line, self.pos);
        self.pos = pos;
        saw_newline
    }

    /// Read and validate a `<xxxComponent>` type tag from the current line
    pub fn read_component_type_tag(&mut self) -> Result<String, ParseError> {
        let token = self.next_token().map(str::to_owned);
        match token {
            Some(tag) if tokenizer::is_component_type_tag(&tag) => Ok(tag),
            other => Err(ParseError::InvalidComponentType {
                token: describe_token(other.as_deref()),
                at: self.position(),
            }),
        }
    }

    /// Current 1-based line number and byte offset
    pub fn position(&self) -> Position {
        Position::new(self.line_number, self.pos)
    }

    /// Text of the current line
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Byte offset into the current line
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of lines pulled from the source so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_text_lines_keep_line_feeds() {
        let mut lines = TextLines::new("a\nb\nc");
        assert_eq!(lines.next_line().as_deref(), Some("a\n"));
        assert_eq!(lines.next_line().as_deref(), Some("b\n"));
        assert_eq!(lines.next_line().as_deref(), Some("c"));
        assert_eq!(lines.next_line(), None);
    }

    #[test]
    fn test_reader_lines_match_text_lines() {
        let mut lines = ReaderLines::new(Cursor::new("x y\nz\n"));
        assert_eq!(lines.next_line().as_deref(), Some("x y\n"));
        assert_eq!(lines.next_line().as_deref(), Some("z\n"));
        assert_eq!(lines.next_line(), None);
    }

    #[test]
    fn test_reader_lines_record_read_errors() {
        // Invalid UTF-8 fails read_line
        let mut lines = ReaderLines::new(Cursor::new(vec![b'a', 0xff, b'\n']));
        assert_eq!(lines.next_line(), None);
        assert!(lines.read_error().is_some());

        let mut lines = ReaderLines::new(Cursor::new("a\n"));
        assert!(lines.next_line().is_some());
        assert!(lines.read_error().is_none());
    }

    #[test]
    fn test_cursor_does_not_cross_lines_on_its_own() {
        let mut cursor = LineCursor::new(TextLines::new("<Dim> 4\n<Epsilon> 0.1\n"));
        assert_eq!(cursor.next_token(), None);

        assert!(cursor.advance_line());
        assert_eq!(cursor.next_token(), Some("<Dim>"));
        assert_eq!(cursor.next_token(), Some("4"));
        assert_eq!(cursor.next_token(), None);
        assert_eq!(cursor.position().line, 1);

        assert!(cursor.advance_line());
        assert_eq!(cursor.next_token(), Some("<Epsilon>"));
        assert_eq!(cursor.position(), Position::new(2, 9));

        assert!(!cursor.advance_line());
        assert_eq!(cursor.lines_read(), 2);
    }

    #[test]
    fn test_with_line_starts_mid_line() {
        let mut cursor = LineCursor::with_line(TextLines::new(""), "skip <Dim> 3", 5);
        assert_eq!(cursor.next_token(), Some("<Dim>"));
        assert_eq!(cursor.offset(), 10);
        assert_eq!(cursor.line(), "skip <Dim> 3");
    }

    #[test]
    fn test_read_component_type_tag() {
        let mut cursor = LineCursor::with_line(
            TextLines::new(""),
            "<AffineComponent> <Affine> AffineComponent>",
            0,
        );
        assert_eq!(cursor.read_component_type_tag().unwrap(), "<AffineComponent>");

        let error = cursor.read_component_type_tag().unwrap_err();
        assert!(matches!(error, ParseError::InvalidComponentType { ref token, .. } if token == "<Affine>"));

        let error = cursor.read_component_type_tag().unwrap_err();
        assert!(matches!(error, ParseError::InvalidComponentType { ref token, .. } if token == "AffineComponent>"));

        let error = cursor.read_component_type_tag().unwrap_err();
        assert!(matches!(error, ParseError::InvalidComponentType { ref token, .. } if token == "end of line"));
    }
}
