//! Lexical layer: tokenizer, line cursor and parse errors

pub mod cursor;
pub mod error;
pub mod tokenizer;

pub use cursor::{LineCursor, LineSource, ReaderLines, TextLines};
pub use error::ParseError;
pub use tokenizer::{is_component_type_tag, next_token};
