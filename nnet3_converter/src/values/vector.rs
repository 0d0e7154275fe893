//! Bracketed vector reader: `[ e1 e2 ... ]`, possibly spanning lines

use crate::config::compile_time::parsing::MAX_TENSOR_ELEMENTS;
use crate::lexical::error::describe_token;
use crate::lexical::{LineCursor, LineSource, ParseError};
use crate::utils::Position;

/// Consume the opening `[` of a vector or matrix on the current line
pub(crate) fn expect_open_bracket<S: LineSource>(
    cursor: &mut LineCursor<S>,
) -> Result<Position, ParseError> {
    let start = cursor.position();
    match cursor.next_token() {
        Some("[") => Ok(start),
        other => {
            let token = describe_token(other);
            Err(ParseError::ExpectedOpenBracket {
                token,
                at: cursor.position(),
            })
        }
    }
}

/// Read a vector whose elements are converted by `parse_element`.
///
/// An exhausted line pulls the next one; end of input before `]` is an
/// `UnterminatedVector` error.
pub fn read_vector<S, T, F>(
    cursor: &mut LineCursor<S>,
    parse_element: F,
) -> Result<Vec<T>, ParseError>
where
    S: LineSource,
    F: Fn(&str, Position) -> Result<T, ParseError>,
{
    let start = expect_open_bracket(cursor)?;
    let mut elements = Vec::new();

    loop {
        match cursor.next_token() {
            Some("]") => break,
            Some(token) => {
                if elements.len() >= MAX_TENSOR_ELEMENTS {
                    return Err(ParseError::TooManyElements {
                        construct: "vector",
                        limit: MAX_TENSOR_ELEMENTS,
                        at: start,
                    });
                }
                let token = token.to_owned();
                elements.push(parse_element(&token, cursor.position())?);
            }
            None => {
                if !cursor.advance_line() {
                    return Err(ParseError::UnterminatedVector { start });
                }
            }
        }
    }

    Ok(elements)
}

fn parse_int(token: &str, at: Position) -> Result<i64, ParseError> {
    token.parse().map_err(|source| ParseError::InvalidInteger {
        token: token.to_string(),
        at,
        source,
    })
}

/// Parse a single float element, shared with the matrix reader
pub(crate) fn parse_float(token: &str, at: Position) -> Result<f32, ParseError> {
    token.parse().map_err(|source| ParseError::InvalidFloat {
        token: token.to_string(),
        at,
        source,
    })
}

pub fn read_int_vector<S: LineSource>(cursor: &mut LineCursor<S>) -> Result<Vec<i64>, ParseError> {
    read_vector(cursor, parse_int)
}

pub fn read_float_vector<S: LineSource>(
    cursor: &mut LineCursor<S>,
) -> Result<Vec<f32>, ParseError> {
    read_vector(cursor, parse_float)
}
