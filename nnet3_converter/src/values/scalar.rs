//! Scalar readers: boolean, integer and float
//!
//! Each reads exactly one token from the current line and never pulls a new
//! line; an exhausted line is a `MissingValue` error.

use crate::lexical::{LineCursor, LineSource, ParseError};

fn read_scalar_token<S: LineSource>(
    cursor: &mut LineCursor<S>,
    expected: &'static str,
) -> Result<String, ParseError> {
    match cursor.next_token() {
        Some(token) => Ok(token.to_owned()),
        None => Err(ParseError::MissingValue {
            expected,
            at: cursor.position(),
        }),
    }
}

/// Read `F|False|false` or `T|True|true`
pub fn read_bool<S: LineSource>(cursor: &mut LineCursor<S>) -> Result<bool, ParseError> {
    let token = read_scalar_token(cursor, "bool")?;
    match token.as_str() {
        "F" | "False" | "false" => Ok(false),
        "T" | "True" | "true" => Ok(true),
        _ => Err(ParseError::InvalidBoolean {
            token,
            at: cursor.position(),
        }),
    }
}

pub fn read_int<S: LineSource>(cursor: &mut LineCursor<S>) -> Result<i64, ParseError> {
    let token = read_scalar_token(cursor, "integer")?;
    token.parse().map_err(|source| ParseError::InvalidInteger {
        at: cursor.position(),
        token,
        source,
    })
}

pub fn read_float<S: LineSource>(cursor: &mut LineCursor<S>) -> Result<f64, ParseError> {
    let token = read_scalar_token(cursor, "float")?;
    token.parse().map_err(|source| ParseError::InvalidFloat {
        at: cursor.position(),
        token,
        source,
    })
}
