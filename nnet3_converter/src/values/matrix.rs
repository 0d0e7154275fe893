//! Dense float matrices and the transposing matrix reader
//!
//! Rows end at `]`, at a line feed, or when the line runs out. The rows are
//! collected in source order and the transpose is returned.

use super::vector::{expect_open_bracket, parse_float};
use crate::config::compile_time::parsing::MAX_TENSOR_ELEMENTS;
use crate::lexical::{LineCursor, LineSource, ParseError};
use crate::utils::Position;
use serde::Serialize;

/// Row-major dense `f32` matrix
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Build from rows of equal width.
    ///
    /// On a ragged row returns `(row_index, expected_width, found_width)`.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, (usize, usize, usize)> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err((index, cols, row.len()));
        }

        // Widths are uniform here, so this is exactly the element count read
        let mut data = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        for row in &rows {
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat row-major storage
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[row * self.cols + col]);
            }
        }

        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }
}

// ============================================================================
// READER
// ============================================================================

/// Token that ended a matrix row
enum RowEnd {
    Close,
    EndOfLine,
    LineFeed,
}

/// Read one row; a leading nested `[` is skipped
fn read_row<S: LineSource>(
    cursor: &mut LineCursor<S>,
    start: Position,
    total: &mut usize,
) -> Result<(Vec<f32>, RowEnd), ParseError> {
    let mut row = Vec::new();

    loop {
        let mut token = cursor.next_token().map(str::to_owned);
        if token.as_deref() == Some("[") {
            token = cursor.next_token().map(str::to_owned);
        }

        let token = match token {
            Some(token) if token == "]" => return Ok((row, RowEnd::Close)),
            Some(token) => token,
            None => return Ok((row, RowEnd::EndOfLine)),
        };

        if *total >= MAX_TENSOR_ELEMENTS {
            return Err(ParseError::TooManyElements {
                construct: "matrix",
                limit: MAX_TENSOR_ELEMENTS,
                at: start,
            });
        }
        row.push(parse_float(&token, cursor.position())?);
        *total += 1;

        if cursor.skip_whitespace() {
            return Ok((row, RowEnd::LineFeed));
        }
    }
}

/// Read `[ r1 \n r2 ... ]` and return the transpose of the rows as read
pub fn read_matrix_transposed<S: LineSource>(
    cursor: &mut LineCursor<S>,
) -> Result<Matrix, ParseError> {
    let start = expect_open_bracket(cursor)?;
    let mut rows: Vec<Vec<f32>> = Vec::new();
    let mut total = 0;

    loop {
        let (row, end) = read_row(cursor, start, &mut total)?;
        if !row.is_empty() {
            rows.push(row);
        }

        match end {
            RowEnd::Close => break,
            RowEnd::LineFeed => {}
            RowEnd::EndOfLine => {
                if !cursor.advance_line() {
                    return Err(ParseError::UnterminatedMatrix { start });
                }
            }
        }
    }

    let matrix = Matrix::from_rows(rows).map_err(|(row, expected, found)| {
        ParseError::RaggedMatrix {
            row,
            expected,
            found,
            at: cursor.position(),
        }
    })?;

    Ok(matrix.transpose())
}
