//! Typed values read from the component grammar
//!
//! Scalars, bracketed vectors and transposed matrices, plus the `Tensor`
//! form that promoted constants take.

pub mod matrix;
pub mod scalar;
pub mod vector;

pub use matrix::{read_matrix_transposed, Matrix};
pub use scalar::{read_bool, read_float, read_int};
pub use vector::{read_float_vector, read_int_vector, read_vector};

use crate::lexical::{LineCursor, LineSource, ParseError};
use serde::Serialize;

// ============================================================================
// ATTRIBUTE VALUES
// ============================================================================

/// One attribute value stored on a component
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    IntVector(Vec<i64>),
    FloatVector(Vec<f32>),
    Matrix(Matrix),
}

impl AttributeValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(value) => Some(*value),
            AttributeValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_float_vector(&self) -> Option<&[f32]> {
        match self {
            AttributeValue::FloatVector(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            AttributeValue::Matrix(matrix) => Some(matrix),
            _ => None,
        }
    }

    /// Number of stored elements; scalars count as one
    pub fn len(&self) -> usize {
        match self {
            AttributeValue::Bool(_) | AttributeValue::Int(_) | AttributeValue::Float(_) => 1,
            AttributeValue::IntVector(values) => values.len(),
            AttributeValue::FloatVector(values) => values.len(),
            AttributeValue::Matrix(matrix) => matrix.data().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short type name for summaries
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::Float(_) => "float",
            AttributeValue::IntVector(_) => "int vector",
            AttributeValue::FloatVector(_) => "float vector",
            AttributeValue::Matrix(_) => "matrix",
        }
    }
}

// ============================================================================
// TENSORS
// ============================================================================

/// Numeric array held as a promoted constant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tensor {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl Tensor {
    pub fn vector(data: Vec<f32>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Matrix> for Tensor {
    fn from(matrix: Matrix) -> Self {
        let shape = vec![matrix.rows(), matrix.cols()];
        Self {
            shape,
            data: matrix.into_data(),
        }
    }
}

impl TryFrom<AttributeValue> for Tensor {
    /// Scalars are handed back unchanged
    type Error = AttributeValue;

    fn try_from(value: AttributeValue) -> Result<Self, Self::Error> {
        match value {
            AttributeValue::FloatVector(values) => Ok(Tensor::vector(values)),
            AttributeValue::IntVector(values) => {
                Ok(Tensor::vector(values.into_iter().map(|v| v as f32).collect()))
            }
            AttributeValue::Matrix(matrix) => Ok(Tensor::from(matrix)),
            scalar => Err(scalar),
        }
    }
}

// ============================================================================
// READER DISPATCH
// ============================================================================

/// Reader selected by an attribute table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReader {
    Bool,
    Int,
    Float,
    IntVector,
    FloatVector,
    MatrixTransposed,
}

impl ValueReader {
    pub fn read<S: LineSource>(
        self,
        cursor: &mut LineCursor<S>,
    ) -> Result<AttributeValue, ParseError> {
        Ok(match self {
            ValueReader::Bool => AttributeValue::Bool(read_bool(cursor)?),
            ValueReader::Int => AttributeValue::Int(read_int(cursor)?),
            ValueReader::Float => AttributeValue::Float(read_float(cursor)?),
            ValueReader::IntVector => AttributeValue::IntVector(read_int_vector(cursor)?),
            ValueReader::FloatVector => AttributeValue::FloatVector(read_float_vector(cursor)?),
            ValueReader::MatrixTransposed => {
                AttributeValue::Matrix(read_matrix_transposed(cursor)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::TextLines;

    #[test]
    fn test_reader_dispatch() {
        let mut cursor = LineCursor::with_line(
            TextLines::new(""),
            "T 4 0.5 [ 1 -2 ] [ 0.25 ] [ 1 2 ]",
            0,
        );

        assert_eq!(ValueReader::Bool.read(&mut cursor).unwrap(), AttributeValue::Bool(true));
        assert_eq!(ValueReader::Int.read(&mut cursor).unwrap(), AttributeValue::Int(4));
        assert_eq!(ValueReader::Float.read(&mut cursor).unwrap(), AttributeValue::Float(0.5));
        assert_eq!(
            ValueReader::IntVector.read(&mut cursor).unwrap(),
            AttributeValue::IntVector(vec![1, -2])
        );
        assert_eq!(
            ValueReader::FloatVector.read(&mut cursor).unwrap(),
            AttributeValue::FloatVector(vec![0.25])
        );

        let matrix = ValueReader::MatrixTransposed.read(&mut cursor).unwrap();
        assert_eq!(matrix.as_matrix().map(|m| (m.rows(), m.cols())), Some((2, 1)));
    }

    #[test]
    fn test_tensor_from_values() {
        let matrix = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let tensor = Tensor::try_from(AttributeValue::Matrix(matrix)).unwrap();
        assert_eq!(tensor.shape, vec![2, 2]);

        let tensor = Tensor::try_from(AttributeValue::FloatVector(vec![0.5; 3])).unwrap();
        assert_eq!(tensor.shape, vec![3]);

        assert_eq!(
            Tensor::try_from(AttributeValue::Int(3)),
            Err(AttributeValue::Int(3))
        );
    }

    #[test]
    fn test_value_lengths() {
        assert_eq!(AttributeValue::FloatVector(vec![]).len(), 0);
        assert!(AttributeValue::FloatVector(vec![]).is_empty());
        assert_eq!(AttributeValue::Float(1.0).len(), 1);
        assert_eq!(AttributeValue::IntVector(vec![1, 2]).kind_name(), "int vector");
    }
}
