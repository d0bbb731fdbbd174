//! Error types for lazymat

use crate::matrix::Shape;
use thiserror::Error;

/// Result type alias using lazymat's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lazymat operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Operand shapes are incompatible for an operation
    #[error("Shape mismatch in {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        /// The operation that rejected the operands
        op: &'static str,
        /// Left-hand side shape
        lhs: Shape,
        /// Right-hand side shape
        rhs: Shape,
    },

    /// A square matrix was required
    #[error("Expected a square matrix, got {rows}x{cols}")]
    NonSquareMatrix {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// Factorization met a zero or numerically negligible pivot
    #[error("Matrix is singular or ill-conditioned: pivot U[{index},{index}] = {pivot:e}")]
    Singular {
        /// Diagonal position of the offending pivot
        index: usize,
        /// Value of the pivot (as f64)
        pivot: f64,
    },

    /// Flat index out of bounds
    #[error("Index {index} out of bounds for matrix of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Number of elements in the matrix
        size: usize,
    },

    /// Row/column position out of bounds
    #[error("Position ({row}, {col}) out of bounds for matrix of shape {shape}")]
    PositionOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Shape of the matrix
        shape: Shape,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(op: &'static str, lhs: Shape, rhs: Shape) -> Self {
        Self::ShapeMismatch { op, lhs, rhs }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
