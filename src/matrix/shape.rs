//! Shape type: rows and columns of a matrix

use crate::error::{Error, Result};
use std::fmt;

/// Shape of a row-major matrix
///
/// `rows * cols` may be zero (the empty matrix).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl Shape {
    /// Create a shape.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Shape of an `n x n` matrix.
    #[inline]
    pub const fn square(n: usize) -> Self {
        Self { rows: n, cols: n }
    }

    /// Number of elements.
    #[inline]
    pub const fn size(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the shape holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether rows equal columns.
    #[inline]
    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major flat index of `(row, col)`, checked against the shape.
    #[inline]
    pub fn flat_index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(Error::PositionOutOfBounds {
                row,
                col,
                shape: *self,
            })
        }
    }

    /// Check a flat index against the shape.
    #[inline]
    pub fn check_flat(&self, index: usize) -> Result<usize> {
        if index < self.size() {
            Ok(index)
        } else {
            Err(Error::IndexOutOfBounds {
                index,
                size: self.size(),
            })
        }
    }

    /// `(row, col)` position of a flat index. Does not check bounds.
    #[inline]
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rows, self.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

impl From<Shape> for (usize, usize) {
    fn from(shape: Shape) -> Self {
        (shape.rows, shape.cols)
    }
}

impl PartialEq<(usize, usize)> for Shape {
    fn eq(&self, other: &(usize, usize)) -> bool {
        self.rows == other.0 && self.cols == other.1
    }
}

/// Panic with the error of a failed bounds check.
///
/// Used by accessors whose signature cannot return a `Result`.
#[cold]
#[track_caller]
pub(crate) fn out_of_bounds(err: Error) -> ! {
    panic!("{err}")
}
