//! Helper functions for linear algebra operations

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::matrix::MatrixView;

/// Element types the factorization routines accept
pub trait LinalgElement: Element {
    /// Machine epsilon for this type
    fn epsilon_val() -> f64;
    /// Absolute value
    fn abs_val(self) -> Self;
}

impl LinalgElement for f32 {
    #[inline]
    fn epsilon_val() -> f64 {
        f32::EPSILON as f64
    }
    #[inline]
    fn abs_val(self) -> Self {
        self.abs()
    }
}

impl LinalgElement for f64 {
    #[inline]
    fn epsilon_val() -> f64 {
        f64::EPSILON
    }
    #[inline]
    fn abs_val(self) -> Self {
        self.abs()
    }
}

/// Validate matrix is square, returning its order
pub fn validate_square_matrix<V: MatrixView + ?Sized>(matrix: &V) -> Result<usize> {
    let (rows, cols) = (matrix.rows(), matrix.cols());
    if rows != cols {
        return Err(Error::NonSquareMatrix { rows, cols });
    }
    Ok(rows)
}

/// Largest absolute element, 0 for an empty matrix
pub fn max_abs<T: LinalgElement>(data: &[T]) -> f64 {
    data.iter()
        .map(|x| x.abs_val().to_f64())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Identity, Matrix};

    #[test]
    fn test_validate_square_matrix() {
        assert_eq!(validate_square_matrix(&Identity::<f64>::new(3)).unwrap(), 3);
        let err = validate_square_matrix(&Matrix::<f64>::new(2, 3)).unwrap_err();
        assert_eq!(err, Error::NonSquareMatrix { rows: 2, cols: 3 });
    }

    #[test]
    fn test_max_abs() {
        assert_eq!(max_abs(&[1.0f64, -4.5, 2.0]), 4.5);
        assert_eq!(max_abs::<f32>(&[]), 0.0);
    }
}
