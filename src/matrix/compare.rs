//! Approximate equality between views

use super::view::MatrixView;
use crate::dtype::Element;

/// Relative and absolute tolerance for [`approx_equal`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerance {
    /// Relative tolerance, scaled by the larger magnitude of the pair
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-10,
            atol: 1e-10,
        }
    }
}

impl Tolerance {
    /// Tolerance with the given relative and absolute parts.
    pub const fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// Whether `a` and `b` are within tolerance of each other.
    ///
    /// Uses `|a - b| <= atol + rtol * max(|a|, |b|)`.
    #[inline]
    pub fn close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * a.abs().max(b.abs())
    }
}

/// Whether two views have the same shape and every pair of cells is close.
///
/// Elements are compared in `f64`, so views of different element types can
/// be compared.
pub fn approx_equal<A, B>(lhs: &A, rhs: &B, rtol: f64, atol: f64) -> bool
where
    A: MatrixView + ?Sized,
    B: MatrixView + ?Sized,
{
    approx_equal_with(lhs, rhs, Tolerance::new(rtol, atol))
}

/// [`approx_equal`] with a [`Tolerance`] value.
pub fn approx_equal_with<A, B>(lhs: &A, rhs: &B, tol: Tolerance) -> bool
where
    A: MatrixView + ?Sized,
    B: MatrixView + ?Sized,
{
    lhs.shape() == rhs.shape()
        && lhs
            .iter()
            .zip(rhs.iter())
            .all(|(a, b)| tol.close(a.to_f64(), b.to_f64()))
}

/// Stricter [`approx_equal`]: element types must match, and every cell must
/// also agree between its `(row, col)` and flat accessors.
pub fn deep_approx_equal<A, B>(lhs: &A, rhs: &B, tol: Tolerance) -> bool
where
    A: MatrixView + ?Sized,
    B: MatrixView + ?Sized,
{
    if <A::Elem as Element>::DTYPE != <B::Elem as Element>::DTYPE || lhs.shape() != rhs.shape() {
        return false;
    }
    let cols = lhs.cols();
    for i in 0..lhs.rows() {
        for j in 0..cols {
            let flat = i * cols + j;
            let (a, b) = (lhs.at(i, j).to_f64(), rhs.at(i, j).to_f64());
            let (fa, fb) = (lhs.at_flat(flat).to_f64(), rhs.at_flat(flat).to_f64());
            if !tol.close(a, b) || !tol.close(fa, fb) || !tol.close(a, fa) {
                return false;
            }
        }
    }
    true
}
