//! LU factorization without pivoting and the triangular solves built on it

use super::helpers::{LinalgElement, max_abs, validate_square_matrix};
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::matrix::{Matrix, MatrixView, Shape};
use std::fmt;
use tracing::debug;

/// Parameters of [`Lu`]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LuConfig {
    /// Relative threshold below which a pivot counts as negligible.
    ///
    /// A pivot `U[i,i]` is rejected when `|U[i,i]| <= tol * max|M|`.
    /// `None` uses the machine epsilon of the element type.
    pub pivot_tolerance: Option<f64>,
}

impl LuConfig {
    /// Set the relative pivot tolerance.
    pub fn pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = Some(tolerance);
        self
    }

    fn validate(&self) -> Result<()> {
        match self.pivot_tolerance {
            Some(tol) if !tol.is_finite() || tol < 0.0 => Err(Error::invalid_argument(
                "pivot_tolerance",
                format!("must be finite and non-negative, got {tol}"),
            )),
            _ => Ok(()),
        }
    }
}

/// Doolittle LU factorization `M = L · U` of a square view
///
/// `L` is unit lower triangular and `U` is upper triangular. No pivoting is
/// performed, so a matrix with a zero or negligible leading principal minor
/// fails with [`Error::Singular`] even when it is otherwise well conditioned.
///
/// The solver borrows its source and never mutates it. Factorization runs
/// once, on the first call to [`factorize`](Self::factorize) or
/// [`solve`](Self::solve); [`reinit`](Self::reinit) rebinds to another source
/// and invalidates the factors.
///
/// # Example
///
/// ```
/// use lazymat::prelude::*;
///
/// let m = Matrix::from_array([[4.0, 3.0], [6.0, 3.0]]);
/// let mut lu = Lu::new(&m).unwrap();
/// let x = lu.solve(&Matrix::from_array([[10.0], [12.0]])).unwrap();
/// assert!(approx_equal(&x, &Matrix::from_array([[1.0], [2.0]]), 1e-12, 1e-12));
///
/// let (l, u) = lu.factors();
/// assert_eq!(l.as_slice(), &[1.0, 0.0, 1.5, 1.0]);
/// assert_eq!(u.as_slice(), &[4.0, 3.0, 0.0, -1.5]);
/// ```
pub struct Lu<'a, M: MatrixView + ?Sized> {
    source: &'a M,
    l: Matrix<M::Elem>,
    u: Matrix<M::Elem>,
    factorized: bool,
    config: LuConfig,
}

impl<'a, M> Lu<'a, M>
where
    M: MatrixView + ?Sized,
    M::Elem: LinalgElement,
{
    /// Bind a solver to a square source with the default [`LuConfig`].
    pub fn new(source: &'a M) -> Result<Self> {
        Self::with_config(source, LuConfig::default())
    }

    /// Bind a solver to a square source.
    ///
    /// Fails with [`Error::NonSquareMatrix`] unless the source is square, and
    /// with [`Error::InvalidArgument`] for a negative or non-finite tolerance.
    pub fn with_config(source: &'a M, config: LuConfig) -> Result<Self> {
        config.validate()?;
        let n = validate_square_matrix(source)?;
        Ok(Self {
            source,
            l: Matrix::identity(n),
            u: Matrix::zeros(n, n),
            factorized: false,
            config,
        })
    }

    /// Rebind to a new square source and mark the factors stale.
    ///
    /// A source of a different order resets the factors to the identity and
    /// zero matrices of the new order.
    pub fn reinit(&mut self, source: &'a M) -> Result<()> {
        let n = validate_square_matrix(source)?;
        if n != self.order() {
            self.l = Matrix::identity(n);
            self.u = Matrix::zeros(n, n);
        }
        self.source = source;
        self.factorized = false;
        Ok(())
    }

    /// Order of the source matrix.
    pub fn order(&self) -> usize {
        self.source.rows()
    }

    /// Whether the current factors belong to the current source.
    pub fn is_factorized(&self) -> bool {
        self.factorized
    }

    /// Compute `L` and `U`. No-op if already factorized.
    ///
    /// Fails with [`Error::Singular`] at the first pivot whose magnitude is at
    /// or below the threshold. On failure the previous factors are kept and
    /// the solver stays unfactorized.
    pub fn factorize(&mut self) -> Result<()> {
        if self.factorized {
            return Ok(());
        }

        let n = self.order();
        let source = self.source.materialize();
        let a = source.as_slice();
        let tolerance = self
            .config
            .pivot_tolerance
            .unwrap_or_else(<M::Elem as LinalgElement>::epsilon_val);
        let threshold = tolerance * max_abs(a);
        debug!(n, threshold, "lu factorize");

        let mut l = Matrix::<M::Elem>::identity(n);
        let mut u = Matrix::<M::Elem>::zeros(n, n);
        {
            let (ld, ud) = (l.as_mut_slice(), u.as_mut_slice());
            for i in 0..n {
                for j in i..n {
                    let mut sum = a[i * n + j];
                    for k in 0..i {
                        sum = sum - ld[i * n + k] * ud[k * n + j];
                    }
                    ud[i * n + j] = sum;
                }

                let pivot = ud[i * n + i];
                let magnitude = pivot.abs_val().to_f64();
                if magnitude == 0.0 || !magnitude.is_finite() || magnitude <= threshold {
                    debug!(index = i, pivot = pivot.to_f64(), threshold, "lu negligible pivot");
                    return Err(Error::Singular {
                        index: i,
                        pivot: pivot.to_f64(),
                    });
                }

                for j in (i + 1)..n {
                    let mut sum = a[j * n + i];
                    for k in 0..i {
                        sum = sum - ld[j * n + k] * ud[k * n + i];
                    }
                    ld[j * n + i] = sum / pivot;
                }
            }
        }

        self.l = l;
        self.u = u;
        self.factorized = true;
        debug!(n, "lu factorized");
        Ok(())
    }

    /// The current `(L, U)` factors.
    ///
    /// Before the first successful [`factorize`](Self::factorize) these are
    /// the identity and zero matrices; after [`reinit`](Self::reinit) to a
    /// source of the same order they are stale until factorized again.
    pub fn factors(&self) -> (&Matrix<M::Elem>, &Matrix<M::Elem>) {
        (&self.l, &self.u)
    }

    /// Solve `M · X = B` for every column of `b`, factorizing first if needed.
    ///
    /// `b` has shape `(n, k)`; a column vector is `k = 1`. Returns `X` with
    /// the same shape. Fails with [`Error::ShapeMismatch`] when `b.rows() != n`.
    pub fn solve<B>(&mut self, b: &B) -> Result<Matrix<M::Elem>>
    where
        B: MatrixView<Elem = M::Elem> + ?Sized,
    {
        let n = self.order();
        if b.rows() != n {
            return Err(Error::shape_mismatch("solve", Shape::square(n), b.shape()));
        }
        self.factorize()?;

        let k = b.cols();
        let mut x = b.eval();
        let (ld, ud) = (self.l.as_slice(), self.u.as_slice());
        let xd = x.as_mut_slice();
        for c in 0..k {
            // L · y = b, unit diagonal
            for i in 0..n {
                let mut sum = xd[i * k + c];
                for j in 0..i {
                    sum = sum - ld[i * n + j] * xd[j * k + c];
                }
                xd[i * k + c] = sum;
            }
            // U · x = y
            for i in (0..n).rev() {
                let mut sum = xd[i * k + c];
                for j in (i + 1)..n {
                    sum = sum - ud[i * n + j] * xd[j * k + c];
                }
                xd[i * k + c] = sum / ud[i * n + i];
            }
        }
        Ok(x)
    }
}

impl<M: MatrixView + ?Sized> fmt::Debug for Lu<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lu")
            .field("order", &self.source.rows())
            .field("factorized", &self.factorized)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Factorize `a` and solve `a · X = b` in one call.
pub fn lu_solve<A, B>(a: &A, b: &B) -> Result<Matrix<A::Elem>>
where
    A: MatrixView + ?Sized,
    A::Elem: LinalgElement,
    B: MatrixView<Elem = A::Elem> + ?Sized,
{
    Lu::new(a)?.solve(b)
}
