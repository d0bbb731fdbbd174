//! Dense matrix product
//!
//! The canonical triple loop: every output cell is seeded with its `k = 0`
//! term and the remaining terms are accumulated in order, so no zero value is
//! assumed of the element type.
//!
//! ```text
//! C[i, j] = A[i, 0] * B[0, j] + A[i, 1] * B[1, j] + ... + A[i, K-1] * B[K-1, j]
//! ```
//!
//! # Evaluation mode
//!
//! Operands are any [`MatrixView`], including lazy expressions. Read directly
//! ([`EvalMode::Lazy`]), an expression operand is recomputed for every output
//! cell that touches it: `n` times per element of `A`, `m` times per element of
//! `B`. [`EvalMode::PreEvaluate`] materializes every operand that is not
//! already owning storage before the loop, trading one temporary per operand
//! for that recomputation. Prefer it whenever an operand is a multi-term
//! expression. Both modes produce the same values.

use crate::dtype::{Promote, Promoted};
use crate::error::{Error, Result};
use crate::matrix::{Matrix, MatrixView};
use tracing::{debug, trace};

/// How [`matmul_with`] reads its operands
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Read operands in place
    #[default]
    Lazy,
    /// Materialize non-storage operands first
    PreEvaluate,
}

/// `a · b`, reading operands in place.
///
/// Fails with [`Error::ShapeMismatch`] unless `a.cols() == b.rows()`.
///
/// # Example
///
/// ```
/// use lazymat::prelude::*;
///
/// let a = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
/// let b = Matrix::from_array([[5.0], [6.0]]);
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.as_slice(), &[17.0, 39.0]);
/// ```
pub fn matmul<A, B>(a: &A, b: &B) -> Result<Matrix<Promoted<A::Elem, B::Elem>>>
where
    A: MatrixView + ?Sized,
    B: MatrixView + ?Sized,
    A::Elem: Promote<B::Elem>,
{
    matmul_with(a, b, EvalMode::Lazy)
}

/// `a · b` with an explicit [`EvalMode`].
pub fn matmul_with<A, B>(a: &A, b: &B, mode: EvalMode) -> Result<Matrix<Promoted<A::Elem, B::Elem>>>
where
    A: MatrixView + ?Sized,
    B: MatrixView + ?Sized,
    A::Elem: Promote<B::Elem>,
{
    if a.cols() != b.rows() {
        return Err(Error::shape_mismatch("matmul", a.shape(), b.shape()));
    }

    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    debug!(m, k, n, ?mode, "matmul");

    let out = match mode {
        EvalMode::Lazy => product(a, b),
        EvalMode::PreEvaluate => {
            let a = a.materialize();
            let b = b.materialize();
            product(&*a, &*b)
        }
    };
    Ok(out)
}

/// Right-fold product of two or more operands of one type:
/// `[A, B, C]` computes `A · (B · C)`.
///
/// Fails with [`Error::InvalidArgument`] for fewer than two operands, or with
/// the first [`Error::ShapeMismatch`] met while folding from the right.
pub fn matmul_chain<V>(operands: &[V], mode: EvalMode) -> Result<Matrix<V::Elem>>
where
    V: MatrixView,
    V::Elem: Promote<V::Elem, Output = V::Elem>,
{
    let [init @ .., penultimate, last] = operands else {
        return Err(Error::invalid_argument(
            "operands",
            format!("a chain product needs at least 2 operands, got {}", operands.len()),
        ));
    };

    let mut acc = matmul_with(penultimate, last, mode)?;
    for (step, operand) in init.iter().enumerate().rev() {
        trace!(step, rows = operand.rows(), cols = operand.cols(), "matmul chain step");
        acc = matmul_with(operand, &acc, mode)?;
    }
    Ok(acc)
}

/// Product of two or more operands of possibly different kinds and types.
///
/// Right-folds like [`matmul_chain`], so `matmul!(a, b, c)` is
/// `matmul(&a, &matmul(&b, &c)?)`. Operands are borrowed. Prefix the list
/// with `@mode <EvalMode>;` to choose the evaluation mode.
///
/// Evaluates to a [`Result`](crate::error::Result).
///
/// ```
/// use lazymat::prelude::*;
///
/// let a = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
/// let id = Identity::<f64>::new(2);
///
/// let c = lazymat::matmul!(a, id, &a * 2.0).unwrap();
/// let d = lazymat::matmul!(@mode EvalMode::PreEvaluate; a, id, &a * 2.0).unwrap();
/// assert_eq!(c, d);
/// assert_eq!(c.as_slice(), &[14.0, 20.0, 30.0, 44.0]);
/// ```
#[macro_export]
macro_rules! matmul {
    (@mode $mode:expr; $a:expr, $b:expr $(,)?) => {
        $crate::algorithm::matmul::matmul_with(&$a, &$b, $mode)
    };
    (@mode $mode:expr; $a:expr, $($rest:expr),+ $(,)?) => {
        $crate::matmul!(@mode $mode; $($rest),+)
            .and_then(|rest| $crate::algorithm::matmul::matmul_with(&$a, &rest, $mode))
    };
    ($($operand:expr),+ $(,)?) => {
        $crate::matmul!(@mode $crate::algorithm::matmul::EvalMode::Lazy; $($operand),+)
    };
}

fn product<A, B>(a: &A, b: &B) -> Matrix<Promoted<A::Elem, B::Elem>>
where
    A: MatrixView + ?Sized,
    B: MatrixView + ?Sized,
    A::Elem: Promote<B::Elem>,
{
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    let mut out = Matrix::new(m, n);
    if k == 0 {
        return out;
    }

    let term = |x: A::Elem, y: B::Elem| {
        <A::Elem as Promote<B::Elem>>::promote_lhs(x) * <A::Elem as Promote<B::Elem>>::promote_rhs(y)
    };

    let data = out.as_mut_slice();
    for i in 0..m {
        let row = i * k;
        for j in 0..n {
            let mut acc = term(a.at_flat(row), b.at_flat(j));
            for p in 1..k {
                acc = acc + term(a.at_flat(row + p), b.at_flat(p * n + j));
            }
            data[i * n + j] = acc;
        }
    }
    out
}
