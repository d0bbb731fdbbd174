//! # lazymat
//!
//! **Dense matrices with lazily evaluated elementwise expressions.**
//!
//! lazymat provides row-major dense matrices, allocation-free zero, identity
//! and constant views, elementwise arithmetic that builds expression trees
//! instead of temporaries, a dense product with optional pre-evaluation of
//! composite operands, and LU factorization with triangular solves.
//!
//! ## Features
//!
//! - **Storage**: [`Matrix<T>`](matrix::Matrix) over `f64`, `f32`, `i64`, `i32`
//! - **Views**: anything implementing [`MatrixView`](matrix::MatrixView) can be
//!   indexed, iterated, compared, multiplied and materialized
//! - **Lazy expressions**: `+ - * /` between views and scalars, with
//!   scalar-type promotion (`i32` and `f32` give `f32`, and so on)
//! - **Products**: [`matmul`](algorithm::matmul::matmul), chains and the
//!   [`matmul!`] macro
//! - **LU**: [`Lu`](algorithm::linalg::Lu) without pivoting, multi-column solve
//!
//! ## Quick Start
//!
//! ```rust
//! use lazymat::prelude::*;
//!
//! let a = Matrix::from_array([[4.0, 3.0], [6.0, 3.0]]);
//! let b = Matrix::from_array([[1.0, 0.0], [0.0, 1.0]]);
//!
//! // nothing is computed until `eval`
//! let c = (&a + &b * 2.0).eval();
//! assert_eq!(c.as_slice(), &[6.0, 3.0, 6.0, 5.0]);
//!
//! let d = matmul(&a, &Identity::<f64>::new(2))?;
//! assert_eq!(d, a);
//!
//! let x = lu_solve(&a, &Matrix::from_array([[10.0], [12.0]]))?;
//! assert!(approx_equal(&x, &Matrix::from_array([[1.0], [2.0]]), 1e-12, 1e-12));
//! # Ok::<(), lazymat::error::Error>(())
//! ```
//!
//! ## Logging
//!
//! Products and factorizations emit `tracing` events at `debug` level.
//! Install any subscriber to see them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod dtype;
pub mod error;
pub mod expr;
pub mod matrix;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::linalg::{Lu, LuConfig, lu_solve};
    pub use crate::algorithm::matmul::{EvalMode, matmul, matmul_chain, matmul_with};
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::expr::{Operand, zip_with};
    pub use crate::matrix::{
        Constant, Identity, Matrix, MatrixView, RandnConfig, Shape, Tolerance, Zero,
        approx_equal, approx_equal_with,
    };
}
