//! Numerical algorithms written against [`MatrixView`](crate::matrix::MatrixView)
//!
//! - [`matmul`](mod@matmul): dense product, chain product and evaluation modes
//! - [`linalg`]: LU factorization and linear solves

pub mod linalg;
pub mod matmul;
