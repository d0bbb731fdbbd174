//! Lazily evaluated elementwise expressions
//!
//! Arithmetic on matrix views does not compute anything. It builds a tree of
//! nodes that reads its operands on demand:
//!
//! ```
//! use lazymat::prelude::*;
//!
//! let a = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
//! let b = Matrix::from_array([[4.0, 3.0], [2.0, 1.0]]);
//!
//! let expr = (&a + &b) * 0.5;
//! assert_eq!(expr.at(0, 1), 2.5);
//!
//! let c = expr.eval();
//! assert_eq!(c.as_slice(), &[2.5, 2.5, 2.5, 2.5]);
//! ```
//!
//! Every node implements [`MatrixView`](crate::matrix::MatrixView), so it can
//! be indexed, iterated, compared, multiplied, or materialized with `eval()`.
//! Reads are not cached: a node read `m` times recomputes its subtree `m`
//! times. Materialize first when an expression is consumed repeatedly.

mod arithmetic;
mod node;
mod operand;

pub use arithmetic::{
    AddOp, BinaryOp, BinaryOpKind, DivOp, MulOp, SubOp, add, div, mul, sub, zip_with,
};
pub use node::{Binary, Map, ZipWith};
pub use operand::Operand;
