//! Operands of lazy expression nodes

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::matrix::{Constant, Identity, MatrixView, Shape, Zero};

/// Anything that can feed an expression node: a matrix-like view or a scalar
///
/// Matrix operands report their shape and are read at the node's flat index.
/// Scalars report no shape and broadcast the same value to every index.
///
/// Owning storage participates by reference (`&Matrix<T>`), so a node never
/// copies a buffer and cannot outlive the matrices it reads. Singletons and
/// other expression nodes are taken by value; singletons are `Copy` and
/// nodes are moved into their parent.
pub trait Operand {
    /// Scalar type produced at every index
    type Elem: Element;

    /// Shape of a matrix operand, `None` for a broadcast scalar.
    fn operand_shape(&self) -> Option<Shape>;

    /// Value at row-major flat index `index`.
    fn value_at(&self, index: usize) -> Self::Elem;
}

impl<V: MatrixView + ?Sized> Operand for &V {
    type Elem = V::Elem;

    #[inline]
    fn operand_shape(&self) -> Option<Shape> {
        Some((**self).shape())
    }

    #[inline]
    fn value_at(&self, index: usize) -> Self::Elem {
        (**self).at_flat(index)
    }
}

macro_rules! impl_view_operand {
    ($($ty:ident),*) => {
        $(
            impl<T: Element> Operand for $ty<T> {
                type Elem = T;

                #[inline]
                fn operand_shape(&self) -> Option<Shape> {
                    Some(self.shape())
                }

                #[inline]
                fn value_at(&self, index: usize) -> T {
                    self.at_flat(index)
                }
            }
        )*
    };
}

impl_view_operand!(Zero, Identity, Constant);

macro_rules! impl_scalar_operand {
    ($($ty:ty),*) => {
        $(
            impl Operand for $ty {
                type Elem = $ty;

                #[inline]
                fn operand_shape(&self) -> Option<Shape> {
                    None
                }

                #[inline]
                fn value_at(&self, _index: usize) -> $ty {
                    *self
                }
            }
        )*
    };
}

impl_scalar_operand!(f64, f32, i64, i32);

/// Shape of a node built from two operands.
///
/// Matrix operands must agree; a scalar takes the shape of the other side.
pub(crate) fn common_shape(op: &'static str, lhs: Option<Shape>, rhs: Option<Shape>) -> Result<Shape> {
    match (lhs, rhs) {
        (Some(l), Some(r)) if l == r => Ok(l),
        (Some(l), Some(r)) => Err(Error::shape_mismatch(op, l, r)),
        (Some(shape), None) | (None, Some(shape)) => Ok(shape),
        (None, None) => Err(Error::invalid_argument(
            "operands",
            format!("{op} needs at least one matrix operand"),
        )),
    }
}
