//! Elementwise arithmetic: operator kinds, `std::ops` impls and fallible builders
//!
//! The overloaded operators build a [`Binary`] node and panic if the two
//! matrix operands disagree in shape, the way indexing panics out of range.
//! [`add`], [`sub`], [`mul`] and [`div`] build the same nodes but return the
//! mismatch as an [`Error`](crate::error::Error).
//!
//! Owning storage takes part by reference: `&a + &b`, `&a * 2.0`, `1.0 - &a`.
//! Singletons and expression nodes take part by value.
//!
//! On the right a scalar of any element type works. On the left only `f64`
//! and `i32` are accepted, so that a bare literal such as `2.0 * &a` has a
//! single candidate type; the result still follows the promotion table.

use super::node::{Binary, Map, ZipWith};
use super::operand::Operand;
use crate::dtype::{Element, Promote};
use crate::error::Result;
use crate::matrix::{Constant, Identity, Matrix, Zero};

/// Elementwise binary operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOpKind {
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Division: a / b
    Div,
}

impl BinaryOpKind {
    /// Lowercase name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }
}

/// A binary operation known at compile time
///
/// Implemented by the zero-sized [`AddOp`], [`SubOp`], [`MulOp`] and
/// [`DivOp`] markers that parameterize [`Binary`].
pub trait BinaryOp {
    /// Runtime tag of the operation
    const KIND: BinaryOpKind;

    /// Apply the operation to two already-promoted values.
    fn apply<T: Element>(lhs: T, rhs: T) -> T;
}

macro_rules! define_op {
    ($name:ident, $kind:ident, $doc:literal, |$l:ident, $r:ident| $body:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl BinaryOp for $name {
            const KIND: BinaryOpKind = BinaryOpKind::$kind;

            #[inline]
            #[track_caller]
            fn apply<T: Element>($l: T, $r: T) -> T {
                $body
            }
        }
    };
}

define_op!(AddOp, Add, "Elementwise addition", |l, r| l + r);
define_op!(SubOp, Sub, "Elementwise subtraction", |l, r| l - r);
define_op!(MulOp, Mul, "Elementwise multiplication", |l, r| l * r);
define_op!(DivOp, Div, "Elementwise division (integer division truncates and panics on zero)", |l, r| l / r);

/// Lazy `lhs + rhs`.
pub fn add<L, R>(lhs: L, rhs: R) -> Result<Binary<AddOp, L, R>>
where
    L: Operand,
    R: Operand,
    L::Elem: Promote<R::Elem>,
{
    Binary::new(lhs, rhs)
}

/// Lazy `lhs - rhs`.
pub fn sub<L, R>(lhs: L, rhs: R) -> Result<Binary<SubOp, L, R>>
where
    L: Operand,
    R: Operand,
    L::Elem: Promote<R::Elem>,
{
    Binary::new(lhs, rhs)
}

/// Lazy elementwise `lhs * rhs`. See [`matmul`](crate::algorithm::matmul::matmul)
/// for the matrix product.
pub fn mul<L, R>(lhs: L, rhs: R) -> Result<Binary<MulOp, L, R>>
where
    L: Operand,
    R: Operand,
    L::Elem: Promote<R::Elem>,
{
    Binary::new(lhs, rhs)
}

/// Lazy elementwise `lhs / rhs`.
pub fn div<L, R>(lhs: L, rhs: R) -> Result<Binary<DivOp, L, R>>
where
    L: Operand,
    R: Operand,
    L::Elem: Promote<R::Elem>,
{
    Binary::new(lhs, rhs)
}

/// Lazy `f(lhs[i], rhs[i])` for every flat index.
///
/// Unlike the arithmetic builders, operands keep their own element types and
/// `f` picks the result type.
///
/// # Example
///
/// ```
/// use lazymat::prelude::*;
///
/// let a = Matrix::from_array([[1.0, 5.0]]);
/// let b = Matrix::from_array([[3.0, 2.0]]);
/// let max = zip_with(&a, &b, |x: f64, y: f64| x.max(y)).unwrap();
/// assert_eq!(max.to_vec(), vec![3.0, 5.0]);
/// ```
pub fn zip_with<L, R, F, U>(lhs: L, rhs: R, f: F) -> Result<ZipWith<L, R, F>>
where
    L: Operand,
    R: Operand,
    F: Fn(L::Elem, R::Elem) -> U,
    U: Element,
{
    ZipWith::new(lhs, rhs, f)
}

#[track_caller]
fn build<Op, L, R>(lhs: L, rhs: R) -> Binary<Op, L, R>
where
    Op: BinaryOp,
    L: Operand,
    R: Operand,
    L::Elem: Promote<R::Elem>,
{
    match Binary::new(lhs, rhs) {
        Ok(node) => node,
        Err(err) => panic!("{err}"),
    }
}

// `$lhs op Rhs` for any operand `Rhs`
macro_rules! impl_lhs_operator {
    ($trait:ident, $method:ident, $op:ty, [$($gen:tt)*] $lhs:ty) => {
        impl<$($gen)*, Rhs> std::ops::$trait<Rhs> for $lhs
        where
            $lhs: Operand,
            Rhs: Operand,
            <$lhs as Operand>::Elem: Promote<Rhs::Elem>,
        {
            type Output = Binary<$op, $lhs, Rhs>;

            #[track_caller]
            fn $method(self, rhs: Rhs) -> Self::Output {
                build(self, rhs)
            }
        }
    };
}

// `scalar op $rhs`; one impl per scalar type, kept to the literal defaults
macro_rules! impl_scalar_lhs_operator {
    ($trait:ident, $method:ident, $op:ty, $scalar:ty, [$($gen:tt)*] $rhs:ty) => {
        impl<$($gen)*> std::ops::$trait<$rhs> for $scalar
        where
            $rhs: Operand,
            $scalar: Promote< <$rhs as Operand>::Elem >,
        {
            type Output = Binary<$op, $scalar, $rhs>;

            #[track_caller]
            fn $method(self, rhs: $rhs) -> Self::Output {
                build(self, rhs)
            }
        }
    };
}

macro_rules! impl_scalar_lhs_operators {
    ($scalar:ty, $gens:tt $rhs:ty) => {
        impl_scalar_lhs_operator!(Add, add, AddOp, $scalar, $gens $rhs);
        impl_scalar_lhs_operator!(Sub, sub, SubOp, $scalar, $gens $rhs);
        impl_scalar_lhs_operator!(Mul, mul, MulOp, $scalar, $gens $rhs);
        impl_scalar_lhs_operator!(Div, div, DivOp, $scalar, $gens $rhs);
    };
}

macro_rules! impl_operators {
    ($($gens:tt $ty:ty;)*) => {
        $(
            impl_lhs_operator!(Add, add, AddOp, $gens $ty);
            impl_lhs_operator!(Sub, sub, SubOp, $gens $ty);
            impl_lhs_operator!(Mul, mul, MulOp, $gens $ty);
            impl_lhs_operator!(Div, div, DivOp, $gens $ty);

            impl_scalar_lhs_operators!(f64, $gens $ty);
            impl_scalar_lhs_operators!(i32, $gens $ty);
        )*
    };
}

impl_operators! {
    ['a, T: Element] &'a Matrix<T>;
    [T: Element] Zero<T>;
    [T: Element] Identity<T>;
    [T: Element] Constant<T>;
    ['a, T: Element] &'a Zero<T>;
    ['a, T: Element] &'a Identity<T>;
    ['a, T: Element] &'a Constant<T>;
    [Op, L, R] Binary<Op, L, R>;
    ['a, Op, L, R] &'a Binary<Op, L, R>;
    [S, F] Map<S, F>;
    ['a, S, F] &'a Map<S, F>;
    [L, R, F] ZipWith<L, R, F>;
    ['a, L, R, F] &'a ZipWith<L, R, F>;
}
