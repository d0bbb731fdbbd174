//! Lazy expression nodes
//!
//! A node stores its operands and computes element `i` on demand, so
//! `&a + &b * 2.0` builds a small tree and touches no matrix data until it is
//! read or evaluated. Nodes are move-only: composing an expression moves the
//! subtree into its parent.

use super::arithmetic::BinaryOp;
use super::operand::{Operand, common_shape};
use crate::dtype::{Element, Promote, Promoted};
use crate::error::Result;
use crate::matrix::{MatrixView, Shape};
use std::fmt;
use std::marker::PhantomData;

/// Elementwise binary operation over two operands
///
/// At least one operand is a matrix; a scalar operand broadcasts. Both sides
/// are promoted to [`Promoted<L::Elem, R::Elem>`] before `Op` is applied.
pub struct Binary<Op, L, R> {
    lhs: L,
    rhs: R,
    shape: Shape,
    _op: PhantomData<Op>,
}

impl<Op, L, R> Binary<Op, L, R>
where
    Op: BinaryOp,
    L: Operand,
    R: Operand,
    L::Elem: Promote<R::Elem>,
{
    /// Build the node, checking that matrix operands agree in shape.
    pub fn new(lhs: L, rhs: R) -> Result<Self> {
        let shape = common_shape(Op::KIND.name(), lhs.operand_shape(), rhs.operand_shape())?;
        Ok(Self {
            lhs,
            rhs,
            shape,
            _op: PhantomData,
        })
    }

    /// Left operand.
    pub fn lhs(&self) -> &L {
        &self.lhs
    }

    /// Right operand.
    pub fn rhs(&self) -> &R {
        &self.rhs
    }
}

impl<Op, L, R> MatrixView for Binary<Op, L, R>
where
    Op: BinaryOp,
    L: Operand,
    R: Operand,
    L::Elem: Promote<R::Elem>,
{
    type Elem = Promoted<L::Elem, R::Elem>;

    #[inline]
    fn rows(&self) -> usize {
        self.shape.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.shape.cols
    }

    #[inline]
    #[track_caller]
    fn at_flat(&self, index: usize) -> Self::Elem {
        let l = <L::Elem as Promote<R::Elem>>::promote_lhs(self.lhs.value_at(index));
        let r = <L::Elem as Promote<R::Elem>>::promote_rhs(self.rhs.value_at(index));
        Op::apply(l, r)
    }
}

impl<Op, L, R> Operand for Binary<Op, L, R>
where
    Op: BinaryOp,
    L: Operand,
    R: Operand,
    L::Elem: Promote<R::Elem>,
{
    type Elem = Promoted<L::Elem, R::Elem>;

    #[inline]
    fn operand_shape(&self) -> Option<Shape> {
        Some(self.shape)
    }

    #[inline]
    fn value_at(&self, index: usize) -> Self::Elem {
        self.at_flat(index)
    }
}

impl<Op: BinaryOp, L, R> fmt::Debug for Binary<Op, L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binary")
            .field("op", &Op::KIND)
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Elementwise unary function applied to a view
///
/// Built by [`MatrixView::map`]. The function may change the element type.
pub struct Map<S, F> {
    source: S,
    f: F,
}

impl<S, F> Map<S, F> {
    /// Wrap `source` so that every element read passes through `f`.
    pub fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

impl<S, F, U> MatrixView for Map<S, F>
where
    S: MatrixView,
    F: Fn(S::Elem) -> U,
    U: Element,
{
    type Elem = U;

    #[inline]
    fn rows(&self) -> usize {
        self.source.rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        self.source.cols()
    }

    #[inline]
    #[track_caller]
    fn at_flat(&self, index: usize) -> U {
        (self.f)(self.source.at_flat(index))
    }
}

impl<S, F, U> Operand for Map<S, F>
where
    S: MatrixView,
    F: Fn(S::Elem) -> U,
    U: Element,
{
    type Elem = U;

    #[inline]
    fn operand_shape(&self) -> Option<Shape> {
        Some(self.shape())
    }

    #[inline]
    fn value_at(&self, index: usize) -> U {
        self.at_flat(index)
    }
}

impl<S: MatrixView, F> fmt::Debug for Map<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("shape", &self.source.shape())
            .finish_non_exhaustive()
    }
}

/// Elementwise binary function over two operands
///
/// The general form of [`Binary`]: operands keep their own element types and
/// `f` decides the result type. Built by [`zip_with`](super::zip_with).
pub struct ZipWith<L, R, F> {
    lhs: L,
    rhs: R,
    f: F,
    shape: Shape,
}

impl<L: Operand, R: Operand, F> ZipWith<L, R, F> {
    pub(crate) fn new(lhs: L, rhs: R, f: F) -> Result<Self> {
        let shape = common_shape("zip_with", lhs.operand_shape(), rhs.operand_shape())?;
        Ok(Self { lhs, rhs, f, shape })
    }
}

impl<L, R, F, U> MatrixView for ZipWith<L, R, F>
where
    L: Operand,
    R: Operand,
    F: Fn(L::Elem, R::Elem) -> U,
    U: Element,
{
    type Elem = U;

    #[inline]
    fn rows(&self) -> usize {
        self.shape.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.shape.cols
    }

    #[inline]
    #[track_caller]
    fn at_flat(&self, index: usize) -> U {
        (self.f)(self.lhs.value_at(index), self.rhs.value_at(index))
    }
}

impl<L, R, F, U> Operand for ZipWith<L, R, F>
where
    L: Operand,
    R: Operand,
    F: Fn(L::Elem, R::Elem) -> U,
    U: Element,
{
    type Elem = U;

    #[inline]
    fn operand_shape(&self) -> Option<Shape> {
        Some(self.shape)
    }

    #[inline]
    fn value_at(&self, index: usize) -> U {
        self.at_flat(index)
    }
}

impl<L, R, F> fmt::Debug for ZipWith<L, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZipWith")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}
