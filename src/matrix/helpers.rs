//! Zero, identity and constant singleton views
//!
//! These stand in for trivial matrices without allocating: each holds only
//! its dimensions (and value), is `Copy`, and computes elements on read.
//! They can be used anywhere a [`MatrixView`] is accepted, including as
//! operands of lazy expressions and products.

use super::shape::{Shape, out_of_bounds};
use super::view::MatrixView;
use crate::dtype::Element;
use std::marker::PhantomData;

#[inline]
#[track_caller]
fn check_index(shape: Shape, index: usize) {
    if let Err(err) = shape.check_flat(index) {
        out_of_bounds(err)
    }
}

/// All-zero `rows x cols` view
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Zero<T> {
    rows: usize,
    cols: usize,
    _elem: PhantomData<T>,
}

impl<T: Element> Zero<T> {
    /// Zero view of the given shape.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            _elem: PhantomData,
        }
    }
}

impl<T> Clone for Zero<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Zero<T> {}

impl<T: Element> MatrixView for Zero<T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[track_caller]
    fn at_flat(&self, index: usize) -> T {
        check_index(self.shape(), index);
        T::zero()
    }
}

/// `n x n` identity view: one on the diagonal, zero elsewhere
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Identity<T> {
    n: usize,
    _elem: PhantomData<T>,
}

impl<T: Element> Identity<T> {
    /// Identity view of order `n`.
    pub const fn new(n: usize) -> Self {
        Self {
            n,
            _elem: PhantomData,
        }
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Identity<T> {}

impl<T: Element> MatrixView for Identity<T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.n
    }

    #[inline]
    fn cols(&self) -> usize {
        self.n
    }

    #[inline]
    #[track_caller]
    fn at_flat(&self, index: usize) -> T {
        check_index(self.shape(), index);
        // diagonal entries sit every n + 1 elements
        if index % (self.n + 1) == 0 {
            T::one()
        } else {
            T::zero()
        }
    }
}

/// `rows x cols` view with every element equal to one value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant<T> {
    rows: usize,
    cols: usize,
    value: T,
}

impl<T: Element> Constant<T> {
    /// Constant view of the given shape.
    pub const fn new(rows: usize, cols: usize, value: T) -> Self {
        Self { rows, cols, value }
    }

    /// The repeated value.
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Element> MatrixView for Constant<T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    #[track_caller]
    fn at_flat(&self, index: usize) -> T {
        check_index(self.shape(), index);
        self.value
    }
}
