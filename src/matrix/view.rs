//! The uniform read interface shared by every matrix kind

use super::shape::{Shape, out_of_bounds};
use super::storage::Matrix;
use crate::dtype::Element;
use crate::error::Result;
use crate::expr::Map;
use std::borrow::Cow;
use std::iter::FusedIterator;

/// Read access to a row-major matrix
///
/// Implemented by owning [`Matrix`] storage, by the [`Zero`](super::Zero),
/// [`Identity`](super::Identity) and [`Constant`](super::Constant) singletons,
/// and by lazy expression nodes. Generic algorithms ([`matmul`](crate::algorithm::matmul::matmul),
/// [`Lu`](crate::algorithm::linalg::Lu)) are written against this trait only.
///
/// Implementors must report a shape consistent with every element they
/// serve: `at_flat(i)` is valid exactly for `i < rows() * cols()`.
pub trait MatrixView {
    /// Scalar type of the elements
    type Elem: Element;

    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Element at row-major flat index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.size()`.
    fn at_flat(&self, index: usize) -> Self::Elem;

    /// Borrow the view as owning storage, if that is what it is.
    ///
    /// Lets algorithms skip a copy when they need materialized operands.
    fn as_matrix(&self) -> Option<&Matrix<Self::Elem>> {
        None
    }

    /// `(rows, cols)` of the view.
    #[inline]
    fn shape(&self) -> Shape {
        Shape::new(self.rows(), self.cols())
    }

    /// Number of elements.
    #[inline]
    fn size(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the shape, even when the flat
    /// index it maps to would be in range.
    #[inline]
    #[track_caller]
    fn at(&self, row: usize, col: usize) -> Self::Elem {
        match self.shape().flat_index(row, col) {
            Ok(index) => self.at_flat(index),
            Err(err) => out_of_bounds(err),
        }
    }

    /// Checked element at `(row, col)`.
    fn get(&self, row: usize, col: usize) -> Result<Self::Elem> {
        let index = self.shape().flat_index(row, col)?;
        Ok(self.at_flat(index))
    }

    /// Checked element at a flat index.
    fn get_flat(&self, index: usize) -> Result<Self::Elem> {
        let index = self.shape().check_flat(index)?;
        Ok(self.at_flat(index))
    }

    /// Lazy sequence of all elements in row-major order.
    ///
    /// Each call starts a fresh pass; elements are computed on demand.
    fn iter(&self) -> Elements<'_, Self> {
        Elements {
            view: self,
            front: 0,
            back: self.size(),
        }
    }

    /// Materialize into owning storage, reading every index once.
    fn eval(&self) -> Matrix<Self::Elem> {
        Matrix::from_view(self)
    }

    /// Borrow owning storage as is, or materialize any other view.
    fn materialize(&self) -> Cow<'_, Matrix<Self::Elem>> {
        match self.as_matrix() {
            Some(matrix) => Cow::Borrowed(matrix),
            None => Cow::Owned(self.eval()),
        }
    }

    /// All elements in row-major order.
    fn to_vec(&self) -> Vec<Self::Elem> {
        self.iter().collect()
    }

    /// Lazy node applying `f` to every element of this view.
    fn map<F, U>(&self, f: F) -> Map<&Self, F>
    where
        F: Fn(Self::Elem) -> U,
        U: Element,
    {
        Map::new(self, f)
    }
}

impl<V: MatrixView + ?Sized> MatrixView for &V {
    type Elem = V::Elem;

    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }

    #[inline]
    fn at_flat(&self, index: usize) -> Self::Elem {
        (**self).at_flat(index)
    }

    #[inline]
    fn as_matrix(&self) -> Option<&Matrix<Self::Elem>> {
        (**self).as_matrix()
    }
}

/// Restartable lazy sequence over the elements of a view
///
/// Returned by [`MatrixView::iter`]. Values are produced by reading the view
/// at increasing flat indices, so iterating an expression evaluates it one
/// element at a time without intermediate storage.
pub struct Elements<'a, V: ?Sized> {
    view: &'a V,
    front: usize,
    back: usize,
}

impl<V: ?Sized> Clone for Elements<'_, V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view,
            front: self.front,
            back: self.back,
        }
    }
}

impl<V: MatrixView + ?Sized> Iterator for Elements<'_, V> {
    type Item = V::Elem;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let value = self.view.at_flat(self.front);
            self.front += 1;
            Some(value)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<V: MatrixView + ?Sized> DoubleEndedIterator for Elements<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.view.at_flat(self.back))
        } else {
            None
        }
    }
}

impl<V: MatrixView + ?Sized> ExactSizeIterator for Elements<'_, V> {}

impl<V: MatrixView + ?Sized> FusedIterator for Elements<'_, V> {}
