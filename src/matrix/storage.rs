//! Owning row-major matrix storage

use super::helpers::{Constant, Identity, Zero};
use super::shape::{Shape, out_of_bounds};
use super::view::MatrixView;
use crate::dtype::Element;
use crate::error::{Error, Result};
use std::ops::{Index, IndexMut};

/// Dense matrix owning a contiguous row-major buffer
///
/// `Matrix` is the only kind that owns data. Copies are explicit
/// (`clone`, [`Matrix::from_view`]) and always deep. Moving out with
/// [`std::mem::take`] leaves the empty `(0, 0)` matrix behind.
///
/// ```
/// use lazymat::prelude::*;
///
/// let a = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
/// let b = Matrix::from_view(&(&a * 2.0 + 1.0));
/// assert_eq!(b.as_slice(), &[3.0, 5.0, 7.0, 9.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T: Element> {
    data: Vec<T>,
    shape: Shape,
}

impl<T: Element> Matrix<T> {
    /// Zero-filled matrix with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * cols],
            shape: Shape::new(rows, cols),
        }
    }

    /// The empty `(0, 0)` matrix.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            shape: Shape::default(),
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::invalid_argument(
                "data",
                format!(
                    "buffer holds {} elements, shape {}x{} needs {}",
                    data.len(),
                    rows,
                    cols,
                    rows * cols
                ),
            ));
        }
        Ok(Self {
            data,
            shape: Shape::new(rows, cols),
        })
    }

    /// Copy a row-major slice.
    pub fn from_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Build from nested rows.
    ///
    /// The first row fixes the column count; any row of a different length is
    /// rejected.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[T]>,
    {
        let mut data = Vec::new();
        let mut n_rows = 0;
        let mut n_cols = None;

        for row in rows {
            let row = row.as_ref();
            let cols = *n_cols.get_or_insert(row.len());
            if row.len() != cols {
                return Err(Error::invalid_argument(
                    "rows",
                    format!(
                        "row {} has {} elements, expected {}",
                        n_rows,
                        row.len(),
                        cols
                    ),
                ));
            }
            data.extend_from_slice(row);
            n_rows += 1;
        }

        Ok(Self {
            data,
            shape: Shape::new(n_rows, n_cols.unwrap_or(0)),
        })
    }

    /// Build from a fixed-size nested array literal.
    pub fn from_array<const R: usize, const C: usize>(rows: [[T; C]; R]) -> Self {
        Self {
            data: rows.iter().flatten().copied().collect(),
            shape: Shape::new(R, C),
        }
    }

    /// Materialize any view, reading each index once in row-major order.
    pub fn from_view<V>(source: &V) -> Self
    where
        V: MatrixView<Elem = T> + ?Sized,
    {
        Self {
            data: source.iter().collect(),
            shape: source.shape(),
        }
    }

    /// Materialize a view of another element type, converting through `f64`.
    pub fn cast_from<V>(source: &V) -> Self
    where
        V: MatrixView + ?Sized,
    {
        Self {
            data: source.iter().map(|v| T::from_f64(v.to_f64())).collect(),
            shape: source.shape(),
        }
    }

    /// Reinterpret native-endian bytes as a row-major buffer.
    ///
    /// `bytes` must hold exactly `rows * cols` elements; no alignment is required.
    pub fn from_bytes(rows: usize, cols: usize, bytes: &[u8]) -> Result<Self> {
        let elem_size = T::DTYPE.size_in_bytes();
        if bytes.len() != rows * cols * elem_size {
            return Err(Error::invalid_argument(
                "bytes",
                format!(
                    "got {} bytes, shape {}x{} of {} needs {}",
                    bytes.len(),
                    rows,
                    cols,
                    T::DTYPE,
                    rows * cols * elem_size
                ),
            ));
        }
        let data = bytes
            .chunks_exact(elem_size)
            .map(bytemuck::pod_read_unaligned::<T>)
            .collect();
        Self::from_vec(rows, cols, data)
    }

    /// Materialized zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_view(&Zero::new(rows, cols))
    }

    /// Materialized `n x n` identity.
    pub fn identity(n: usize) -> Self {
        Self::from_view(&Identity::new(n))
    }

    /// Materialized matrix with every element equal to `value`.
    pub fn constant(rows: usize, cols: usize, value: T) -> Self {
        Self::from_view(&Constant::new(rows, cols, value))
    }

    /// Row-major contents.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major contents.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Raw bytes of the buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data.as_slice())
    }

    /// Consume the matrix, returning its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Checked mutable access to `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        let index = self.shape.flat_index(row, col)?;
        Ok(&mut self.data[index])
    }

    /// Checked mutable access to a flat index.
    pub fn get_flat_mut(&mut self, index: usize) -> Result<&mut T> {
        let index = self.shape.check_flat(index)?;
        Ok(&mut self.data[index])
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> Result<&[T]> {
        if row >= self.shape.rows {
            return Err(Error::PositionOutOfBounds {
                row,
                col: 0,
                shape: self.shape,
            });
        }
        let cols = self.shape.cols;
        Ok(&self.data[row * cols..(row + 1) * cols])
    }

    /// Set every element to zero.
    pub fn zero(&mut self) -> &mut Self {
        self.set(T::zero())
    }

    /// Set every element to `value`.
    pub fn set(&mut self, value: T) -> &mut Self {
        self.data.fill(value);
        self
    }

    /// Replace every element `x` by `f(x)`, in row-major order.
    pub fn apply_inplace<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(T) -> T,
    {
        for elem in self.data.iter_mut() {
            *elem = f(*elem);
        }
        self
    }

    /// Evaluate `source` into this matrix's existing storage.
    ///
    /// The shapes must match. `source` cannot borrow `self`, so an expression
    /// reading the target cannot be assigned to it.
    pub fn assign<V>(&mut self, source: &V) -> Result<&mut Self>
    where
        V: MatrixView<Elem = T> + ?Sized,
    {
        if source.shape() != self.shape {
            return Err(Error::shape_mismatch("assign", self.shape, source.shape()));
        }
        for (index, elem) in self.data.iter_mut().enumerate() {
            *elem = source.at_flat(index);
        }
        Ok(self)
    }
}

impl<T: Element> Default for Matrix<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> MatrixView for Matrix<T> {
    type Elem = T;

    #[inline]
    fn rows(&self) -> usize {
        self.shape.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.shape.cols
    }

    #[inline]
    fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    #[track_caller]
    fn at_flat(&self, index: usize) -> T {
        match self.data.get(index) {
            Some(value) => *value,
            None => out_of_bounds(Error::IndexOutOfBounds {
                index,
                size: self.data.len(),
            }),
        }
    }

    #[inline]
    fn as_matrix(&self) -> Option<&Matrix<T>> {
        Some(self)
    }
}

impl<T: Element> Index<usize> for Matrix<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.shape.check_flat(index) {
            Ok(index) => &self.data[index],
            Err(err) => out_of_bounds(err),
        }
    }
}

impl<T: Element> IndexMut<usize> for Matrix<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.shape.check_flat(index) {
            Ok(index) => &mut self.data[index],
            Err(err) => out_of_bounds(err),
        }
    }
}

impl<T: Element> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.shape.flat_index(row, col) {
            Ok(index) => &self.data[index],
            Err(err) => out_of_bounds(err),
        }
    }
}

impl<T: Element> IndexMut<(usize, usize)> for Matrix<T> {
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        match self.shape.flat_index(row, col) {
            Ok(index) => &mut self.data[index],
            Err(err) => out_of_bounds(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zero_filled() {
        let m = Matrix::<f64>::new(3, 4);
        assert_eq!(m.shape(), Shape::new(3, 4));
        assert_eq!(m.size(), 12);
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m[(1, 0)], 4.0);

        let ragged = Matrix::from_rows(vec![vec![1, 2], vec![3]]);
        assert!(matches!(ragged, Err(Error::InvalidArgument { .. })));

        let none: Vec<Vec<f32>> = Vec::new();
        assert_eq!(Matrix::from_rows(none).unwrap().shape(), (0, 0));
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(Matrix::from_vec(2, 2, vec![1.0f32; 3]).is_err());
        assert!(Matrix::from_vec(2, 2, vec![1.0f32; 4]).is_ok());
    }

    #[test]
    fn test_index_two_ways() {
        let mut m = Matrix::<i64>::new(3, 4);
        for i in 0..3 {
            for j in 0..4 {
                m[(i, j)] = (i * 4 + j) as i64;
            }
        }
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(m[(i, j)], (i * 4 + j) as i64);
                assert_eq!(m[i * 4 + j], m[(i, j)]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_range_panics() {
        let m = Matrix::<f64>::new(2, 2);
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_checked_mutation() {
        let mut m = Matrix::<f64>::new(2, 2);
        *m.get_mut(1, 1).unwrap() = 3.0;
        *m.get_flat_mut(0).unwrap() = 1.0;
        assert_eq!(m.as_slice(), &[1.0, 0.0, 0.0, 3.0]);
        assert!(m.get_mut(2, 0).is_err());
        assert!(m.get_flat_mut(4).is_err());
    }

    #[test]
    fn test_set_zero_apply() {
        let mut m = Matrix::<f64>::new(2, 3);
        m.set(2.5);
        assert!(m.as_slice().iter().all(|&x| x == 2.5));
        m.apply_inplace(|x| x * 2.0);
        assert!(m.as_slice().iter().all(|&x| x == 5.0));
        m.zero();
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_apply_inplace_order() {
        let mut m = Matrix::<i32>::new(2, 2);
        let mut counter = 0;
        m.apply_inplace(|_| {
            counter += 1;
            counter
        });
        assert_eq!(m.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut a = Matrix::from_array([[2.6, 5.4], [8.3, 10.8]]);
        let copy = a.clone();
        let b = std::mem::take(&mut a);
        assert_eq!(a.shape(), (0, 0));
        assert_eq!(a.size(), 0);
        assert_eq!(b, copy);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = Matrix::from_array([[1, 2], [3, 4]]);
        let mut b = a.clone();
        b[(0, 0)] = 9;
        assert_eq!(a[(0, 0)], 1);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let a = Matrix::from_array([[1.5f32, -2.0], [0.25, 8.0]]);
        let bytes = a.as_bytes().to_vec();
        assert_eq!(bytes.len(), 16);
        let b = Matrix::<f32>::from_bytes(2, 2, &bytes).unwrap();
        assert_eq!(a, b);
        assert!(Matrix::<f32>::from_bytes(2, 2, &bytes[..12]).is_err());
    }

    #[test]
    fn test_cast_from_other_type() {
        let a = Matrix::from_array([[3.23, 9.34], [4.23, -9.9]]);
        let b = Matrix::<f32>::cast_from(&a);
        assert!((b[(0, 1)] - 9.34f32).abs() < 1e-6);
        let c = Matrix::<i32>::cast_from(&a);
        assert_eq!(c.as_slice(), &[3, 9, 4, -9]);
    }

    #[test]
    fn test_assign_requires_same_shape() {
        let mut target = Matrix::<f64>::new(2, 2);
        let src = Matrix::from_array([[1.0, 2.0], [3.0, 4.0]]);
        target.assign(&src).unwrap();
        assert_eq!(target, src);

        let wrong = Matrix::<f64>::new(3, 2);
        let err = target.assign(&wrong).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { op: "assign", .. }));
        // failed assignment leaves the target untouched
        assert_eq!(target, src);
    }

    #[test]
    fn test_row_slices() {
        let m = Matrix::from_array([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.row(1).unwrap(), &[4, 5, 6]);
        assert!(m.row(2).is_err());
    }

    #[test]
    fn test_factories_materialize_singletons() {
        assert_eq!(Matrix::<f64>::zeros(2, 3), Matrix::new(2, 3));
        assert_eq!(
            Matrix::<i32>::identity(3).as_slice(),
            &[1, 0, 0, 0, 1, 0, 0, 0, 1]
        );
        assert_eq!(Matrix::constant(1, 2, 29.12).as_slice(), &[29.12, 29.12]);
    }
}
