//! Integration tests for LU factorization and solve
//!
//! Tests verify:
//! - Known factors of small systems
//! - L · U round-trip on random matrices, across `reinit`
//! - Solves with one and many right-hand sides
//! - Singular and non-square inputs

mod common;

use common::{assert_allclose_f64, assert_view_close, init_test_subscriber};
use lazymat::prelude::*;

fn random_square(n: usize, seed: u64) -> Matrix<f64> {
    let config = RandnConfig::default()
        .mean(10.0)
        .stddev(100.0)
        .min_abs_value(1e-3)
        .seed(seed);
    Matrix::randn(n, n, config).unwrap()
}

#[test]
fn test_identity_factors() {
    let _guard = init_test_subscriber();
    let id = Matrix::<f64>::identity(5);
    let mut lu = Lu::new(&id).unwrap();
    lu.factorize().unwrap();
    let (l, u) = lu.factors();
    assert_eq!(l, &id);
    assert_eq!(u, &id);
}

#[test]
fn test_known_2x2_system() {
    let m = Matrix::from_array([[4.0, 3.0], [6.0, 3.0]]);
    let mut lu = Lu::new(&m).unwrap();
    lu.factorize().unwrap();

    let (l, u) = lu.factors();
    assert_view_close(l, &Matrix::from_array([[1.0, 0.0], [1.5, 1.0]]), 0.0, 1e-15, "L");
    assert_view_close(u, &Matrix::from_array([[4.0, 3.0], [0.0, -1.5]]), 0.0, 1e-15, "U");

    let x = lu.solve(&Matrix::from_array([[10.0], [12.0]])).unwrap();
    assert_allclose_f64(x.as_slice(), &[1.0, 2.0], 1e-12, 1e-12, "solve");
}

#[test]
fn test_round_trip_with_reinit() {
    let _guard = init_test_subscriber();
    let first = random_square(20, 7);
    let second = random_square(20, 8);

    let mut lu = Lu::new(&first).unwrap();
    lu.factorize().unwrap();
    let (l, u) = lu.factors();
    let back = matmul(l, u).unwrap();
    assert_view_close(&back, &first, 1e-6, 1e-6, "first round trip");

    lu.reinit(&second).unwrap();
    assert!(!lu.is_factorized());
    lu.factorize().unwrap();
    let (l, u) = lu.factors();
    let back = matmul(l, u).unwrap();
    assert_view_close(&back, &second, 1e-6, 1e-6, "second round trip");
}

#[test]
fn test_factors_are_triangular() {
    let m = random_square(8, 3);
    let mut lu = Lu::new(&m).unwrap();
    lu.factorize().unwrap();
    let (l, u) = lu.factors();
    for i in 0..8 {
        assert_eq!(l[(i, i)], 1.0);
        for j in (i + 1)..8 {
            assert_eq!(l[(i, j)], 0.0);
            assert_eq!(u[(j, i)], 0.0);
        }
    }
}

#[test]
fn test_factorize_is_idempotent() {
    let m = random_square(4, 12);
    let mut lu = Lu::new(&m).unwrap();
    lu.factorize().unwrap();
    let before = lu.factors().1.clone();
    lu.factorize().unwrap();
    assert_eq!(lu.factors().1, &before);
}

#[test]
fn test_solve_auto_factorizes() {
    let m = random_square(10, 21);
    let b = Matrix::randn(10, 1, RandnConfig::default().seed(22)).unwrap();
    let mut lu = Lu::new(&m).unwrap();
    assert!(!lu.is_factorized());
    let x = lu.solve(&b).unwrap();
    assert!(lu.is_factorized());
    assert_view_close(&matmul(&m, &x).unwrap(), &b, 1e-6, 1e-6, "residual");
}

#[test]
fn test_solve_many_columns() {
    let m = random_square(6, 30);
    let b = Matrix::randn(6, 4, RandnConfig::default().seed(31)).unwrap();
    let x = lu_solve(&m, &b).unwrap();
    assert_eq!(x.shape(), (6, 4));
    assert_view_close(&matmul(&m, &x).unwrap(), &b, 1e-6, 1e-6, "multi-column residual");

    // solving for the identity gives the inverse
    let inv = lu_solve(&m, &Matrix::identity(6)).unwrap();
    let id = matmul(&inv, &m).unwrap();
    assert_view_close(&id, &Identity::<f64>::new(6), 1e-6, 1e-6, "inverse");
}

#[test]
fn test_solve_from_lazy_sources() {
    let a = random_square(5, 40);
    let system = &a + Identity::<f64>::new(5) * 50.0;
    let rhs = Constant::new(5, 1, 1.0);
    let mut lu = Lu::new(&system).unwrap();
    let x = lu.solve(&rhs).unwrap();
    assert_view_close(&matmul(&system, &x).unwrap(), &rhs, 1e-6, 1e-6, "lazy residual");
}

#[test]
fn test_single_precision() {
    let m = Matrix::from_array([[2.0f32, 1.0], [1.0, 3.0]]);
    let x = lu_solve(&m, &Matrix::from_array([[3.0f32], [5.0]])).unwrap();
    let got: Vec<f64> = x.iter().map(f64::from).collect();
    assert_allclose_f64(&got, &[0.8, 1.4], 1e-6, 1e-6, "f32 solve");
}

#[test]
fn test_singular_matrix() {
    let _guard = init_test_subscriber();
    let m = Matrix::from_array([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]]);
    let mut lu = Lu::new(&m).unwrap();
    let err = lu.solve(&Matrix::from_array([[1.0], [2.0], [3.0]])).unwrap_err();
    assert!(matches!(err, Error::Singular { index: 1, .. }));
    assert!(!lu.is_factorized());
}

#[test]
fn test_zero_leading_minor_is_not_pivoted() {
    let m = Matrix::from_array([[0.0, 2.0], [3.0, 1.0]]);
    let err = lu_solve(&m, &Matrix::from_array([[1.0], [1.0]])).unwrap_err();
    assert!(matches!(err, Error::Singular { index: 0, .. }));
    assert!(err.to_string().contains("U[0,0]"));
}

#[test]
fn test_non_square_rejected() {
    let m = Matrix::<f64>::new(3, 2);
    assert!(matches!(
        Lu::new(&m),
        Err(Error::NonSquareMatrix { rows: 3, cols: 2 })
    ));

    let square = Matrix::<f64>::identity(3);
    let mut lu = Lu::new(&square).unwrap();
    assert!(lu.reinit(&m).is_err());
    // a rejected reinit keeps the old source
    assert_eq!(lu.order(), 3);
}
