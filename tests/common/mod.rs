//! Common test utilities
#![allow(dead_code)]

use lazymat::prelude::*;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Install a thread-local subscriber for one test.
///
/// Respects `RUST_LOG`; defaults to `info`. Output goes through the test
/// writer, so it is captured unless the test fails.
pub fn init_test_subscriber() -> tracing::subscriber::DefaultGuard {
    let fmt_layer = fmt::layer().with_target(true).with_test_writer();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .set_default()
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two views match element for element within tolerance
pub fn assert_view_close<A, B>(a: &A, b: &B, rtol: f64, atol: f64, msg: &str)
where
    A: MatrixView + ?Sized,
    B: MatrixView + ?Sized,
{
    assert_eq!(a.shape(), b.shape(), "{}: shape mismatch", msg);
    let a: Vec<f64> = a.iter().map(|x| x.to_f64()).collect();
    let b: Vec<f64> = b.iter().map(|x| x.to_f64()).collect();
    assert_allclose_f64(&a, &b, rtol, atol, msg);
}

/// Seeded normal matrix for reproducible tests
pub fn seeded_randn(rows: usize, cols: usize, seed: u64) -> Matrix<f64> {
    Matrix::randn(rows, cols, RandnConfig::default().seed(seed)).unwrap()
}
