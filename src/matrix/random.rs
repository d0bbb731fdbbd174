//! Normally distributed random matrices

use super::storage::Matrix;
use crate::dtype::Element;
use crate::error::{Error, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal};

/// Upper bound on draws for a single element before giving up
const MAX_DRAWS_PER_ELEMENT: usize = 10_000;

/// Parameters of [`Matrix::randn`]
///
/// # Default
///
/// Standard normal (`mean = 0`, `stddev = 1`), no magnitude floor, and an
/// unseeded generator.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandnConfig {
    /// Mean of the distribution
    pub mean: f64,
    /// Standard deviation of the distribution
    pub stddev: f64,
    /// Values whose magnitude (after conversion to the element type) is below
    /// this are drawn again. Keeps matrices safe as divisors.
    pub min_abs_value: f64,
    /// Seed for a reproducible stream; `None` seeds from the thread RNG
    pub seed: Option<u64>,
}

impl Default for RandnConfig {
    fn default() -> Self {
        Self {
            mean: 0.0,
            stddev: 1.0,
            min_abs_value: 0.0,
            seed: None,
        }
    }
}

impl RandnConfig {
    /// Set the mean.
    pub fn mean(mut self, mean: f64) -> Self {
        self.mean = mean;
        self
    }

    /// Set the standard deviation.
    pub fn stddev(mut self, stddev: f64) -> Self {
        self.stddev = stddev;
        self
    }

    /// Set the magnitude floor.
    pub fn min_abs_value(mut self, min_abs_value: f64) -> Self {
        self.min_abs_value = min_abs_value;
        self
    }

    /// Fix the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(Error::invalid_argument("mean", "must be finite"));
        }
        if !self.stddev.is_finite() || self.stddev < 0.0 {
            return Err(Error::invalid_argument(
                "stddev",
                format!("must be finite and non-negative, got {}", self.stddev),
            ));
        }
        if !self.min_abs_value.is_finite() || self.min_abs_value < 0.0 {
            return Err(Error::invalid_argument(
                "min_abs_value",
                format!(
                    "must be finite and non-negative, got {}",
                    self.min_abs_value
                ),
            ));
        }
        Ok(())
    }
}

impl<T: Element> Matrix<T> {
    /// Matrix with elements drawn from `N(mean, stddev²)`.
    ///
    /// Samples are drawn in row-major order and converted to `T`; any value
    /// whose magnitude is below `config.min_abs_value` is drawn again.
    ///
    /// Fails if the parameters are not finite, or if a single element needs
    /// more than 10 000 draws to clear the magnitude floor.
    pub fn randn(rows: usize, cols: usize, config: RandnConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut data = Vec::with_capacity(rows * cols);
        for _ in 0..rows * cols {
            data.push(sample_element::<T>(&mut rng, &config)?);
        }
        Self::from_vec(rows, cols, data)
    }
}

fn sample_element<T: Element>(rng: &mut StdRng, config: &RandnConfig) -> Result<T> {
    for _ in 0..MAX_DRAWS_PER_ELEMENT {
        let z: f64 = StandardNormal.sample(rng);
        let value = T::from_f64(config.mean + config.stddev * z);
        if value.to_f64().abs() >= config.min_abs_value {
            return Ok(value);
        }
    }
    Err(Error::invalid_argument(
        "min_abs_value",
        format!(
            "no sample of N({}, {}²) cleared {} after {} draws",
            config.mean, config.stddev, config.min_abs_value, MAX_DRAWS_PER_ELEMENT
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixView;

    #[test]
    fn test_randn_shape() {
        let m = Matrix::<f64>::randn(4, 5, RandnConfig::default()).unwrap();
        assert_eq!(m.shape(), (4, 5));
        assert!(m.as_slice().iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_randn_seed_is_reproducible() {
        let config = RandnConfig::default().seed(42);
        let a = Matrix::<f64>::randn(3, 3, config).unwrap();
        let b = Matrix::<f64>::randn(3, 3, config).unwrap();
        let c = Matrix::<f64>::randn(3, 3, config.seed(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_randn_min_abs_value() {
        let config = RandnConfig::default().min_abs_value(0.5).seed(7);
        let m = Matrix::<f32>::randn(10, 10, config).unwrap();
        assert!(m.as_slice().iter().all(|x| x.abs() >= 0.5));
    }

    #[test]
    fn test_randn_mean_shift() {
        let config = RandnConfig::default().mean(100.0).stddev(1.0).seed(1);
        let m = Matrix::<f64>::randn(20, 20, config).unwrap();
        let mean = m.as_slice().iter().sum::<f64>() / 400.0;
        assert!((mean - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_randn_integer_elements() {
        let config = RandnConfig::default().stddev(10.0).min_abs_value(1.0).seed(3);
        let m = Matrix::<i32>::randn(5, 5, config).unwrap();
        assert!(m.as_slice().iter().all(|&x| x != 0));
    }

    #[test]
    fn test_randn_invalid_parameters() {
        let bad = RandnConfig::default().stddev(-1.0);
        assert!(Matrix::<f64>::randn(2, 2, bad).is_err());

        let bad = RandnConfig::default().mean(f64::NAN);
        assert!(Matrix::<f64>::randn(2, 2, bad).is_err());
    }

    #[test]
    fn test_randn_unreachable_floor() {
        // a degenerate distribution can never clear the floor
        let config = RandnConfig::default().stddev(0.0).min_abs_value(1.0);
        let err = Matrix::<f64>::randn(1, 1, config).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "min_abs_value", .. }));
    }
}
