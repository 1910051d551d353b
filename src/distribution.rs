//! Continuous probability distributions used by spark generators.
//!
//! Samplers take the random source as an argument, so a whole run draws
//! from one seeded stream.

use rand::distr::{Distribution, Uniform};
use rand::Rng;

use crate::error::{FwaError, Result};

/// A continuous distribution over `f64`.
pub trait ContinuousDistribution {
    /// Draws one value.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Lazy, infinite stream of draws.
    fn samples<'a, R: Rng + ?Sized>(&'a self, rng: &'a mut R) -> impl Iterator<Item = f64> + 'a
    where
        Self: Sized,
    {
        std::iter::repeat_with(move || self.sample(rng))
    }
}

/// Uniform distribution on `[low, high)`.
#[derive(Debug, Clone, Copy)]
pub struct ContinuousUniform {
    low: f64,
    high: f64,
    inner: Uniform<f64>,
}

impl ContinuousUniform {
    /// Fails with [`FwaError::InvalidArgument`] unless `low < high` and both are finite.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !(low.is_finite() && high.is_finite()) || low >= high {
            return Err(FwaError::invalid(
                "high",
                format!("uniform bounds must be finite with low < high, got [{low}, {high})"),
            ));
        }
        let inner = Uniform::new(low, high).map_err(|e| FwaError::invalid("high", e.to_string()))?;
        Ok(Self { low, high, inner })
    }

    /// Uniform on `[center - delta, center + delta)`.
    pub fn around(center: f64, delta: f64) -> Result<Self> {
        if !(delta > 0.0) {
            return Err(FwaError::out_of_range(
                "delta",
                format!("must be positive, got {delta}"),
            ));
        }
        Self::new(center - delta, center + delta)
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }
}

impl ContinuousDistribution for ContinuousUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inner.sample(rng)
    }
}

/// Normal (Gaussian) distribution.
#[derive(Debug, Clone, Copy)]
pub struct Normal {
    inner: rand_distr::Normal<f64>,
}

impl Normal {
    /// Fails with [`FwaError::InvalidArgument`] if `mean` is not finite and
    /// with [`FwaError::OutOfRange`] if `std_dev` is negative or not finite.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(FwaError::invalid("mean", "must be finite"));
        }
        if !(std_dev >= 0.0 && std_dev.is_finite()) {
            return Err(FwaError::out_of_range(
                "std_dev",
                format!("must be finite and non-negative, got {std_dev}"),
            ));
        }
        let inner = rand_distr::Normal::new(mean, std_dev)
            .map_err(|e| FwaError::invalid("std_dev", e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn mean(&self) -> f64 {
        self.inner.mean()
    }

    pub fn std_dev(&self) -> f64 {
        self.inner.std_dev()
    }
}

impl ContinuousDistribution for Normal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.inner.sample(rng)
    }
}
