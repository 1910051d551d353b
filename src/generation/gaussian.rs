//! Gaussian sparks (2010 paper).

use rand::Rng;

use super::{coin_flip, require_dimensions, require_epicenter, SparkGenerator};
use crate::distribution::{ContinuousDistribution, Normal};
use crate::error::Result;
use crate::model::{Dimension, Explosion, Firework, FireworkType};

/// Scales randomly chosen coordinates of the epicenter by one shared
/// Gaussian factor `g ~ N(1, 1)`, keeping population diversity.
///
/// # Algorithm (Tan & Zhu, 2010, Algorithm 2)
///
/// 1. Copy the epicenter's coordinates
/// 2. Draw `g` from the distribution
/// 3. For each dimension, with probability 1/2, multiply by `g`
/// 4. Wrap coordinates that left the variation range
#[derive(Debug, Clone)]
pub struct GaussianSparkGenerator<'a, D = Normal> {
    dimensions: &'a [Dimension],
    distribution: D,
}

impl<'a> GaussianSparkGenerator<'a, Normal> {
    /// Generator with the paper's `N(1, 1)` factor.
    pub fn new(dimensions: &'a [Dimension]) -> Result<Self> {
        Self::with_distribution(dimensions, Normal::new(1.0, 1.0)?)
    }
}

impl<'a, D: ContinuousDistribution> GaussianSparkGenerator<'a, D> {
    pub fn with_distribution(dimensions: &'a [Dimension], distribution: D) -> Result<Self> {
        require_dimensions(dimensions)?;
        Ok(Self {
            dimensions,
            distribution,
        })
    }
}

impl<D: ContinuousDistribution> SparkGenerator for GaussianSparkGenerator<'_, D> {
    fn spark_type(&self) -> FireworkType {
        FireworkType::SpecificSpark
    }

    fn create_spark<R: Rng + ?Sized>(&self, explosion: &Explosion, rng: &mut R) -> Result<Firework> {
        let epicenter = require_epicenter(explosion, self.dimensions)?;
        let mut spark = Firework::new(
            self.spark_type(),
            explosion.step_number(),
            epicenter.coordinates().to_vec(),
        );

        let factor = self.distribution.sample(rng);
        for (dim, x) in self.dimensions.iter().zip(spark.coordinates_mut()) {
            if coin_flip(rng) {
                *x = dim.wrap(*x * factor);
            }
        }

        Ok(spark)
    }
}
