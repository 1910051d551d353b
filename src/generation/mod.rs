//! Spark generators.
//!
//! A generator turns an [`Explosion`] into candidate points. Every spark
//! is stamped with the explosion's step number and the generator's
//! [`FireworkType`]; its quality is left unset for the caller to evaluate.
//!
//! - [`InitialSparkGenerator`]: uniform seeding of the starting population
//! - [`ExplosionSparkGenerator`]: amplitude-driven sparks (2010 paper)
//! - [`GaussianSparkGenerator`]: Gaussian-scaled sparks (2010 paper)
//! - [`AttractRepulseSparkGenerator`]: moves toward or away from the best
//!   solution (2013 GPU paper)
//!
//! # References
//!
//! - Tan & Zhu (2010), "Fireworks Algorithm for Optimization"
//! - Ding, Zheng & Tan (2013), "GPU-based Parallel Fireworks Algorithm
//!   for Optimization"

mod attract_repulse;
mod explosion;
mod gaussian;
mod initial;

pub use attract_repulse::AttractRepulseSparkGenerator;
pub use explosion::ExplosionSparkGenerator;
pub use gaussian::GaussianSparkGenerator;
pub use initial::InitialSparkGenerator;

use rand::Rng;

use crate::error::{FwaError, Result};
use crate::model::{Dimension, Explosion, Firework, FireworkType};

/// Produces sparks from an explosion.
pub trait SparkGenerator {
    /// The type stamped on every spark this generator creates.
    fn spark_type(&self) -> FireworkType;

    /// Creates one spark.
    fn create_spark<R: Rng + ?Sized>(&self, explosion: &Explosion, rng: &mut R) -> Result<Firework>;

    /// Creates `explosion.spark_count(self.spark_type())` sparks.
    fn create_sparks<R: Rng + ?Sized>(
        &self,
        explosion: &Explosion,
        rng: &mut R,
    ) -> Result<Vec<Firework>> {
        let count = explosion.spark_count(self.spark_type());
        (0..count).map(|_| self.create_spark(explosion, rng)).collect()
    }
}

pub(crate) fn require_dimensions(dimensions: &[Dimension]) -> Result<()> {
    if dimensions.is_empty() {
        return Err(FwaError::invalid("dimensions", "must not be empty"));
    }
    Ok(())
}

/// The epicenter of `explosion`, checked against the search space.
pub(crate) fn require_epicenter<'a>(
    explosion: &'a Explosion,
    dimensions: &[Dimension],
) -> Result<&'a Firework> {
    let epicenter = explosion
        .epicenter()
        .ok_or_else(|| FwaError::invalid("explosion", "explosion has no epicenter"))?;
    if epicenter.coordinates().len() != dimensions.len() {
        return Err(FwaError::invalid(
            "explosion",
            format!(
                "epicenter has {} coordinates, search space has {} dimensions",
                epicenter.coordinates().len(),
                dimensions.len()
            ),
        ));
    }
    Ok(epicenter)
}

/// Fair coin used to pick which dimensions a spark perturbs.
pub(crate) fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.random_bool(0.5)
}
