//! Uniform seeding of the initial population.

use rand::Rng;

use super::{require_dimensions, SparkGenerator};
use crate::error::Result;
use crate::model::{Dimension, Explosion, Firework, FireworkType};

/// Samples every dimension uniformly from its initial range.
///
/// Only the explosion's step number and `Initial` spark count are used.
#[derive(Debug, Clone)]
pub struct InitialSparkGenerator<'a> {
    dimensions: &'a [Dimension],
}

impl<'a> InitialSparkGenerator<'a> {
    /// Fails with [`FwaError::InvalidArgument`](crate::FwaError::InvalidArgument)
    /// if `dimensions` is empty.
    pub fn new(dimensions: &'a [Dimension]) -> Result<Self> {
        require_dimensions(dimensions)?;
        Ok(Self { dimensions })
    }
}

impl SparkGenerator for InitialSparkGenerator<'_> {
    fn spark_type(&self) -> FireworkType {
        FireworkType::Initial
    }

    fn create_spark<R: Rng + ?Sized>(&self, explosion: &Explosion, rng: &mut R) -> Result<Firework> {
        let coordinates = self
            .dimensions
            .iter()
            .map(|dim| {
                let range = dim.initial_range();
                rng.random_range(range.minimum()..range.maximum())
            })
            .collect();
        Ok(Firework::new(self.spark_type(), explosion.step_number(), coordinates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Range;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sparks_inside_initial_ranges() {
        let dims = vec![
            Dimension::with_initial_range(Range::new(-100.0, 100.0).unwrap(), Range::new(30.0, 50.0).unwrap()),
            Dimension::new(Range::new(0.0, 1.0).unwrap()),
        ];
        let generator = InitialSparkGenerator::new(&dims).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let sparks = generator.create_sparks(&Explosion::initial(50), &mut rng).unwrap();

        assert_eq!(sparks.len(), 50);
        for spark in &sparks {
            assert_eq!(spark.kind(), FireworkType::Initial);
            assert_eq!(spark.birth_step(), 0);
            assert!(spark.quality().is_nan());
            assert!((30.0..50.0).contains(&spark.coordinates()[0]));
            assert!((0.0..1.0).contains(&spark.coordinates()[1]));
        }
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        let err = InitialSparkGenerator::new(&[]).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.param(), "dimensions");
    }
}
