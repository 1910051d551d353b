//! Amplitude-driven explosion sparks (2010 paper).

use rand::Rng;

use super::{coin_flip, require_dimensions, require_epicenter, SparkGenerator};
use crate::error::Result;
use crate::model::{Dimension, Explosion, Firework, FireworkType};

/// Conventional explosion spark generator.
///
/// # Algorithm (Tan & Zhu, 2010, Algorithm 1)
///
/// 1. Copy the epicenter's coordinates
/// 2. Draw one displacement `d = amplitude * U(-1, 1)`
/// 3. For each dimension, with probability 1/2, add `d`
/// 4. Wrap coordinates that left the variation range
#[derive(Debug, Clone)]
pub struct ExplosionSparkGenerator<'a> {
    dimensions: &'a [Dimension],
}

impl<'a> ExplosionSparkGenerator<'a> {
    pub fn new(dimensions: &'a [Dimension]) -> Result<Self> {
        require_dimensions(dimensions)?;
        Ok(Self { dimensions })
    }
}

impl SparkGenerator for ExplosionSparkGenerator<'_> {
    fn spark_type(&self) -> FireworkType {
        FireworkType::ExplosionSpark
    }

    fn create_spark<R: Rng + ?Sized>(&self, explosion: &Explosion, rng: &mut R) -> Result<Firework> {
        let epicenter = require_epicenter(explosion, self.dimensions)?;
        let mut spark = Firework::new(
            self.spark_type(),
            explosion.step_number(),
            epicenter.coordinates().to_vec(),
        );

        let displacement = explosion.amplitude() * rng.random_range(-1.0..1.0);
        for (dim, x) in self.dimensions.iter().zip(spark.coordinates_mut()) {
            if coin_flip(rng) {
                *x = dim.wrap(*x + displacement);
            }
        }

        Ok(spark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Range;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn explosion(coordinates: Vec<f64>, amplitude: f64, count: usize) -> Explosion {
        Explosion::new(
            Firework::new(FireworkType::Initial, 0, coordinates),
            3,
            amplitude,
            BTreeMap::from([(FireworkType::ExplosionSpark, count)]),
        )
    }

    #[test]
    fn test_displacement_is_shared_across_dimensions() {
        let dims = vec![Dimension::new(Range::new(-100.0, 100.0).unwrap()); 8];
        let generator = ExplosionSparkGenerator::new(&dims).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for spark in generator
            .create_sparks(&explosion(vec![0.0; 8], 5.0, 20), &mut rng)
            .unwrap()
        {
            assert_eq!(spark.kind(), FireworkType::ExplosionSpark);
            assert_eq!(spark.birth_step(), 3);
            let moved: Vec<f64> = spark.coordinates().iter().copied().filter(|&x| x != 0.0).collect();
            // every moved coordinate received the same offset, bounded by the amplitude
            for x in &moved {
                assert!((x - moved[0]).abs() < 1e-12);
                assert!(x.abs() <= 5.0);
            }
        }
    }

    #[test]
    fn test_zero_amplitude_keeps_epicenter() {
        let dims = vec![Dimension::new(Range::new(-1.0, 1.0).unwrap()); 3];
        let generator = ExplosionSparkGenerator::new(&dims).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let spark = generator
            .create_spark(&explosion(vec![0.1, 0.2, 0.3], 0.0, 1), &mut rng)
            .unwrap();
        assert_eq!(spark.coordinates(), &[0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_initial_explosion_rejected() {
        let dims = vec![Dimension::new(Range::new(-1.0, 1.0).unwrap())];
        let generator = ExplosionSparkGenerator::new(&dims).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = generator.create_spark(&Explosion::initial(1), &mut rng).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.param(), "explosion");
    }

    proptest! {
        #[test]
        fn prop_sparks_stay_in_bounds(
            seed in any::<u64>(),
            amplitude in 0.0f64..500.0,
            start in -10.0f64..10.0,
        ) {
            let dims = vec![Dimension::new(Range::new(-10.0, 10.0).unwrap()); 4];
            let generator = ExplosionSparkGenerator::new(&dims).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let sparks = generator
                .create_sparks(&explosion(vec![start; 4], amplitude, 10), &mut rng)
                .unwrap();
            for spark in sparks {
                for &x in spark.coordinates() {
                    prop_assert!((-10.0..10.0).contains(&x), "coordinate {} out of bounds", x);
                }
            }
        }
    }
}
