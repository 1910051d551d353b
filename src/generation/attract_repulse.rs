//! Attract-repulse sparks (2013 GPU paper).

use rand::Rng;

use super::{coin_flip, require_dimensions, require_epicenter, SparkGenerator};
use crate::distribution::{ContinuousDistribution, ContinuousUniform};
use crate::error::{FwaError, Result};
use crate::model::{Dimension, Explosion, Firework, FireworkType, Solution};

/// Pulls the epicenter toward, or pushes it away from, the best solution.
///
/// For each dimension, with probability 1/2, a scale `s` is drawn from the
/// distribution (uniform on `[1 - δ, 1 + δ]` in the paper) and the
/// coordinate becomes `best + s * (x - best)`. `s < 1` attracts, `s > 1`
/// repulses. Out-of-range results are wrapped.
///
/// Because of the per-dimension coin flip, a spark leaves half of the
/// epicenter's coordinates unchanged on average.
///
/// The generator borrows the best solution for as long as it lives, so it
/// always sees the best known at the moment it was built.
#[derive(Debug, Clone)]
pub struct AttractRepulseSparkGenerator<'a, D = ContinuousUniform> {
    best_solution: &'a Solution,
    dimensions: &'a [Dimension],
    distribution: D,
}

impl<'a, D: ContinuousDistribution> AttractRepulseSparkGenerator<'a, D> {
    /// Fails with [`FwaError::InvalidArgument`] if `dimensions` is empty or
    /// `best_solution` does not have one coordinate per dimension.
    pub fn new(best_solution: &'a Solution, dimensions: &'a [Dimension], distribution: D) -> Result<Self> {
        require_dimensions(dimensions)?;
        if best_solution.coordinates().len() != dimensions.len() {
            return Err(FwaError::invalid(
                "best_solution",
                format!(
                    "has {} coordinates, search space has {} dimensions",
                    best_solution.coordinates().len(),
                    dimensions.len()
                ),
            ));
        }
        Ok(Self {
            best_solution,
            dimensions,
            distribution,
        })
    }
}

impl<D: ContinuousDistribution> SparkGenerator for AttractRepulseSparkGenerator<'_, D> {
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

        let best = self.best_solution.coordinates();
        for ((dim, x), &b) in self.dimensions.iter().zip(spark.coordinates_mut()).zip(best) {
            if coin_flip(rng) {
                let scale = self.distribution.sample(rng);
                *x = dim.wrap(b + scale * (*x - b));
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

    const DELTA: f64 = 0.1;

    fn explosion_at(coordinates: Vec<f64>, count: usize) -> Explosion {
        Explosion::new(
            Firework::new(FireworkType::SpecificSpark, 0, coordinates),
            1,
            1.0,
            BTreeMap::from([(FireworkType::SpecificSpark, count)]),
        )
    }

    #[test]
    fn test_spark_type_and_birth_step() {
        let dims = vec![Dimension::new(Range::new(-10.0, 10.0).unwrap())];
        let best = Solution::new(0.0, vec![0.0]);
        let dist = ContinuousUniform::around(1.0, DELTA).unwrap();
        let generator = AttractRepulseSparkGenerator::new(&best, &dims, dist).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let spark = generator.create_spark(&explosion_at(vec![5.0], 1), &mut rng).unwrap();

        assert_eq!(spark.kind(), FireworkType::SpecificSpark);
        assert_eq!(spark.birth_step(), 1);
        assert!(spark.quality().is_nan());
    }

    #[test]
    fn test_moves_scale_distance_to_best() {
        let dims = vec![Dimension::new(Range::new(-100.0, 100.0).unwrap()); 4];
        let best = Solution::new(0.0, vec![1.0, 1.0, 1.0, 1.0]);
        let dist = ContinuousUniform::around(1.0, DELTA).unwrap();
        let generator = AttractRepulseSparkGenerator::new(&best, &dims, dist).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let sparks = generator
            .create_sparks(&explosion_at(vec![11.0; 4], 50), &mut rng)
            .unwrap();

        assert_eq!(sparks.len(), 50);
        for spark in sparks {
            for &x in spark.coordinates() {
                // distance 10 to best, scaled by a factor in [0.9, 1.1)
                let distance = x - 1.0;
                assert!((9.0 - 1e-9..11.0).contains(&distance), "distance {distance}");
            }
        }
    }

    #[test]
    fn test_about_half_the_coordinates_are_untouched() {
        let dims = vec![Dimension::new(Range::new(-100.0, 100.0).unwrap()); 4];
        let best = Solution::new(0.0, vec![1.0; 4]);
        let dist = ContinuousUniform::around(1.0, DELTA).unwrap();
        let generator = AttractRepulseSparkGenerator::new(&best, &dims, dist).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let sparks = generator
            .create_sparks(&explosion_at(vec![11.0; 4], 100), &mut rng)
            .unwrap();

        let untouched = sparks
            .iter()
            .flat_map(|s| s.coordinates())
            .filter(|&&x| x == 11.0)
            .count();
        // 400 coordinates, each kept with probability 1/2
        assert!((140..260).contains(&untouched), "untouched {untouched}");
    }

    #[test]
    fn test_epicenter_at_best_does_not_move() {
        let dims = vec![Dimension::new(Range::new(-10.0, 10.0).unwrap()); 3];
        let best = Solution::new(0.0, vec![2.0, -3.0, 4.0]);
        let dist = ContinuousUniform::around(1.0, 0.9).unwrap();
        let generator = AttractRepulseSparkGenerator::new(&best, &dims, dist).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let spark = generator
            .create_spark(&explosion_at(vec![2.0, -3.0, 4.0], 1), &mut rng)
            .unwrap();

        assert_eq!(spark.coordinates(), best.coordinates());
    }

    #[test]
    fn test_construction_errors_name_parameter() {
        let dims = vec![Dimension::new(Range::new(-1.0, 1.0).unwrap())];
        let best = Solution::new(0.0, vec![0.0]);
        let dist = ContinuousUniform::around(1.0, DELTA).unwrap();

        let err = AttractRepulseSparkGenerator::new(&best, &[], dist).unwrap_err();
        assert_eq!(err.param(), "dimensions");

        let wrong = Solution::new(0.0, vec![0.0, 0.0]);
        let err = AttractRepulseSparkGenerator::new(&wrong, &dims, dist).unwrap_err();
        assert_eq!(err.param(), "best_solution");
    }

    #[test]
    fn test_initial_explosion_rejected() {
        let dims = vec![Dimension::new(Range::new(-1.0, 1.0).unwrap())];
        let best = Solution::new(0.0, vec![0.0]);
        let dist = ContinuousUniform::around(1.0, DELTA).unwrap();
        let generator = AttractRepulseSparkGenerator::new(&best, &dims, dist).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let err = generator.create_spark(&Explosion::initial(1), &mut rng).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.param(), "explosion");
    }

    proptest! {
        #[test]
        fn prop_sparks_stay_in_bounds(
            seed in any::<u64>(),
            start in -10.0f64..10.0,
            best in -10.0f64..10.0,
            delta in 0.01f64..5.0,
        ) {
            let dims = vec![Dimension::new(Range::new(-10.0, 10.0).unwrap()); 3];
            let best = Solution::new(0.0, vec![best; 3]);
            let dist = ContinuousUniform::around(1.0, delta).unwrap();
            let generator = AttractRepulseSparkGenerator::new(&best, &dims, dist).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let sparks = generator.create_sparks(&explosion_at(vec![start; 3], 8), &mut rng).unwrap();
            for spark in sparks {
                for &x in spark.coordinates() {
                    prop_assert!((-10.0..10.0).contains(&x), "coordinate {} out of bounds", x);
                }
            }
        }
    }
}
