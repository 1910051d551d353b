//! Explosion descriptors.

use std::collections::BTreeMap;

use super::firework::{Firework, FireworkType};

/// Describes one explosion: where it happens, how strong it is, and how
/// many sparks of each type it yields.
///
/// The seeding explosion built by [`Explosion::initial`] has no epicenter;
/// every other explosion is centered on a firework.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Explosion {
    epicenter: Option<Firework>,
    step_number: usize,
    amplitude: f64,
    spark_counts: BTreeMap<FireworkType, usize>,
}

impl Explosion {
    pub fn new(
        epicenter: Firework,
        step_number: usize,
        amplitude: f64,
        spark_counts: BTreeMap<FireworkType, usize>,
    ) -> Self {
        Self {
            epicenter: Some(epicenter),
            step_number,
            amplitude,
            spark_counts,
        }
    }

    /// The explosion that seeds the initial population with `count` fireworks.
    pub fn initial(count: usize) -> Self {
        Self {
            epicenter: None,
            step_number: 0,
            amplitude: 0.0,
            spark_counts: BTreeMap::from([(FireworkType::Initial, count)]),
        }
    }

    pub fn epicenter(&self) -> Option<&Firework> {
        self.epicenter.as_ref()
    }

    pub fn step_number(&self) -> usize {
        self.step_number
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn spark_counts(&self) -> &BTreeMap<FireworkType, usize> {
        &self.spark_counts
    }

    /// Number of sparks of `kind` this explosion yields (0 if absent).
    pub fn spark_count(&self, kind: FireworkType) -> usize {
        self.spark_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Same explosion parameters around a different epicenter.
    pub fn recentered(&self, epicenter: Firework) -> Self {
        Self {
            epicenter: Some(epicenter),
            step_number: self.step_number,
            amplitude: self.amplitude,
            spark_counts: self.spark_counts.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_explosion() {
        let explosion = Explosion::initial(5);
        assert!(explosion.epicenter().is_none());
        assert_eq!(explosion.spark_count(FireworkType::Initial), 5);
        assert_eq!(explosion.spark_count(FireworkType::ExplosionSpark), 0);
    }

    #[test]
    fn test_recentered_keeps_parameters() {
        let a = Firework::new(FireworkType::Initial, 0, vec![0.0]);
        let b = Firework::new(FireworkType::Initial, 0, vec![1.0]);
        let counts = BTreeMap::from([(FireworkType::SpecificSpark, 3)]);
        let explosion = Explosion::new(a, 2, 0.5, counts);

        let moved = explosion.recentered(b.clone());

        assert_eq!(moved.epicenter(), Some(&b));
        assert_eq!(moved.step_number(), 2);
        assert_eq!(moved.amplitude(), 0.5);
        assert_eq!(moved.spark_count(FireworkType::SpecificSpark), 3);
        assert_eq!(moved, moved.clone());
        assert_ne!(moved, explosion);
    }
}
