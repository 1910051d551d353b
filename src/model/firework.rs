//! Fireworks, sparks and solutions.

use std::ops::Deref;

/// Origin of a firework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FireworkType {
    /// Sampled uniformly while seeding the population.
    Initial,
    /// Produced by an amplitude-driven explosion.
    ExplosionSpark,
    /// Produced by a specific operator (Gaussian or attract-repulse).
    SpecificSpark,
}

/// A point in the search space together with its quality.
///
/// Quality is `NaN` until the firework has been evaluated. Equality treats
/// two `NaN` qualities as equal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Firework {
    kind: FireworkType,
    birth_step: usize,
    coordinates: Vec<f64>,
    quality: f64,
}

impl PartialEq for Firework {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.birth_step == other.birth_step
            && self.coordinates == other.coordinates
            && same_quality(self.quality, other.quality)
    }
}

fn same_quality(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl Firework {
    /// Creates an unevaluated firework.
    pub fn new(kind: FireworkType, birth_step: usize, coordinates: Vec<f64>) -> Self {
        Self {
            kind,
            birth_step,
            coordinates,
            quality: f64::NAN,
        }
    }

    /// Creates a firework located at a known solution, carrying its quality.
    pub fn from_solution(kind: FireworkType, birth_step: usize, solution: &Solution) -> Self {
        Self {
            kind,
            birth_step,
            coordinates: solution.coordinates().to_vec(),
            quality: solution.quality(),
        }
    }

    pub fn kind(&self) -> FireworkType {
        self.kind
    }

    pub fn birth_step(&self) -> usize {
        self.birth_step
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    pub(crate) fn coordinates_mut(&mut self) -> &mut [f64] {
        &mut self.coordinates
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn set_quality(&mut self, quality: f64) {
        self.quality = quality;
    }

    pub fn is_evaluated(&self) -> bool {
        !self.quality.is_nan()
    }

    /// Snapshot of this firework as a [`Solution`].
    pub fn to_solution(&self) -> Solution {
        Solution::new(self.quality, self.coordinates.clone())
    }

    /// Euclidean distance between two fireworks.
    pub fn distance_to(&self, other: &Firework) -> f64 {
        self.coordinates
            .iter()
            .zip(&other.coordinates)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl AsRef<Firework> for Firework {
    fn as_ref(&self) -> &Firework {
        self
    }
}

/// A population slot whose state is overwritten in place.
///
/// Mutation operators evolve a population member through
/// [`update`](MutableFirework::update) so the slot keeps its identity
/// (and its [`FireworkType`]) for the whole run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutableFirework {
    inner: Firework,
}

impl MutableFirework {
    pub fn new(firework: Firework) -> Self {
        Self { inner: firework }
    }

    /// Replaces coordinates, quality and birth step with those of `new_state`.
    pub fn update(&mut self, new_state: &Firework) {
        self.inner.birth_step = new_state.birth_step;
        self.inner.coordinates.clone_from(&new_state.coordinates);
        self.inner.quality = new_state.quality;
    }

    pub fn set_quality(&mut self, quality: f64) {
        self.inner.set_quality(quality);
    }

    pub fn as_firework(&self) -> &Firework {
        &self.inner
    }

    pub fn into_firework(self) -> Firework {
        self.inner
    }
}

impl From<Firework> for MutableFirework {
    fn from(firework: Firework) -> Self {
        Self::new(firework)
    }
}

impl Deref for MutableFirework {
    type Target = Firework;

    fn deref(&self) -> &Firework {
        &self.inner
    }
}

impl AsRef<Firework> for MutableFirework {
    fn as_ref(&self) -> &Firework {
        &self.inner
    }
}

/// The best point known so far, detached from any population slot.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    quality: f64,
    coordinates: Vec<f64>,
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.coordinates == other.coordinates && same_quality(self.quality, other.quality)
    }
}

impl Solution {
    pub fn new(quality: f64, coordinates: Vec<f64>) -> Self {
        Self {
            quality,
            coordinates,
        }
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_firework_is_unevaluated() {
        let fw = Firework::new(FireworkType::Initial, 0, vec![1.0, 2.0]);
        assert!(fw.quality().is_nan());
        assert!(!fw.is_evaluated());
    }

    #[test]
    fn test_unevaluated_firework_equals_clone() {
        let fw = Firework::new(FireworkType::Initial, 3, vec![1.0, 2.0]);
        assert_eq!(fw, fw.clone());
        assert_eq!(MutableFirework::new(fw.clone()), MutableFirework::new(fw.clone()));
        assert_eq!(fw.to_solution(), fw.to_solution());

        let mut evaluated = fw.clone();
        evaluated.set_quality(4.0);
        assert_ne!(fw, evaluated);
        assert_ne!(evaluated, Firework::new(FireworkType::SpecificSpark, 3, vec![1.0, 2.0]));
    }

    #[test]
    fn test_update_replaces_all_state() {
        let mut slot = MutableFirework::new(Firework::new(FireworkType::Initial, 0, vec![1.0, 2.0]));
        let mut other = Firework::new(FireworkType::SpecificSpark, 7, vec![-3.0, 4.5]);
        other.set_quality(12.5);

        slot.update(&other);

        assert_eq!(slot.coordinates(), other.coordinates());
        assert_eq!(slot.quality(), 12.5);
        assert_eq!(slot.birth_step(), 7);
        assert_eq!(slot.kind(), FireworkType::Initial);
    }

    #[test]
    fn test_update_with_unevaluated_state_clears_quality() {
        let mut first = Firework::new(FireworkType::Initial, 0, vec![0.0]);
        first.set_quality(1.0);
        let mut slot = MutableFirework::from(first);

        slot.update(&Firework::new(FireworkType::SpecificSpark, 3, vec![5.0]));

        assert!(slot.quality().is_nan());
        assert_eq!(slot.birth_step(), 3);
    }

    #[test]
    fn test_distance() {
        let a = Firework::new(FireworkType::Initial, 0, vec![0.0, 0.0]);
        let b = Firework::new(FireworkType::Initial, 0, vec![3.0, 4.0]);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_solution_roundtrip_through_firework() {
        let solution = Solution::new(2.0, vec![1.0, -1.0]);
        let fw = Firework::from_solution(FireworkType::SpecificSpark, 4, &solution);
        assert_eq!(fw.to_solution(), solution);
        assert_eq!(fw.birth_step(), 4);
    }
}
