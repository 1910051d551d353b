//! Firework mutators.
//!
//! A mutator moves one population slot in place, driven by an
//! [`Explosion`]. Slots keep their identity across steps; only their
//! coordinates, quality and birth step change.
//!
//! - [`SearchMutator`]: a few rounds of local search around the firework
//! - [`AttractRepulseMutator`]: one attract-repulse move, quality reset
//!
//! # References
//!
//! - Ding, Zheng & Tan (2013), "GPU-based Parallel Fireworks Algorithm
//!   for Optimization", Algorithm 1

mod attract_repulse;
mod search;

pub use attract_repulse::AttractRepulseMutator;
pub use search::SearchMutator;

use rand::Rng;

use crate::error::{FwaError, Result};
use crate::model::{Explosion, Firework, MutableFirework};

/// Updates a population slot in place.
pub trait FireworkMutator {
    /// Mutates `firework` using `explosion`.
    ///
    /// # Errors
    /// - `explosion` has no epicenter: `InvalidArgument("explosion")`
    /// - `firework` and the epicenter differ in dimensionality:
    ///   `InvalidArgument("mutable_firework")`
    fn mutate_firework<R: Rng + ?Sized>(
        &self,
        firework: &mut MutableFirework,
        explosion: &Explosion,
        rng: &mut R,
    ) -> Result<()>;
}

/// Evaluates a batch of fireworks.
///
/// Returns one quality per firework, in order, without touching the input;
/// the caller assigns them.
pub trait QualityCalculator {
    fn calculate(&self, fireworks: &[Firework]) -> Vec<f64>;
}

impl<F> QualityCalculator for F
where
    F: Fn(&[Firework]) -> Vec<f64>,
{
    fn calculate(&self, fireworks: &[Firework]) -> Vec<f64> {
        self(fireworks)
    }
}

/// Which local-search result a [`SearchMutator`] leaves in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchRetention {
    /// Every round overwrites the slot; the last round's winner stays,
    /// even if an earlier round found something better.
    LastRound,

    /// The best winner over all rounds stays.
    #[default]
    BestOfRounds,
}

fn check_inputs(firework: &MutableFirework, explosion: &Explosion) -> Result<()> {
    let epicenter = explosion
        .epicenter()
        .ok_or_else(|| FwaError::invalid("explosion", "explosion has no epicenter"))?;
    if firework.coordinates().len() != epicenter.coordinates().len() {
        return Err(FwaError::invalid(
            "mutable_firework",
            format!(
                "has {} coordinates, explosion epicenter has {}",
                firework.coordinates().len(),
                epicenter.coordinates().len()
            ),
        ));
    }
    Ok(())
}
