//! Attract-repulse mutation.

use rand::Rng;

use super::{check_inputs, FireworkMutator};
use crate::error::Result;
use crate::generation::SparkGenerator;
use crate::model::{Explosion, MutableFirework};

/// Replaces the firework with one spark from its generator.
///
/// The move is unconditional, and the quality is reset to `NaN` so the
/// caller has to re-evaluate the slot.
#[derive(Debug, Clone)]
pub struct AttractRepulseMutator<G> {
    generator: G,
}

impl<G: SparkGenerator> AttractRepulseMutator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

impl<G: SparkGenerator> FireworkMutator for AttractRepulseMutator<G> {
    fn mutate_firework<R: Rng + ?Sized>(
        &self,
        firework: &mut MutableFirework,
        explosion: &Explosion,
        rng: &mut R,
    ) -> Result<()> {
        check_inputs(firework, explosion)?;
        let spark = self.generator.create_spark(explosion, rng)?;
        firework.update(&spark);
        firework.set_quality(f64::NAN);
        Ok(())
    }
}
