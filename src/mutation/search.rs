//! Local-search mutation.

use log::trace;
use rand::Rng;

use super::{check_inputs, FireworkMutator, QualityCalculator, SearchRetention};
use crate::error::{FwaError, Result};
use crate::generation::SparkGenerator;
use crate::model::{Explosion, Firework, MutableFirework};
use crate::selection::FireworkSelector;

/// Runs `search_explosions_count` rounds of spark generation around a
/// firework and moves it to the round winner.
///
/// Each round draws a fresh batch from the same explosion, evaluates it
/// through the [`QualityCalculator`] and keeps the selector's first pick.
/// What ends up in the slot depends on the [`SearchRetention`].
#[derive(Clone)]
pub struct SearchMutator<C, G, S> {
    calculator: C,
    generator: G,
    selector: S,
    search_explosions_count: usize,
    retention: SearchRetention,
}

impl<C, G, S> SearchMutator<C, G, S>
where
    C: QualityCalculator,
    G: SparkGenerator,
    S: FireworkSelector,
{
    /// Fails with [`FwaError::OutOfRange`] if `search_explosions_count` is 0.
    pub fn new(calculator: C, generator: G, selector: S, search_explosions_count: usize) -> Result<Self> {
        if search_explosions_count == 0 {
            return Err(FwaError::out_of_range(
                "search_explosions_count",
                "must be at least 1",
            ));
        }
        Ok(Self {
            calculator,
            generator,
            selector,
            search_explosions_count,
            retention: SearchRetention::default(),
        })
    }

    pub fn with_retention(mut self, retention: SearchRetention) -> Self {
        self.retention = retention;
        self
    }

    pub fn retention(&self) -> SearchRetention {
        self.retention
    }

    fn search_round<R: Rng + ?Sized>(&self, explosion: &Explosion, rng: &mut R) -> Result<Firework> {
        let mut sparks = self.generator.create_sparks(explosion, rng)?;
        if sparks.is_empty() {
            return Err(FwaError::invalid(
                "explosion",
                "spark count for the search generator is 0",
            ));
        }

        let qualities = self.calculator.calculate(&sparks);
        if qualities.len() != sparks.len() {
            return Err(FwaError::invalid(
                "quality_calculator",
                format!("returned {} qualities for {} sparks", qualities.len(), sparks.len()),
            ));
        }
        for (spark, quality) in sparks.iter_mut().zip(qualities) {
            spark.set_quality(quality);
        }

        self.selector
            .select_fireworks(&sparks)
            .into_iter()
            .next()
            .ok_or_else(|| FwaError::invalid("selector", "selected nothing"))
    }
}

impl<C, G, S> std::fmt::Debug for SearchMutator<C, G, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchMutator")
            .field("search_explosions_count", &self.search_explosions_count)
            .field("retention", &self.retention)
            .finish_non_exhaustive()
    }
}

impl<C, G, S> FireworkMutator for SearchMutator<C, G, S>
where
    C: QualityCalculator,
    G: SparkGenerator,
    S: FireworkSelector,
{
    fn mutate_firework<R: Rng + ?Sized>(
        &self,
        firework: &mut MutableFirework,
        explosion: &Explosion,
        rng: &mut R,
    ) -> Result<()> {
        check_inputs(firework, explosion)?;

        let mut retained: Option<Firework> = None;
        for round in 0..self.search_explosions_count {
            let winner = self.search_round(explosion, rng)?;
            trace!("search round {round}: winner quality {}", winner.quality());

            match self.retention {
                SearchRetention::LastRound => firework.update(&winner),
                SearchRetention::BestOfRounds => {
                    retained = Some(match retained.take() {
                        None => winner,
                        Some(previous) => self
                            .selector
                            .select_fireworks(&[previous, winner])
                            .into_iter()
                            .next()
                            .ok_or_else(|| FwaError::invalid("selector", "selected nothing"))?,
                    });
                }
            }
        }

        if let Some(best) = retained {
            firework.update(&best);
        }
        Ok(())
    }
}
