//! Population-wide explosion (2013 GPU paper).

use std::collections::BTreeMap;

use crate::error::{FwaError, Result};
use crate::model::{Explosion, Firework, FireworkType, Solution};

use super::{min_quality, require_qualities, AMPLITUDE_EPSILON};

/// Settings for [`ParallelExploder`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelExploderSettings {
    /// Sparks of type `SpecificSpark` produced by each explosion.
    pub fixed_quantity_sparks: usize,

    /// Upper bound of the adapted amplitude.
    pub explosion_sparks_maximum_amplitude: f64,
}

impl Default for ParallelExploderSettings {
    fn default() -> Self {
        Self {
            fixed_quantity_sparks: 16,
            explosion_sparks_maximum_amplitude: 1.0,
        }
    }
}

/// Builds one explosion per step with an amplitude shared by the whole
/// population.
///
/// The amplitude is not stored here: [`calculate_amplitude`](Self::calculate_amplitude)
/// returns it and the caller threads it into the next [`explode`](Self::explode).
#[derive(Debug, Clone)]
pub struct ParallelExploder {
    settings: ParallelExploderSettings,
}

impl ParallelExploder {
    /// Fails with [`FwaError::OutOfRange`] if `fixed_quantity_sparks` is 0
    /// or the maximum amplitude is not a positive finite number.
    pub fn new(settings: ParallelExploderSettings) -> Result<Self> {
        if settings.fixed_quantity_sparks == 0 {
            return Err(FwaError::out_of_range("fixed_quantity_sparks", "must be at least 1"));
        }
        let max = settings.explosion_sparks_maximum_amplitude;
        if !(max > 0.0 && max.is_finite()) {
            return Err(FwaError::out_of_range(
                "explosion_sparks_maximum_amplitude",
                format!("must be positive and finite, got {max}"),
            ));
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &ParallelExploderSettings {
        &self.settings
    }

    /// Adapts the amplitude to the population's quality spread.
    ///
    /// `A = A_max * (q_focus - q_min + ε) / (Σ (q_i - q_min) + ε)`,
    /// clamped to `[0, A_max]`. The amplitude shrinks as the population
    /// converges; when all qualities are equal ε keeps it finite.
    pub fn calculate_amplitude(&self, focus: &Solution, current_qualities: &[f64]) -> Result<f64> {
        require_qualities(current_qualities)?;
        let min = min_quality(current_qualities);
        let spread: f64 = current_qualities.iter().map(|q| q - min).sum();
        let max = self.settings.explosion_sparks_maximum_amplitude;

        let amplitude = max * (focus.quality() - min + AMPLITUDE_EPSILON) / (spread + AMPLITUDE_EPSILON);
        if amplitude.is_nan() {
            return Err(FwaError::invalid(
                "current_qualities",
                "qualities must be evaluated (no NaN)",
            ));
        }
        Ok(amplitude.clamp(0.0, max))
    }

    /// Builds the step's explosion around `epicenter`.
    ///
    /// # Errors
    /// - `epicenter` without coordinates: `InvalidArgument("epicenter")`
    /// - empty `current_qualities`: `InvalidArgument("current_qualities")`
    /// - negative `current_step_number`: `OutOfRange("current_step_number")`
    /// - negative or non-finite `amplitude`: `OutOfRange("amplitude")`
    pub fn explode(
        &self,
        epicenter: &Firework,
        current_qualities: &[f64],
        current_step_number: i64,
        amplitude: f64,
    ) -> Result<Explosion> {
        if epicenter.coordinates().is_empty() {
            return Err(FwaError::invalid("epicenter", "must have coordinates"));
        }
        require_qualities(current_qualities)?;
        let step_number = usize::try_from(current_step_number).map_err(|_| {
            FwaError::out_of_range(
                "current_step_number",
                format!("must be >= 0, got {current_step_number}"),
            )
        })?;
        if !(amplitude >= 0.0 && amplitude.is_finite()) {
            return Err(FwaError::out_of_range(
                "amplitude",
                format!("must be non-negative and finite, got {amplitude}"),
            ));
        }

        let spark_counts = BTreeMap::from([(
            FireworkType::SpecificSpark,
            self.settings.fixed_quantity_sparks,
        )]);
        Ok(Explosion::new(epicenter.clone(), step_number, amplitude, spark_counts))
    }
}
