//! Per-firework explosion (2010 paper).

use std::collections::BTreeMap;

use crate::error::{FwaError, Result};
use crate::model::{Explosion, Firework, FireworkType};
use crate::problem::ProblemTarget;

use super::{max_quality, min_quality, require_qualities, AMPLITUDE_EPSILON};

/// Settings for [`ClassicExploder`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassicExploderSettings {
    /// `m`: total number of explosion sparks shared out among fireworks.
    pub explosion_sparks_number_modifier: f64,

    /// `a`: lower bound on a firework's spark count, as a fraction of `m`.
    pub explosion_sparks_number_lower_bound: f64,

    /// `b`: upper bound on a firework's spark count, as a fraction of `m`.
    pub explosion_sparks_number_upper_bound: f64,

    /// `Â`: maximum explosion amplitude.
    pub explosion_sparks_maximum_amplitude: f64,
}

impl Default for ClassicExploderSettings {
    fn default() -> Self {
        Self {
            explosion_sparks_number_modifier: 50.0,
            explosion_sparks_number_lower_bound: 0.04,
            explosion_sparks_number_upper_bound: 0.8,
            explosion_sparks_maximum_amplitude: 40.0,
        }
    }
}

impl ClassicExploderSettings {
    pub fn validate(&self) -> Result<()> {
        let m = self.explosion_sparks_number_modifier;
        if !(m > 0.0 && m.is_finite()) {
            return Err(FwaError::out_of_range(
                "explosion_sparks_number_modifier",
                format!("must be positive and finite, got {m}"),
            ));
        }
        let (a, b) = (
            self.explosion_sparks_number_lower_bound,
            self.explosion_sparks_number_upper_bound,
        );
        if !(a > 0.0 && a < b && b < 1.0) {
            return Err(FwaError::out_of_range(
                "explosion_sparks_number_lower_bound",
                format!("bounds must satisfy 0 < a < b < 1, got a={a}, b={b}"),
            ));
        }
        let max = self.explosion_sparks_maximum_amplitude;
        if !(max > 0.0 && max.is_finite()) {
            return Err(FwaError::out_of_range(
                "explosion_sparks_maximum_amplitude",
                format!("must be positive and finite, got {max}"),
            ));
        }
        Ok(())
    }
}

/// Gives better fireworks more sparks and a smaller amplitude.
///
/// Qualities are first mapped to costs (lower is better) so the same
/// formulas serve minimization and maximization:
///
/// - spark count `s_i = m (c_max - c_i + ε) / (Σ (c_max - c_j) + ε)`,
///   bounded to `[round(a·m), round(b·m)]`
/// - amplitude `A_i = Â (c_i - c_min + ε) / (Σ (c_j - c_min) + ε)`
#[derive(Debug, Clone)]
pub struct ClassicExploder {
    settings: ClassicExploderSettings,
    target: ProblemTarget,
}

impl ClassicExploder {
    pub fn new(settings: ClassicExploderSettings, target: ProblemTarget) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings, target })
    }

    fn costs(&self, qualities: &[f64]) -> Vec<f64> {
        qualities.iter().map(|&q| self.target.cost(q)).collect()
    }

    /// Number of explosion sparks for a firework of `quality`.
    pub fn spark_number(&self, quality: f64, current_qualities: &[f64]) -> Result<usize> {
        require_qualities(current_qualities)?;
        let costs = self.costs(current_qualities);
        let cost = self.target.cost(quality);
        let worst = max_quality(&costs);
        let total: f64 = costs.iter().map(|c| worst - c).sum();

        let m = self.settings.explosion_sparks_number_modifier;
        let raw = m * (worst - cost + AMPLITUDE_EPSILON) / (total + AMPLITUDE_EPSILON);
        let lower = (self.settings.explosion_sparks_number_lower_bound * m).round();
        let upper = (self.settings.explosion_sparks_number_upper_bound * m).round();

        let bounded = if raw.is_nan() {
            lower
        } else if raw < lower {
            lower
        } else if raw > upper {
            upper
        } else {
            raw.round()
        };
        Ok(bounded as usize)
    }

    /// Explosion amplitude for a firework of `quality`.
    pub fn amplitude(&self, quality: f64, current_qualities: &[f64]) -> Result<f64> {
        require_qualities(current_qualities)?;
        let costs = self.costs(current_qualities);
        let cost = self.target.cost(quality);
        let best = min_quality(&costs);
        let total: f64 = costs.iter().map(|c| c - best).sum();

        let max = self.settings.explosion_sparks_maximum_amplitude;
        let amplitude = max * (cost - best + AMPLITUDE_EPSILON) / (total + AMPLITUDE_EPSILON);
        if amplitude.is_nan() {
            return Err(FwaError::invalid(
                "current_qualities",
                "qualities must be evaluated (no NaN)",
            ));
        }
        Ok(amplitude.clamp(0.0, max))
    }

    /// Builds the explosion of one firework.
    ///
    /// Fails like [`ParallelExploder::explode`](super::ParallelExploder::explode)
    /// on an empty epicenter, empty qualities or a negative step number.
    pub fn explode(
        &self,
        epicenter: &Firework,
        current_qualities: &[f64],
        current_step_number: i64,
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

        let sparks = self.spark_number(epicenter.quality(), current_qualities)?;
        let amplitude = self.amplitude(epicenter.quality(), current_qualities)?;
        let spark_counts = BTreeMap::from([(FireworkType::ExplosionSpark, sparks)]);
        Ok(Explosion::new(epicenter.clone(), step_number, amplitude, spark_counts))
    }
}
