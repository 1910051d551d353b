//! Algorithm configuration.

use crate::error::{FwaError, Result};
use crate::explode::{ClassicExploderSettings, ParallelExploderSettings};
use crate::mutation::SearchRetention;

/// Configuration for [`ParallelFireworksAlgorithm`](super::ParallelFireworksAlgorithm).
///
/// # Examples
///
/// ```
/// use fireworks_opt::algorithm::ParallelFwaConfig;
///
/// let config = ParallelFwaConfig::default()
///     .with_locations_number(8)
///     .with_delta(0.5)
///     .with_search_explosions_count(4)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelFwaConfig {
    /// Population size.
    pub locations_number: usize,

    /// Upper bound of the shared amplitude.
    pub explosion_sparks_maximum_amplitude: f64,

    /// Sparks per local-search round.
    pub fixed_quantity_sparks: usize,

    /// Local-search rounds per firework and step (`L`).
    pub search_explosions_count: usize,

    /// Half-width of the attract-repulse scale, drawn from `[1 - δ, 1 + δ]`.
    pub delta: f64,

    /// Amplitude used by the first step.
    pub amplitude: f64,

    /// What the local search leaves in a slot.
    pub search_retention: SearchRetention,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for ParallelFwaConfig {
    fn default() -> Self {
        Self {
            locations_number: 16,
            explosion_sparks_maximum_amplitude: 1.0,
            fixed_quantity_sparks: 16,
            search_explosions_count: 16,
            delta: 0.9,
            amplitude: 1.0,
            search_retention: SearchRetention::default(),
            seed: None,
        }
    }
}

impl ParallelFwaConfig {
    pub fn with_locations_number(mut self, n: usize) -> Self {
        self.locations_number = n;
        self
    }

    pub fn with_explosion_sparks_maximum_amplitude(mut self, amplitude: f64) -> Self {
        self.explosion_sparks_maximum_amplitude = amplitude;
        self
    }

    pub fn with_fixed_quantity_sparks(mut self, n: usize) -> Self {
        self.fixed_quantity_sparks = n;
        self
    }

    pub fn with_search_explosions_count(mut self, n: usize) -> Self {
        self.search_explosions_count = n;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn with_search_retention(mut self, retention: SearchRetention) -> Self {
        self.search_retention = retention;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn exploder_settings(&self) -> ParallelExploderSettings {
        ParallelExploderSettings {
            fixed_quantity_sparks: self.fixed_quantity_sparks,
            explosion_sparks_maximum_amplitude: self.explosion_sparks_maximum_amplitude,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.locations_number == 0 {
            return Err(FwaError::out_of_range("locations_number", "must be at least 1"));
        }
        if self.fixed_quantity_sparks == 0 {
            return Err(FwaError::out_of_range("fixed_quantity_sparks", "must be at least 1"));
        }
        if self.search_explosions_count == 0 {
            return Err(FwaError::out_of_range("search_explosions_count", "must be at least 1"));
        }
        let max = self.explosion_sparks_maximum_amplitude;
        if !(max > 0.0 && max.is_finite()) {
            return Err(FwaError::out_of_range(
                "explosion_sparks_maximum_amplitude",
                format!("must be positive and finite, got {max}"),
            ));
        }
        if !(self.delta > 0.0 && self.delta.is_finite()) {
            return Err(FwaError::out_of_range(
                "delta",
                format!("must be positive and finite, got {}", self.delta),
            ));
        }
        if !(self.amplitude >= 0.0 && self.amplitude.is_finite()) {
            return Err(FwaError::out_of_range(
                "amplitude",
                format!("must be non-negative and finite, got {}", self.amplitude),
            ));
        }
        Ok(())
    }
}

/// Configuration for [`FireworksAlgorithm`](super::FireworksAlgorithm),
/// the 2010 formulation.
///
/// Defaults follow Tan & Zhu (2010), Section 3.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FwaConfig {
    /// Population size (`n`).
    pub locations_number: usize,

    /// Total explosion sparks per step (`m`).
    pub explosion_sparks_number_modifier: f64,

    /// Lower spark-count bound as a fraction of `m` (`a`).
    pub explosion_sparks_number_lower_bound: f64,

    /// Upper spark-count bound as a fraction of `m` (`b`).
    pub explosion_sparks_number_upper_bound: f64,

    /// Maximum explosion amplitude (`Â`).
    pub explosion_sparks_maximum_amplitude: f64,

    /// Gaussian sparks per step (`m̂`).
    pub specific_sparks_number: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for FwaConfig {
    fn default() -> Self {
        let exploder = ClassicExploderSettings::default();
        Self {
            locations_number: 5,
            explosion_sparks_number_modifier: exploder.explosion_sparks_number_modifier,
            explosion_sparks_number_lower_bound: exploder.explosion_sparks_number_lower_bound,
            explosion_sparks_number_upper_bound: exploder.explosion_sparks_number_upper_bound,
            explosion_sparks_maximum_amplitude: exploder.explosion_sparks_maximum_amplitude,
            specific_sparks_number: 5,
            seed: None,
        }
    }
}

impl FwaConfig {
    pub fn with_locations_number(mut self, n: usize) -> Self {
        self.locations_number = n;
        self
    }

    pub fn with_explosion_sparks_number_modifier(mut self, m: f64) -> Self {
        self.explosion_sparks_number_modifier = m;
        self
    }

    pub fn with_explosion_sparks_number_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.explosion_sparks_number_lower_bound = lower;
        self.explosion_sparks_number_upper_bound = upper;
        self
    }

    pub fn with_explosion_sparks_maximum_amplitude(mut self, amplitude: f64) -> Self {
        self.explosion_sparks_maximum_amplitude = amplitude;
        self
    }

    pub fn with_specific_sparks_number(mut self, n: usize) -> Self {
        self.specific_sparks_number = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn exploder_settings(&self) -> ClassicExploderSettings {
        ClassicExploderSettings {
            explosion_sparks_number_modifier: self.explosion_sparks_number_modifier,
            explosion_sparks_number_lower_bound: self.explosion_sparks_number_lower_bound,
            explosion_sparks_number_upper_bound: self.explosion_sparks_number_upper_bound,
            explosion_sparks_maximum_amplitude: self.explosion_sparks_maximum_amplitude,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.locations_number == 0 {
            return Err(FwaError::out_of_range("locations_number", "must be at least 1"));
        }
        self.exploder_settings().validate()
    }
}
