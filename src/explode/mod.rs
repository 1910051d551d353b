//! Exploders: decide how strong each explosion is and how many sparks it
//! yields.
//!
//! - [`ParallelExploder`]: one amplitude for the whole population, a fixed
//!   number of sparks (2013 GPU paper)
//! - [`ClassicExploder`]: per-firework amplitude and spark count derived
//!   from relative quality (2010 paper)
//!
//! # References
//!
//! - Tan & Zhu (2010), "Fireworks Algorithm for Optimization", Eq. (2)–(4)
//! - Ding, Zheng & Tan (2013), "GPU-based Parallel Fireworks Algorithm
//!   for Optimization"

mod classic;
mod parallel;

pub use classic::{ClassicExploder, ClassicExploderSettings};
pub use parallel::{ParallelExploder, ParallelExploderSettings};

use crate::error::{FwaError, Result};

/// Keeps amplitude and spark-count ratios finite when all qualities are equal.
pub(crate) const AMPLITUDE_EPSILON: f64 = f64::EPSILON;

fn require_qualities(qualities: &[f64]) -> Result<()> {
    if qualities.is_empty() {
        return Err(FwaError::invalid("current_qualities", "must not be empty"));
    }
    Ok(())
}

fn min_quality(qualities: &[f64]) -> f64 {
    qualities.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max_quality(qualities: &[f64]) -> f64 {
    qualities.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
