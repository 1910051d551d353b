//! Per-run algorithm state.

use super::firework::{MutableFirework, Solution};

/// Snapshot of a running optimization, mutated in place by each step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgorithmState {
    /// Number of completed steps (0 right after initialization).
    pub step_number: usize,

    /// The population. Its size stays fixed for the whole run.
    pub fireworks: Vec<MutableFirework>,

    /// Best point seen at or before `step_number`.
    pub best_solution: Solution,

    /// Shared explosion amplitude to be used by the next step.
    pub amplitude: f64,

    /// Objective evaluations performed so far.
    pub evaluations: usize,
}

impl AlgorithmState {
    /// Current qualities of the population, in population order.
    pub fn qualities(&self) -> Vec<f64> {
        self.fireworks.iter().map(|fw| fw.quality()).collect()
    }
}
