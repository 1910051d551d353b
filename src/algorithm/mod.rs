//! Fireworks Algorithm drivers.
//!
//! An algorithm owns its problem, stop condition, configuration and random
//! source, and drives an [`AlgorithmState`] through its phases:
//!
//! ```text
//! Uninitialized --create_initial_state--> Ready --make_step--> Stepping
//!                                            \                   |  ^
//!                                             \                  +--+
//!                                              +--should_stop--> Terminal
//! ```
//!
//! - [`ParallelFireworksAlgorithm`]: shared amplitude, local search and
//!   attract-repulse moves (2013 GPU paper)
//! - [`FireworksAlgorithm`]: per-firework explosions, Gaussian sparks and
//!   distance-based selection (2010 paper)
//!
//! # References
//!
//! - Tan & Zhu (2010), "Fireworks Algorithm for Optimization"
//! - Ding, Zheng & Tan (2013), "GPU-based Parallel Fireworks Algorithm
//!   for Optimization"

mod classic;
mod config;
mod parallel;

pub use classic::FireworksAlgorithm;
pub use config::{FwaConfig, ParallelFwaConfig};
pub use parallel::ParallelFireworksAlgorithm;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{FwaError, Result};
use crate::model::{AlgorithmState, Dimension, MutableFirework, Solution};
use crate::problem::Problem;

/// Lifecycle of an algorithm instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlgorithmPhase {
    /// No initial state created yet.
    #[default]
    Uninitialized,

    /// Initial state created, no step made.
    Ready,

    /// At least one step made.
    Stepping,

    /// The run has ended.
    Terminal,
}

/// Result of a complete run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FwaResult {
    /// The best point found.
    pub best: Solution,

    /// Number of steps made.
    pub steps: usize,

    /// Objective evaluations performed, initialization included.
    pub evaluations: usize,

    /// Best quality after initialization and after every step.
    pub best_quality_history: Vec<f64>,
}

/// Step-by-step interface shared by the algorithms.
///
/// Callers that need every intermediate state drive the loop themselves;
/// [`run`](FireworksStepper::run) and [`solve`](FireworksStepper::solve)
/// do it for them.
pub trait FireworksStepper {
    /// Current lifecycle phase.
    fn phase(&self) -> AlgorithmPhase;

    /// Seeds and evaluates the population. Moves to [`AlgorithmPhase::Ready`].
    fn create_initial_state(&mut self) -> Result<AlgorithmState>;

    /// Consults the stop condition.
    fn should_stop(&mut self, state: &AlgorithmState) -> bool;

    /// Advances `state` by one step.
    ///
    /// Fails with `InvalidArgument("state")` before
    /// [`create_initial_state`](FireworksStepper::create_initial_state), after
    /// termination, or on an empty population.
    fn make_step(&mut self, state: &mut AlgorithmState) -> Result<()>;

    /// Moves to [`AlgorithmPhase::Terminal`].
    fn terminate(&mut self);

    /// Runs to completion and collects statistics.
    fn run(&mut self) -> Result<FwaResult> {
        let mut state = self.create_initial_state()?;
        let mut best_quality_history = vec![state.best_solution.quality()];

        while !self.should_stop(&state) {
            self.make_step(&mut state)?;
            best_quality_history.push(state.best_solution.quality());
        }
        self.terminate();

        info!(
            "run finished after {} steps, {} evaluations, best quality {}",
            state.step_number,
            state.evaluations,
            state.best_solution.quality()
        );

        Ok(FwaResult {
            best: state.best_solution,
            steps: state.step_number,
            evaluations: state.evaluations,
            best_quality_history,
        })
    }

    /// Runs to completion and returns the best solution.
    fn solve(&mut self) -> Result<Solution> {
        self.run().map(|result| result.best)
    }
}

pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

pub(crate) fn require_problem<P: Problem>(problem: &P) -> Result<()> {
    if problem.dimensions().is_empty() {
        return Err(FwaError::invalid("problem", "has no dimensions"));
    }
    Ok(())
}

/// The problem's dimensions with their initial ranges taken from
/// [`Problem::initial_range`].
pub(crate) fn seeding_dimensions<P: Problem>(problem: &P) -> Vec<Dimension> {
    problem
        .dimensions()
        .iter()
        .enumerate()
        .map(|(index, dim)| Dimension::with_initial_range(*dim.variation_range(), *problem.initial_range(index)))
        .collect()
}

pub(crate) fn require_steppable(phase: AlgorithmPhase, state: &AlgorithmState) -> Result<()> {
    match phase {
        AlgorithmPhase::Ready | AlgorithmPhase::Stepping => {}
        AlgorithmPhase::Uninitialized => {
            return Err(FwaError::invalid("state", "no initial state has been created"));
        }
        AlgorithmPhase::Terminal => {
            return Err(FwaError::invalid("state", "the run has already terminated"));
        }
    }
    if state.fireworks.is_empty() {
        return Err(FwaError::invalid("state", "population is empty"));
    }
    Ok(())
}

pub(crate) fn next_step_number(state: &AlgorithmState) -> Result<(usize, i64)> {
    let next = state.step_number + 1;
    let signed = i64::try_from(next)
        .map_err(|_| FwaError::out_of_range("state", "step counter overflow"))?;
    Ok((next, signed))
}

/// Evaluates every firework in place and returns the number of evaluations.
pub(crate) fn evaluate_population<P: Problem>(problem: &P, fireworks: &mut [MutableFirework]) -> usize {
    for firework in fireworks.iter_mut() {
        let quality = problem.evaluate(firework.coordinates());
        firework.set_quality(quality);
    }
    fireworks.len()
}

/// Better of the previous best and the population best.
pub(crate) fn refresh_best<P: Problem>(problem: &P, state: &mut AlgorithmState) -> Result<()> {
    let population_best = problem.best_of(&state.fireworks)?;
    if problem
        .target()
        .is_better(population_best.quality(), state.best_solution.quality())
    {
        state.best_solution = population_best;
    }
    Ok(())
}
