//! Stop conditions.
//!
//! A stop condition is consulted before every step. Early termination is
//! expressed as a condition, not as external cancellation.

use crate::model::AlgorithmState;
use crate::problem::ProblemTarget;

/// Decides whether a run should end.
///
/// Conditions may keep their own state, hence `&mut self`.
pub trait StopCondition {
    fn should_stop(&mut self, state: &AlgorithmState) -> bool;
}

impl<F> StopCondition for F
where
    F: FnMut(&AlgorithmState) -> bool,
{
    fn should_stop(&mut self, state: &AlgorithmState) -> bool {
        self(state)
    }
}

/// Stops once `max_steps` steps have been made.
#[derive(Debug, Clone, Copy)]
pub struct StepCountStopCondition {
    max_steps: usize,
}

impl StepCountStopCondition {
    pub fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }
}

impl StopCondition for StepCountStopCondition {
    fn should_stop(&mut self, state: &AlgorithmState) -> bool {
        state.step_number >= self.max_steps
    }
}

/// Stops once the objective has been evaluated `max_evaluations` times.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationCountStopCondition {
    max_evaluations: usize,
}

impl EvaluationCountStopCondition {
    pub fn new(max_evaluations: usize) -> Self {
        Self { max_evaluations }
    }
}

impl StopCondition for EvaluationCountStopCondition {
    fn should_stop(&mut self, state: &AlgorithmState) -> bool {
        state.evaluations >= self.max_evaluations
    }
}

/// Stops once the best quality reaches `threshold` (inclusive).
#[derive(Debug, Clone, Copy)]
pub struct QualityStopCondition {
    threshold: f64,
    target: ProblemTarget,
}

impl QualityStopCondition {
    pub fn new(threshold: f64, target: ProblemTarget) -> Self {
        Self { threshold, target }
    }
}

impl StopCondition for QualityStopCondition {
    fn should_stop(&mut self, state: &AlgorithmState) -> bool {
        let best = state.best_solution.quality();
        !best.is_nan() && !self.target.is_better(self.threshold, best)
    }
}

/// Stops when either inner condition says so.
///
/// Both conditions are always consulted so stateful ones keep counting.
#[derive(Debug, Clone)]
pub struct AnyStopCondition<A, B> {
    first: A,
    second: B,
}

impl<A: StopCondition, B: StopCondition> StopCondition for AnyStopCondition<A, B> {
    fn should_stop(&mut self, state: &AlgorithmState) -> bool {
        let first = self.first.should_stop(state);
        let second = self.second.should_stop(state);
        first || second
    }
}

/// Combinators for stop conditions.
pub trait StopConditionExt: StopCondition + Sized {
    fn or<B: StopCondition>(self, other: B) -> AnyStopCondition<Self, B> {
        AnyStopCondition {
            first: self,
            second: other,
        }
    }
}

impl<T: StopCondition> StopConditionExt for T {}
