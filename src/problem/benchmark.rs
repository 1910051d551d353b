//! Standard benchmark functions.
//!
//! Both functions have their global minimum `0` at the origin. Following
//! the 2010 fireworks paper, [`sphere`] seeds fireworks in an asymmetric
//! initial range so the optimum is not trivially inside the first cloud.
//!
//! # References
//!
//! - Tan & Zhu (2010), "Fireworks Algorithm for Optimization", Table 1

use crate::error::Result;
use crate::model::{Dimension, Range};

use super::{FunctionProblem, ProblemTarget};

/// Objective function pointer used by the benchmark problems.
pub type Objective = fn(&[f64]) -> f64;

/// `f(x) = Σ x_i²` over `[-100, 100]^n`, initialized in `[30, 50]^n`.
pub fn sphere(dimension_count: usize) -> Result<FunctionProblem<Objective>> {
    let variation = Range::new(-100.0, 100.0)?;
    let initial = Range::new(30.0, 50.0)?;
    let dimensions = vec![Dimension::with_initial_range(variation, initial); dimension_count];
    FunctionProblem::new(dimensions, ProblemTarget::Minimize, sphere_value as Objective)
}

/// `f(x) = 10n + Σ (x_i² − 10 cos 2πx_i)` over `[-5.12, 5.12]^n`,
/// initialized in `[2.56, 5.12]^n`.
pub fn rastrigin(dimension_count: usize) -> Result<FunctionProblem<Objective>> {
    let variation = Range::new(-5.12, 5.12)?;
    let initial = Range::new(2.56, 5.12)?;
    let dimensions = vec![Dimension::with_initial_range(variation, initial); dimension_count];
    FunctionProblem::new(dimensions, ProblemTarget::Minimize, rastrigin_value as Objective)
}

fn sphere_value(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

fn rastrigin_value(x: &[f64]) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    10.0 * x.len() as f64
        + x.iter()
            .map(|v| v * v - 10.0 * (two_pi * v).cos())
            .sum::<f64>()
}
