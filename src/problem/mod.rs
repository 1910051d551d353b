//! Objective functions and their search spaces.
//!
//! Users plug their own objective in by implementing [`Problem`], or by
//! wrapping a closure in [`FunctionProblem`]. The [`benchmark`] submodule
//! provides the standard test functions used in the fireworks papers.

pub mod benchmark;

use std::cmp::Ordering;

use crate::error::{FwaError, Result};
use crate::model::{Dimension, Firework, Range, Solution};

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProblemTarget {
    #[default]
    Minimize,
    Maximize,
}

impl ProblemTarget {
    /// Whether `candidate` is strictly better than `incumbent`.
    ///
    /// `NaN` is never better than anything, and anything that is not
    /// `NaN` is better than `NaN`.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        if candidate.is_nan() {
            return false;
        }
        if incumbent.is_nan() {
            return true;
        }
        match self {
            ProblemTarget::Minimize => candidate < incumbent,
            ProblemTarget::Maximize => candidate > incumbent,
        }
    }

    /// Orders qualities best first, `NaN` last.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                match self {
                    ProblemTarget::Minimize => ord,
                    ProblemTarget::Maximize => ord.reverse(),
                }
            }
        }
    }

    /// Maps a quality onto a cost where lower is always better.
    pub fn cost(self, quality: f64) -> f64 {
        match self {
            ProblemTarget::Minimize => quality,
            ProblemTarget::Maximize => -quality,
        }
    }
}

/// Defines an optimization problem over a bounded continuous space.
///
/// Coordinates are passed as a slice indexed like [`dimensions`](Problem::dimensions).
///
/// # Examples
///
/// ```
/// use fireworks_opt::model::{Dimension, Range};
/// use fireworks_opt::problem::{Problem, ProblemTarget};
///
/// struct Paraboloid { dims: Vec<Dimension> }
///
/// impl Problem for Paraboloid {
///     fn dimensions(&self) -> &[Dimension] { &self.dims }
///     fn evaluate(&self, x: &[f64]) -> f64 { x.iter().map(|v| v * v).sum() }
/// }
///
/// let dims = vec![Dimension::new(Range::new(-1.0, 1.0).unwrap()); 3];
/// let problem = Paraboloid { dims };
/// assert_eq!(problem.target(), ProblemTarget::Minimize);
/// assert_eq!(problem.evaluate(&[1.0, 0.0, 0.0]), 1.0);
/// ```
pub trait Problem {
    /// The ordered search-space axes.
    fn dimensions(&self) -> &[Dimension];

    /// Computes the quality of a point.
    fn evaluate(&self, coordinates: &[f64]) -> f64;

    /// Optimization direction. Defaults to minimization.
    fn target(&self) -> ProblemTarget {
        ProblemTarget::Minimize
    }

    /// Range initial fireworks are drawn from on dimension `index`.
    fn initial_range(&self, index: usize) -> &Range {
        self.dimensions()[index].initial_range()
    }

    /// Best firework of `population` under [`target`](Problem::target).
    ///
    /// Fails with [`FwaError::InvalidArgument`] on an empty population.
    fn best_of<F: AsRef<Firework>>(&self, population: &[F]) -> Result<Solution> {
        let target = self.target();
        population
            .iter()
            .map(AsRef::<Firework>::as_ref)
            .min_by(|a, b| target.compare(a.quality(), b.quality()))
            .map(Firework::to_solution)
            .ok_or_else(|| FwaError::invalid("population", "must not be empty"))
    }
}

/// A [`Problem`] backed by a closure.
pub struct FunctionProblem<F> {
    dimensions: Vec<Dimension>,
    target: ProblemTarget,
    function: F,
}

impl<F> FunctionProblem<F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Wraps `function` as a problem over `dimensions`.
    ///
    /// Fails with [`FwaError::InvalidArgument`] if `dimensions` is empty.
    pub fn new(dimensions: Vec<Dimension>, target: ProblemTarget, function: F) -> Result<Self> {
        if dimensions.is_empty() {
            return Err(FwaError::invalid("dimensions", "must not be empty"));
        }
        Ok(Self {
            dimensions,
            target,
            function,
        })
    }
}

impl<F> Problem for FunctionProblem<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    fn evaluate(&self, coordinates: &[f64]) -> f64 {
        (self.function)(coordinates)
    }

    fn target(&self) -> ProblemTarget {
        self.target
    }
}

impl<F> std::fmt::Debug for FunctionProblem<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionProblem")
            .field("dimensions", &self.dimensions)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
