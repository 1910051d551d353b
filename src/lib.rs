//! Fireworks Algorithm (FWA) optimizers for bounded continuous problems.
//!
//! A population of candidate points (fireworks) is repeatedly exploded into
//! clouds of perturbed candidates (sparks), which are evaluated against the
//! objective and used to move the population toward better regions.
//!
//! Two formulations are provided:
//!
//! - **Parallel FWA** ([`algorithm::ParallelFireworksAlgorithm`]): one
//!   explosion per step with a population-wide adaptive amplitude, local
//!   search and attract-repulse moves toward the best solution. "Parallel"
//!   names the GPU-inspired formulation; everything runs on one thread.
//! - **Conventional FWA** ([`algorithm::FireworksAlgorithm`]): per-firework
//!   amplitudes and spark counts, Gaussian sparks and distance-based
//!   selection.
//!
//! Both are deterministic given a seed.
//!
//! # Architecture
//!
//! The algorithms are assembled from small strategy traits, each in its
//! own module: [`generation::SparkGenerator`], [`mutation::FireworkMutator`],
//! [`selection::FireworkSelector`], [`distribution::ContinuousDistribution`]
//! and [`stop::StopCondition`]. Users supply a [`problem::Problem`].
//!
//! # Examples
//!
//! ```
//! use fireworks_opt::algorithm::{FireworksStepper, ParallelFireworksAlgorithm, ParallelFwaConfig};
//! use fireworks_opt::model::{Dimension, Range};
//! use fireworks_opt::problem::{FunctionProblem, ProblemTarget};
//! use fireworks_opt::stop::StepCountStopCondition;
//!
//! let dims = vec![Dimension::new(Range::new(-10.0, 10.0).unwrap()); 2];
//! let problem = FunctionProblem::new(dims, ProblemTarget::Minimize, |x: &[f64]| {
//!     x.iter().map(|v| v * v).sum::<f64>()
//! })
//! .unwrap();
//!
//! let config = ParallelFwaConfig::default().with_locations_number(5).with_seed(7);
//! let mut fwa = ParallelFireworksAlgorithm::new(problem, StepCountStopCondition::new(50), config).unwrap();
//! let result = fwa.run().unwrap();
//! assert!(result.best.quality() <= result.best_quality_history[0]);
//! ```

pub mod algorithm;
pub mod distribution;
pub mod error;
pub mod explode;
pub mod generation;
pub mod model;
pub mod mutation;
pub mod problem;
pub mod selection;
pub mod stop;

pub use error::{FwaError, Result};
