//! Value types shared by every component.
//!
//! - [`Range`] / [`Dimension`]: the bounded search space
//! - [`Firework`] / [`MutableFirework`]: population members and sparks
//! - [`Solution`]: best-known point
//! - [`Explosion`]: per-step spark-generation descriptor
//! - [`AlgorithmState`]: population, best solution and counters of a run

mod explosion;
mod firework;
mod range;
mod state;

pub use explosion::Explosion;
pub use firework::{Firework, FireworkType, MutableFirework, Solution};
pub use range::{Dimension, Range};
pub use state::AlgorithmState;
