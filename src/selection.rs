//! Firework selection strategies.
//!
//! Selectors pick survivors from a set of evaluated fireworks without
//! modifying it. Unevaluated (`NaN`) fireworks rank last.
//!
//! # References
//!
//! - Tan & Zhu (2010), "Fireworks Algorithm for Optimization", Section 2.4

use rand::Rng;

use crate::model::Firework;
use crate::problem::ProblemTarget;

/// Picks a non-empty ordered subset of a population.
pub trait FireworkSelector {
    /// Returns the selected fireworks, best first.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    fn select_fireworks(&self, population: &[Firework]) -> Vec<Firework>;
}

/// Selects the single best firework.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestFireworkSelector {
    target: ProblemTarget,
}

impl BestFireworkSelector {
    pub fn new(target: ProblemTarget) -> Self {
        Self { target }
    }

    /// Index of the best firework in `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn best_index(&self, population: &[Firework]) -> usize {
        assert!(!population.is_empty(), "cannot select from empty population");
        population
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| self.target.compare(a.quality(), b.quality()))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

impl FireworkSelector for BestFireworkSelector {
    fn select_fireworks(&self, population: &[Firework]) -> Vec<Firework> {
        vec![population[self.best_index(population)].clone()]
    }
}

/// Selects the `k` best fireworks (fewer if the population is smaller).
#[derive(Debug, Clone, Copy)]
pub struct KBestFireworkSelector {
    target: ProblemTarget,
    k: usize,
}

impl KBestFireworkSelector {
    /// `k` is raised to 1 if zero.
    pub fn new(target: ProblemTarget, k: usize) -> Self {
        Self { target, k: k.max(1) }
    }
}

impl FireworkSelector for KBestFireworkSelector {
    fn select_fireworks(&self, population: &[Firework]) -> Vec<Firework> {
        assert!(!population.is_empty(), "cannot select from empty population");
        let mut order: Vec<usize> = (0..population.len()).collect();
        order.sort_by(|&a, &b| {
            self.target
                .compare(population[a].quality(), population[b].quality())
        });
        order
            .into_iter()
            .take(self.k)
            .map(|i| population[i].clone())
            .collect()
    }
}

/// Distance-based survivor selection (2010 paper).
///
/// Keeps the best firework, then draws the remaining `count - 1` without
/// replacement with probability proportional to
/// `R(x_i) = Σ_j ||x_i - x_j||`, favouring fireworks in sparse regions.
///
/// # Complexity
/// O(n²) distance computation, O(n·count) draws
#[derive(Debug, Clone, Copy)]
pub struct DistanceBasedSelector {
    target: ProblemTarget,
    count: usize,
}

impl DistanceBasedSelector {
    /// `count` is raised to 1 if zero.
    pub fn new(target: ProblemTarget, count: usize) -> Self {
        Self {
            target,
            count: count.max(1),
        }
    }

    /// Selects survivors, best first.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select_with_rng<R: Rng + ?Sized>(&self, population: &[Firework], rng: &mut R) -> Vec<Firework> {
        let best = BestFireworkSelector::new(self.target).best_index(population);
        let n = population.len();

        let distance_sums: Vec<f64> = population
            .iter()
            .map(|a| population.iter().map(|b| a.distance_to(b)).sum())
            .collect();

        let mut remaining: Vec<usize> = (0..n).filter(|&i| i != best).collect();
        let mut selected = Vec::with_capacity(self.count.min(n));
        selected.push(population[best].clone());

        while selected.len() < self.count && !remaining.is_empty() {
            let pos = roulette(&remaining, &distance_sums, rng);
            let idx = remaining.swap_remove(pos);
            selected.push(population[idx].clone());
        }

        selected
    }
}

/// Roulette over `candidates` weighted by `weights[candidate]`; returns a
/// position in `candidates`. Falls back to uniform when all weights are 0.
fn roulette<R: Rng + ?Sized>(candidates: &[usize], weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = candidates.iter().map(|&i| weights[i]).sum();
    if !(total > 0.0) || !total.is_finite() {
        return rng.random_range(0..candidates.len());
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (pos, &i) in candidates.iter().enumerate() {
        cumulative += weights[i];
        if cumulative > threshold {
            return pos;
        }
    }

    candidates.len() - 1 // floating-point fallback
}
