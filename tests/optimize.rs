//! End-to-end runs through the public API.

use fireworks_opt::algorithm::{
    AlgorithmPhase, FireworksAlgorithm, FireworksStepper, FwaConfig, ParallelFireworksAlgorithm,
    ParallelFwaConfig,
};
use fireworks_opt::model::{AlgorithmState, Dimension, Range};
use fireworks_opt::mutation::SearchRetention;
use fireworks_opt::problem::{benchmark, Problem, ProblemTarget};
use fireworks_opt::stop::{EvaluationCountStopCondition, StepCountStopCondition, StopConditionExt};

/// Shifted paraboloid with its maximum at (1, -2).
struct Hill {
    dims: Vec<Dimension>,
}

impl Hill {
    fn new() -> Self {
        Self {
            dims: vec![Dimension::new(Range::new(-5.0, 5.0).unwrap()); 2],
        }
    }
}

impl Problem for Hill {
    fn dimensions(&self) -> &[Dimension] {
        &self.dims
    }

    fn evaluate(&self, x: &[f64]) -> f64 {
        -((x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2))
    }

    fn target(&self) -> ProblemTarget {
        ProblemTarget::Maximize
    }
}

#[test]
fn parallel_fwa_on_custom_problem() {
    let config = ParallelFwaConfig::default()
        .with_locations_number(6)
        .with_fixed_quantity_sparks(6)
        .with_search_explosions_count(3)
        .with_seed(2013);
    let mut fwa = ParallelFireworksAlgorithm::new(Hill::new(), StepCountStopCondition::new(100), config).unwrap();

    let result = fwa.run().unwrap();

    assert_eq!(result.steps, 100);
    assert_eq!(result.best_quality_history.len(), 101);
    assert!(result.best.quality() <= 0.0);
    assert!(result.best.quality() >= result.best_quality_history[0]);
    for &x in result.best.coordinates() {
        assert!((-5.0..5.0).contains(&x));
    }
}

#[test]
fn classic_fwa_finds_sphere_basin() {
    let mut fwa = FireworksAlgorithm::new(
        benchmark::sphere(2).unwrap(),
        StepCountStopCondition::new(300),
        FwaConfig::default().with_seed(2010),
    )
    .unwrap();

    let best = fwa.solve().unwrap();

    // initial fireworks start at quality >= 2 * 30²
    assert!(best.quality() < 1800.0, "best quality {}", best.quality());
    assert_eq!(fwa.phase(), AlgorithmPhase::Terminal);
}

#[test]
fn manual_stepping_matches_run() {
    let config = ParallelFwaConfig::default()
        .with_locations_number(4)
        .with_search_explosions_count(2)
        .with_search_retention(SearchRetention::LastRound)
        .with_seed(5);

    let mut stepped =
        ParallelFireworksAlgorithm::new(benchmark::rastrigin(3).unwrap(), StepCountStopCondition::new(15), config.clone())
            .unwrap();
    let mut state = stepped.create_initial_state().unwrap();
    let mut snapshots: Vec<AlgorithmState> = Vec::new();
    while !stepped.should_stop(&state) {
        stepped.make_step(&mut state).unwrap();
        snapshots.push(state.clone());
    }

    let mut ran =
        ParallelFireworksAlgorithm::new(benchmark::rastrigin(3).unwrap(), StepCountStopCondition::new(15), config)
            .unwrap();
    let result = ran.run().unwrap();

    assert_eq!(snapshots.len(), 15);
    assert_eq!(state.best_solution, result.best);
    assert_eq!(state.evaluations, result.evaluations);
    let stepped_history: Vec<f64> = snapshots.iter().map(|s| s.best_solution.quality()).collect();
    assert_eq!(&stepped_history[..], &result.best_quality_history[1..]);
}

#[test]
fn closure_and_composite_stop_conditions() {
    let mut seen_steps = Vec::new();
    let closure = |state: &AlgorithmState| {
        seen_steps.push(state.step_number);
        state.step_number >= 7
    };
    let stop = closure.or(EvaluationCountStopCondition::new(usize::MAX));

    let mut fwa = FireworksAlgorithm::new(
        benchmark::rastrigin(2).unwrap(),
        stop,
        FwaConfig::default().with_seed(1),
    )
    .unwrap();
    let result = fwa.run().unwrap();
    drop(fwa);

    assert_eq!(result.steps, 7);
    assert_eq!(seen_steps, (0..=7).collect::<Vec<_>>());
}
