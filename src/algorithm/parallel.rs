//! Parallel Fireworks Algorithm (2013 GPU paper).

use std::cell::Cell;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;

use super::config::ParallelFwaConfig;
use super::{
    evaluate_population, next_step_number, refresh_best, require_problem, require_steppable,
    rng_from_seed, seeding_dimensions, AlgorithmPhase, FireworksStepper,
};
use crate::distribution::ContinuousUniform;
use crate::error::Result;
use crate::explode::ParallelExploder;
use crate::generation::{AttractRepulseSparkGenerator, InitialSparkGenerator, SparkGenerator};
use crate::model::{AlgorithmState, Explosion, Firework, FireworkType, MutableFirework};
use crate::mutation::{AttractRepulseMutator, FireworkMutator, SearchMutator};
use crate::problem::Problem;
use crate::selection::BestFireworkSelector;
use crate::stop::StopCondition;

/// The parallel formulation of the Fireworks Algorithm.
///
/// Each step builds one explosion around the best solution with the shared
/// amplitude, then, for every firework:
///
/// 1. runs `search_explosions_count` rounds of local search with
///    attract-repulse sparks around it (`fixed_quantity_sparks` per round);
/// 2. applies one more attract-repulse move.
///
/// The population is then re-evaluated, the best solution refreshed and the
/// amplitude for the next step recomputed from the new qualities.
///
/// # Examples
///
/// ```
/// use fireworks_opt::algorithm::{FireworksStepper, ParallelFireworksAlgorithm, ParallelFwaConfig};
/// use fireworks_opt::problem::benchmark;
/// use fireworks_opt::stop::StepCountStopCondition;
///
/// let problem = benchmark::sphere(2).unwrap();
/// let config = ParallelFwaConfig::default()
///     .with_locations_number(4)
///     .with_search_explosions_count(2)
///     .with_seed(1);
/// let mut fwa = ParallelFireworksAlgorithm::new(problem, StepCountStopCondition::new(10), config).unwrap();
/// let best = fwa.solve().unwrap();
/// assert!(best.quality().is_finite());
/// ```
pub struct ParallelFireworksAlgorithm<P, S, R = StdRng> {
    problem: P,
    stop_condition: S,
    config: ParallelFwaConfig,
    exploder: ParallelExploder,
    distribution: ContinuousUniform,
    rng: R,
    phase: AlgorithmPhase,
}

impl<P: Problem, S: StopCondition> ParallelFireworksAlgorithm<P, S, StdRng> {
    /// Creates the algorithm with a [`StdRng`] seeded from `config.seed`.
    pub fn new(problem: P, stop_condition: S, config: ParallelFwaConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(problem, stop_condition, config, rng)
    }
}

impl<P: Problem, S: StopCondition, R: Rng> ParallelFireworksAlgorithm<P, S, R> {
    /// Creates the algorithm with a caller-supplied random source.
    /// `config.seed` is ignored.
    ///
    /// Fails if the configuration is invalid or the problem has no dimensions.
    pub fn with_rng(problem: P, stop_condition: S, config: ParallelFwaConfig, rng: R) -> Result<Self> {
        config.validate()?;
        require_problem(&problem)?;
        let exploder = ParallelExploder::new(config.exploder_settings())?;
        let distribution = ContinuousUniform::around(1.0, config.delta)?;
        Ok(Self {
            problem,
            stop_condition,
            config,
            exploder,
            distribution,
            rng,
            phase: AlgorithmPhase::Uninitialized,
        })
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn config(&self) -> &ParallelFwaConfig {
        &self.config
    }
}

impl<P: Problem, S: StopCondition, R: Rng> FireworksStepper for ParallelFireworksAlgorithm<P, S, R> {
    fn phase(&self) -> AlgorithmPhase {
        self.phase
    }

    fn create_initial_state(&mut self) -> Result<AlgorithmState> {
        let explosion = Explosion::initial(self.config.locations_number);
        let dimensions = seeding_dimensions(&self.problem);
        let generator = InitialSparkGenerator::new(&dimensions)?;
        let mut fireworks: Vec<MutableFirework> = generator
            .create_sparks(&explosion, &mut self.rng)?
            .into_iter()
            .map(MutableFirework::from)
            .collect();

        let evaluations = evaluate_population(&self.problem, &mut fireworks);
        let best_solution = self.problem.best_of(&fireworks)?;
        debug!(
            "initial population of {} fireworks, best quality {}",
            fireworks.len(),
            best_solution.quality()
        );

        self.phase = AlgorithmPhase::Ready;
        Ok(AlgorithmState {
            step_number: 0,
            fireworks,
            best_solution,
            amplitude: self.config.amplitude,
            evaluations,
        })
    }

    fn should_stop(&mut self, state: &AlgorithmState) -> bool {
        self.stop_condition.should_stop(state)
    }

    fn make_step(&mut self, state: &mut AlgorithmState) -> Result<()> {
        require_steppable(self.phase, state)?;
        self.phase = AlgorithmPhase::Stepping;

        let (step_number, signed_step) = next_step_number(state)?;
        let epicenter = Firework::from_solution(
            FireworkType::SpecificSpark,
            state.step_number,
            &state.best_solution,
        );
        let explosion = self
            .exploder
            .explode(&epicenter, &state.qualities(), signed_step, state.amplitude)?;

        let problem = &self.problem;
        let dimensions = problem.dimensions();
        let search_evaluations = Cell::new(0usize);
        {
            let calculator = |sparks: &[Firework]| -> Vec<f64> {
                search_evaluations.set(search_evaluations.get() + sparks.len());
                sparks.iter().map(|s| problem.evaluate(s.coordinates())).collect()
            };
            let best = &state.best_solution;
            let searcher = SearchMutator::new(
                calculator,
                AttractRepulseSparkGenerator::new(best, dimensions, self.distribution)?,
                BestFireworkSelector::new(problem.target()),
                self.config.search_explosions_count,
            )?
            .with_retention(self.config.search_retention);
            let attract_repulse =
                AttractRepulseMutator::new(AttractRepulseSparkGenerator::new(best, dimensions, self.distribution)?);

            for (index, firework) in state.fireworks.iter_mut().enumerate() {
                let local = explosion.recentered(firework.as_firework().clone());
                searcher.mutate_firework(firework, &local, &mut self.rng)?;
                trace!("firework {index}: local search reached {}", firework.quality());
            }
            for firework in state.fireworks.iter_mut() {
                let local = explosion.recentered(firework.as_firework().clone());
                attract_repulse.mutate_firework(firework, &local, &mut self.rng)?;
            }
        }

        let evaluations = evaluate_population(problem, &mut state.fireworks);
        state.evaluations += search_evaluations.get() + evaluations;
        refresh_best(problem, state)?;
        state.step_number = step_number;
        state.amplitude = self
            .exploder
            .calculate_amplitude(&state.best_solution, &state.qualities())?;

        debug!(
            "step {}: best quality {}, amplitude {}, evaluations {}",
            state.step_number,
            state.best_solution.quality(),
            state.amplitude,
            state.evaluations
        );
        Ok(())
    }

    fn terminate(&mut self) {
        self.phase = AlgorithmPhase::Terminal;
    }
}

impl<P: std::fmt::Debug, S, R> std::fmt::Debug for ParallelFireworksAlgorithm<P, S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelFireworksAlgorithm")
            .field("problem", &self.problem)
            .field("config", &self.config)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::FwaResult;
    use crate::model::{Dimension, Range};
    use crate::mutation::SearchRetention;
    use crate::problem::{FunctionProblem, ProblemTarget};
    use crate::stop::{EvaluationCountStopCondition, StepCountStopCondition};
    use rand::SeedableRng;

    fn square(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn parabola() -> FunctionProblem<fn(&[f64]) -> f64> {
        let dims = vec![Dimension::new(Range::new(-10.0, 10.0).unwrap())];
        FunctionProblem::new(dims, ProblemTarget::Minimize, square as fn(&[f64]) -> f64).unwrap()
    }

    fn small_config() -> ParallelFwaConfig {
        ParallelFwaConfig::default()
            .with_locations_number(5)
            .with_fixed_quantity_sparks(4)
            .with_search_explosions_count(2)
            .with_seed(42)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = ParallelFireworksAlgorithm::new(
            parabola(),
            StepCountStopCondition::new(1),
            small_config().with_search_explosions_count(0),
        )
        .unwrap_err();
        assert_eq!(err.param(), "search_explosions_count");

        let err = ParallelFireworksAlgorithm::new(
            parabola(),
            StepCountStopCondition::new(1),
            small_config().with_delta(-0.5),
        )
        .unwrap_err();
        assert_eq!(err.param(), "delta");
    }

    #[test]
    fn test_initial_state() {
        let mut fwa =
            ParallelFireworksAlgorithm::new(parabola(), StepCountStopCondition::new(1), small_config()).unwrap();
        assert_eq!(fwa.phase(), AlgorithmPhase::Uninitialized);

        let state = fwa.create_initial_state().unwrap();
        assert_eq!(fwa.phase(), AlgorithmPhase::Ready);
        assert_eq!(state.step_number, 0);
        assert_eq!(state.fireworks.len(), 5);
        assert_eq!(state.evaluations, 5);
        assert_eq!(state.amplitude, 1.0);
        assert!(state.fireworks.iter().all(|f| f.is_evaluated()));
        let min = state.qualities().into_iter().fold(f64::INFINITY, f64::min);
        assert_eq!(state.best_solution.quality(), min);
    }

    #[test]
    fn test_make_step_before_init_fails() {
        let mut fwa =
            ParallelFireworksAlgorithm::new(parabola(), StepCountStopCondition::new(1), small_config()).unwrap();
        let mut other = ParallelFireworksAlgorithm::new(parabola(), StepCountStopCondition::new(1), small_config())
            .unwrap();
        let mut state = other.create_initial_state().unwrap();

        let err = fwa.make_step(&mut state).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(err.param(), "state");
    }

    #[test]
    fn test_make_step_after_terminate_fails() {
        let mut fwa =
            ParallelFireworksAlgorithm::new(parabola(), StepCountStopCondition::new(1), small_config()).unwrap();
        let mut state = fwa.create_initial_state().unwrap();
        fwa.terminate();
        assert_eq!(fwa.make_step(&mut state).unwrap_err().param(), "state");
    }

    #[test]
    fn test_step_invariants() {
        let mut fwa =
            ParallelFireworksAlgorithm::new(parabola(), StepCountStopCondition::new(10), small_config()).unwrap();
        let mut state = fwa.create_initial_state().unwrap();

        for expected_step in 1..=10 {
            let previous_best = state.best_solution.quality();
            let previous_evaluations = state.evaluations;
            fwa.make_step(&mut state).unwrap();

            assert_eq!(fwa.phase(), AlgorithmPhase::Stepping);
            assert_eq!(state.step_number, expected_step);
            assert_eq!(state.fireworks.len(), 5);
            assert!(state.fireworks.iter().all(|f| f.is_evaluated()));
            assert!(state.best_solution.quality() <= previous_best);
            // 5 fireworks × 2 rounds × 4 sparks, plus 5 re-evaluations
            assert_eq!(state.evaluations - previous_evaluations, 45);
            assert!((0.0..=1.0).contains(&state.amplitude));
            for f in &state.fireworks {
                assert!((-10.0..10.0).contains(&f.coordinates()[0]));
            }
        }
    }

    #[test]
    fn test_minimizes_parabola() {
        let mut fwa =
            ParallelFireworksAlgorithm::new(parabola(), StepCountStopCondition::new(200), small_config()).unwrap();
        let FwaResult {
            best,
            steps,
            best_quality_history,
            ..
        } = fwa.run().unwrap();

        assert_eq!(steps, 200);
        assert_eq!(fwa.phase(), AlgorithmPhase::Terminal);
        assert!(best.quality().is_finite());
        assert!(best.quality() <= best_quality_history[0]);
        assert!(best_quality_history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let run = |retention| {
            let config = small_config().with_search_retention(retention);
            ParallelFireworksAlgorithm::new(parabola(), StepCountStopCondition::new(20), config)
                .unwrap()
                .run()
                .unwrap()
        };
        for retention in [SearchRetention::LastRound, SearchRetention::BestOfRounds] {
            let a = run(retention);
            let b = run(retention);
            assert_eq!(a.best, b.best);
            assert_eq!(a.best_quality_history, b.best_quality_history);
        }
    }

    #[test]
    fn test_with_rng_and_evaluation_budget() {
        let rng = StdRng::seed_from_u64(9);
        let mut fwa = ParallelFireworksAlgorithm::with_rng(
            parabola(),
            EvaluationCountStopCondition::new(500),
            small_config(),
            rng,
        )
        .unwrap();
        let result = fwa.run().unwrap();
        assert!(result.evaluations >= 500);
        assert!(result.evaluations < 500 + 45);
    }

    #[test]
    fn test_maximize() {
        let dims = vec![Dimension::new(Range::new(-10.0, 10.0).unwrap()); 2];
        let problem = FunctionProblem::new(dims, ProblemTarget::Maximize, |x: &[f64]| -square(x)).unwrap();
        let mut fwa = ParallelFireworksAlgorithm::new(problem, StepCountStopCondition::new(50), small_config()).unwrap();
        let result = fwa.run().unwrap();
        assert!(result.best_quality_history.windows(2).all(|w| w[1] >= w[0]));
        assert!(result.best.quality() <= 0.0);
    }
}
