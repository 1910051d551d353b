//! Conventional Fireworks Algorithm (2010 paper).

use std::collections::BTreeMap;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;

use super::config::FwaConfig;
use super::{
    evaluate_population, next_step_number, refresh_best, require_problem, require_steppable,
    rng_from_seed, seeding_dimensions, AlgorithmPhase, FireworksStepper,
};
use crate::error::Result;
use crate::explode::ClassicExploder;
use crate::generation::{
    ExplosionSparkGenerator, GaussianSparkGenerator, InitialSparkGenerator, SparkGenerator,
};
use crate::model::{AlgorithmState, Explosion, Firework, FireworkType, MutableFirework};
use crate::problem::Problem;
use crate::selection::DistanceBasedSelector;
use crate::stop::StopCondition;

/// The conventional Fireworks Algorithm.
///
/// Per step:
///
/// 1. every firework explodes with its own amplitude and spark count
///    (better fireworks: more sparks, smaller amplitude);
/// 2. `specific_sparks_number` Gaussian sparks are made, each from a
///    uniformly chosen firework;
/// 3. the new sparks are evaluated and `locations_number` survivors are
///    picked from fireworks and sparks by distance-based selection.
///
/// # Examples
///
/// ```
/// use fireworks_opt::algorithm::{FireworksAlgorithm, FireworksStepper, FwaConfig};
/// use fireworks_opt::problem::benchmark;
/// use fireworks_opt::stop::StepCountStopCondition;
///
/// let problem = benchmark::rastrigin(2).unwrap();
/// let config = FwaConfig::default().with_seed(3);
/// let mut fwa = FireworksAlgorithm::new(problem, StepCountStopCondition::new(20), config).unwrap();
/// let result = fwa.run().unwrap();
/// assert_eq!(result.steps, 20);
/// ```
pub struct FireworksAlgorithm<P, S, R = StdRng> {
    problem: P,
    stop_condition: S,
    config: FwaConfig,
    exploder: ClassicExploder,
    rng: R,
    phase: AlgorithmPhase,
}

impl<P: Problem, S: StopCondition> FireworksAlgorithm<P, S, StdRng> {
    /// Creates the algorithm with a [`StdRng`] seeded from `config.seed`.
    pub fn new(problem: P, stop_condition: S, config: FwaConfig) -> Result<Self> {
        let rng = rng_from_seed(config.seed);
        Self::with_rng(problem, stop_condition, config, rng)
    }
}

impl<P: Problem, S: StopCondition, R: Rng> FireworksAlgorithm<P, S, R> {
    /// Creates the algorithm with a caller-supplied random source.
    /// `config.seed` is ignored.
    pub fn with_rng(problem: P, stop_condition: S, config: FwaConfig, rng: R) -> Result<Self> {
        config.validate()?;
        require_problem(&problem)?;
        let exploder = ClassicExploder::new(config.exploder_settings(), problem.target())?;
        Ok(Self {
            problem,
            stop_condition,
            config,
            exploder,
            rng,
            phase: AlgorithmPhase::Uninitialized,
        })
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn config(&self) -> &FwaConfig {
        &self.config
    }

    fn gaussian_sparks(&mut self, fireworks: &[MutableFirework], step_number: usize) -> Result<Vec<Firework>> {
        let generator = GaussianSparkGenerator::new(self.problem.dimensions())?;
        let mut sparks = Vec::with_capacity(self.config.specific_sparks_number);
        for _ in 0..self.config.specific_sparks_number {
            let source = &fireworks[self.rng.random_range(0..fireworks.len())];
            let explosion = Explosion::new(
                source.as_firework().clone(),
                step_number,
                0.0,
                BTreeMap::from([(FireworkType::SpecificSpark, 1)]),
            );
            sparks.push(generator.create_spark(&explosion, &mut self.rng)?);
        }
        Ok(sparks)
    }
}

impl<P: Problem, S: StopCondition, R: Rng> FireworksStepper for FireworksAlgorithm<P, S, R> {
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

        self.phase = AlgorithmPhase::Ready;
        Ok(AlgorithmState {
            step_number: 0,
            fireworks,
            best_solution,
            amplitude: self.config.explosion_sparks_maximum_amplitude,
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
        let qualities = state.qualities();
        let mut candidates: Vec<Firework> = state.fireworks.iter().map(|f| f.as_firework().clone()).collect();
        let existing = candidates.len();

        let explosion_generator = ExplosionSparkGenerator::new(self.problem.dimensions())?;
        for firework in &state.fireworks {
            let explosion = self.exploder.explode(firework.as_firework(), &qualities, signed_step)?;
            trace!(
                "firework at quality {}: {} sparks, amplitude {}",
                firework.quality(),
                explosion.spark_count(FireworkType::ExplosionSpark),
                explosion.amplitude()
            );
            candidates.extend(explosion_generator.create_sparks(&explosion, &mut self.rng)?);
        }
        candidates.extend(self.gaussian_sparks(&state.fireworks, step_number)?);

        for spark in &mut candidates[existing..] {
            spark.set_quality(self.problem.evaluate(spark.coordinates()));
        }
        state.evaluations += candidates.len() - existing;

        let survivors = DistanceBasedSelector::new(self.problem.target(), state.fireworks.len())
            .select_with_rng(&candidates, &mut self.rng);
        for (slot, survivor) in state.fireworks.iter_mut().zip(&survivors) {
            slot.update(survivor);
        }

        refresh_best(&self.problem, state)?;
        state.step_number = step_number;

        debug!(
            "step {}: {} candidates, best quality {}, evaluations {}",
            state.step_number,
            candidates.len(),
            state.best_solution.quality(),
            state.evaluations
        );
        Ok(())
    }

    fn terminate(&mut self) {
        self.phase = AlgorithmPhase::Terminal;
    }
}

impl<P: std::fmt::Debug, S, R> std::fmt::Debug for FireworksAlgorithm<P, S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FireworksAlgorithm")
            .field("problem", &self.problem)
            .field("config", &self.config)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
