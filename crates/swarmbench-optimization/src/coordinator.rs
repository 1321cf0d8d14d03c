//! Fans a run out to one worker per benchmark function.
//!
//! Each worker owns its population, its recorder and its generator. Workers
//! share only the read-only configuration and evaluator, and the coordinator
//! blocks until every worker of an algorithm has finished.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::algorithms::{FireflySolver, HSSolver, PSOSolver};
use crate::common::{Evaluator, ExperimentConfig, FunctionId, Individual};
use crate::error::{ConfigurationError, EngineResult};
use crate::population::Population;
use crate::recorder::ExperimentRecorder;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Pso,
    Firefly,
    Harmony,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Pso, Algorithm::Firefly, Algorithm::Harmony];

    /// Short name used for report directories.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Pso => "pso",
            Algorithm::Firefly => "ffa",
            Algorithm::Harmony => "hs",
        }
    }

    fn seed_offset(&self) -> u64 {
        match self {
            Algorithm::Pso => 0,
            Algorithm::Firefly => 1 << 32,
            Algorithm::Harmony => 2 << 32,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Algorithm::Pso => "Particle Swarm",
            Algorithm::Firefly => "Firefly",
            Algorithm::Harmony => "Harmony Search",
        };
        f.write_str(label)
    }
}

impl FromStr for Algorithm {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pso" | "particle-swarm" => Ok(Algorithm::Pso),
            "ffa" | "firefly" => Ok(Algorithm::Firefly),
            "hs" | "harmony" => Ok(Algorithm::Harmony),
            _ => Err(ConfigurationError::InvalidParameter {
                name: "algorithm",
                reason: format!("unknown algorithm '{}'", s),
            }),
        }
    }
}

/// Outcome of one (function, algorithm) worker.
#[derive(Clone, Debug)]
pub struct FunctionRun {
    pub function: FunctionId,
    pub algorithm: Algorithm,
    pub recorder: ExperimentRecorder,
    /// Best candidate at the end of the run (global best for PSO)
    pub best: Individual,
}

pub struct Coordinator<'a> {
    config: &'a ExperimentConfig,
    evaluator: &'a dyn Evaluator,
}

impl<'a> Coordinator<'a> {
    /// Validate the whole configuration up front so workers never start on a
    /// structurally broken setup.
    pub fn new(config: &'a ExperimentConfig, evaluator: &'a dyn Evaluator) -> EngineResult<Self> {
        validate(config, evaluator)?;
        Ok(Self { config, evaluator })
    }

    pub fn config(&self) -> &ExperimentConfig {
        self.config
    }

    /// Run one algorithm on one function with a worker-local generator.
    pub fn run_function(&self, algorithm: Algorithm, function: FunctionId) -> EngineResult<FunctionRun> {
        let config = self.config;
        let bounds = *config.bounds.get(function).ok_or(ConfigurationError::UnknownFunction {
            id: function,
            available: config.num_functions(),
        })?;

        let mut rng = self.worker_rng(algorithm, function);
        let mut population = Population::new(
            self.evaluator,
            function,
            bounds,
            config.population_size,
            config.dimensions,
        )?;

        info!(function, %algorithm, "Worker started");

        let (recorder, best) = match algorithm {
            Algorithm::Pso => {
                let mut recorder =
                    ExperimentRecorder::with_candidate_history(config.experimentations, config.population_size)?;
                let swarm = PSOSolver::new(config.pso.clone()).solve(&mut population, &mut recorder, &mut rng)?;
                (recorder, swarm.global_best)
            }
            Algorithm::Firefly => {
                let mut recorder = ExperimentRecorder::new(config.experimentations, config.population_size)?;
                FireflySolver::new(config.firefly.clone()).solve(&mut population, &mut recorder, &mut rng)?;
                (recorder, population.individual(0).clone())
            }
            Algorithm::Harmony => {
                let mut recorder = ExperimentRecorder::new(config.experimentations, config.population_size)?;
                HSSolver::new(config.harmony.clone()).solve(&mut population, &mut recorder, &mut rng)?;
                (recorder, population.individual(0).clone())
            }
        };

        info!(function, %algorithm, best = best.fitness, "Worker finished");
        Ok(FunctionRun {
            function,
            algorithm,
            recorder,
            best,
        })
    }

    /// Run one algorithm over every function, one worker per function.
    /// Results come back in function-id order.
    pub fn run(&self, algorithm: Algorithm) -> EngineResult<Vec<FunctionRun>> {
        let n = self.config.num_functions();
        let runs = if self.config.parallel {
            (0..n)
                .into_par_iter()
                .map(|function| self.run_function(algorithm, function))
                .collect::<EngineResult<Vec<_>>>()?
        } else {
            (0..n)
                .map(|function| self.run_function(algorithm, function))
                .collect::<EngineResult<Vec<_>>>()?
        };

        info!(%algorithm, functions = n, "Suite completed");
        Ok(runs)
    }

    /// Run each algorithm in turn; each fan-out is joined before the next starts.
    pub fn run_all(&self, algorithms: &[Algorithm]) -> EngineResult<Vec<(Algorithm, Vec<FunctionRun>)>> {
        algorithms
            .iter()
            .map(|&algorithm| Ok((algorithm, self.run(algorithm)?)))
            .collect()
    }

    fn worker_rng(&self, algorithm: Algorithm, function: FunctionId) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(
                seed.wrapping_add(algorithm.seed_offset())
                    .wrapping_add(function as u64),
            ),
            None => StdRng::from_entropy(),
        }
    }
}

fn validate(config: &ExperimentConfig, evaluator: &dyn Evaluator) -> EngineResult<()> {
    config.validate()?;

    let available = evaluator.num_functions();
    if config.num_functions() > available {
        return Err(ConfigurationError::UnknownFunction {
            id: available,
            available,
        });
    }
    if config.num_functions() < available {
        return Err(ConfigurationError::MissingBounds(config.num_functions()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Bounds, SimpleEvaluator};
    use ndarray::Array1;

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|&v| v * v).sum()
    }

    fn abs_sum(x: &Array1<f64>) -> f64 {
        x.iter().map(|v| v.abs()).sum()
    }

    fn evaluator() -> SimpleEvaluator<fn(&Array1<f64>) -> f64> {
        SimpleEvaluator::new(vec![sphere as fn(&Array1<f64>) -> f64, abs_sum])
    }

    fn config() -> ExperimentConfig {
        ExperimentConfig {
            population_size: 8,
            dimensions: 3,
            experimentations: 12,
            bounds: vec![Bounds::new(-5.0, 5.0), Bounds::new(-1.0, 2.0)],
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_algorithm_names_parse() {
        assert_eq!("PSO".parse::<Algorithm>().unwrap(), Algorithm::Pso);
        assert_eq!("particle-swarm".parse::<Algorithm>().unwrap(), Algorithm::Pso);
        assert_eq!("firefly".parse::<Algorithm>().unwrap(), Algorithm::Firefly);
        assert_eq!("hs".parse::<Algorithm>().unwrap(), Algorithm::Harmony);
        assert!("ga".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::Firefly.name(), "ffa");
    }

    #[test]
    fn test_structural_errors_surface_at_setup() {
        let eval = evaluator();

        let mut cfg = config();
        cfg.bounds.push(Bounds::new(0.0, 1.0));
        assert_eq!(
            Coordinator::new(&cfg, &eval).err(),
            Some(ConfigurationError::UnknownFunction { id: 2, available: 2 })
        );

        let mut cfg = config();
        cfg.bounds.pop();
        assert_eq!(Coordinator::new(&cfg, &eval).err(), Some(ConfigurationError::MissingBounds(1)));

        let mut cfg = config();
        cfg.bounds[1] = Bounds::new(3.0, 3.0);
        assert!(matches!(
            Coordinator::new(&cfg, &eval),
            Err(ConfigurationError::InvalidBounds { function: 1, .. })
        ));

        let mut cfg = config();
        cfg.harmony.par = 1.5;
        assert!(matches!(
            Coordinator::new(&cfg, &eval),
            Err(ConfigurationError::InvalidParameter { name: "harmony.par", .. })
        ));
    }

    #[test]
    fn test_unknown_function_id_is_an_error() {
        let eval = evaluator();
        let cfg = config();
        let coordinator = Coordinator::new(&cfg, &eval).unwrap();
        assert_eq!(
            coordinator.run_function(Algorithm::Harmony, 7).err(),
            Some(ConfigurationError::UnknownFunction { id: 7, available: 2 })
        );
    }

    #[test]
    fn test_every_worker_completes_its_recorder() {
        let eval = evaluator();
        let cfg = config();
        let coordinator = Coordinator::new(&cfg, &eval).unwrap();

        let results = coordinator.run_all(&Algorithm::ALL).unwrap();
        assert_eq!(results.len(), 3);
        for (algorithm, runs) in &results {
            assert_eq!(runs.len(), 2);
            for (function, run) in runs.iter().enumerate() {
                assert_eq!(run.function, function);
                assert_eq!(run.algorithm, *algorithm);
                assert!(run.recorder.is_complete());
                assert_eq!(run.recorder.experimentations(), 12);
                assert_eq!(run.best.fitness, run.recorder.best_fitness(11));
            }
        }
        let pso_runs = &results[0].1;
        assert!(pso_runs[0].recorder.personal_best().is_some());
        assert!(results[1].1[0].recorder.personal_best().is_none());
    }

    #[test]
    fn test_seeded_runs_match_across_schedules() {
        let eval = evaluator();
        let parallel = config();
        let sequential = ExperimentConfig {
            parallel: false,
            ..config()
        };

        for algorithm in Algorithm::ALL {
            let a = Coordinator::new(&parallel, &eval).unwrap().run(algorithm).unwrap();
            let b = Coordinator::new(&sequential, &eval).unwrap().run(algorithm).unwrap();
            for (x, y) in a.iter().zip(b.iter()) {
                assert_eq!(x.recorder.best_fitness_history(), y.recorder.best_fitness_history());
                assert_eq!(x.recorder.final_fitness(), y.recorder.final_fitness());
                assert_eq!(x.best.variables, y.best.variables);
            }
        }
    }
}
