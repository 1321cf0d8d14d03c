use ndarray::Array1;
use swarmbench_optimization::algorithms::*;
use swarmbench_optimization::common::*;
use swarmbench_optimization::{Algorithm, ConfigurationError, Coordinator, EngineResult, ExperimentRecorder, Population};

use rand::rngs::StdRng;
use rand::SeedableRng;

struct SphereProblem;

impl Evaluator for SphereProblem {
    fn evaluate(&self, variables: &Array1<f64>, function: FunctionId) -> EngineResult<f64> {
        match function {
            0 => Ok(variables.iter().map(|&x| x * x).sum()),
            // Shifted so the optimum is negative
            1 => Ok(variables.iter().map(|&x| (x - 1.0) * (x - 1.0)).sum::<f64>() - 10.0),
            _ => Err(ConfigurationError::UnknownFunction { id: function, available: 2 }),
        }
    }

    fn num_functions(&self) -> usize {
        2
    }
}

fn config(experimentations: usize) -> ExperimentConfig {
    ExperimentConfig {
        population_size: 20,
        dimensions: 2,
        experimentations,
        bounds: vec![Bounds::new(-10.0, 10.0), Bounds::new(-10.0, 10.0)],
        seed: Some(7),
        ..Default::default()
    }
}

#[test]
fn test_pso_sphere() {
    let problem = SphereProblem;
    let mut population = Population::new(&problem, 0, Bounds::new(-10.0, 10.0), 30, 2).unwrap();
    let mut recorder = ExperimentRecorder::with_candidate_history(300, 30).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let params = PsoParams {
        inertia: 0.5,
        ..Default::default()
    };
    let swarm = PSOSolver::new(params)
        .solve(&mut population, &mut recorder, &mut rng)
        .unwrap();

    assert!(swarm.global_best.fitness < 0.1, "PSO failed to minimize Sphere function: fitness {}", swarm.global_best.fitness);
}

#[test]
fn test_firefly_sphere() {
    let problem = SphereProblem;
    let mut population = Population::new(&problem, 0, Bounds::new(-10.0, 10.0), 20, 2).unwrap();
    let mut recorder = ExperimentRecorder::new(100, 20).unwrap();
    let mut rng = StdRng::seed_from_u64(2);

    FireflySolver::new(FireflyParams::default())
        .solve(&mut population, &mut recorder, &mut rng)
        .unwrap();

    let best = population.fitness(0);
    assert!(best < 1.0, "Firefly failed to minimize Sphere function: fitness {}", best);
}

#[test]
fn test_hs_sphere() {
    let problem = SphereProblem;
    let mut population = Population::new(&problem, 0, Bounds::new(-10.0, 10.0), 20, 2).unwrap();
    let mut recorder = ExperimentRecorder::new(5000, 20).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    HSSolver::new(HarmonyParams::default())
        .solve(&mut population, &mut recorder, &mut rng)
        .unwrap();

    let best = population.fitness(0);
    assert!(best < 1.0, "HS failed to minimize Sphere function: fitness {}", best);
}

#[test]
fn test_negative_costs_are_handled() {
    let problem = SphereProblem;
    let cfg = config(1500);
    let coordinator = Coordinator::new(&cfg, &problem).unwrap();

    for algorithm in Algorithm::ALL {
        let runs = coordinator.run(algorithm).unwrap();
        let shifted = &runs[1];
        let history = shifted.recorder.best_fitness_history();
        assert!(history.windows(2).all(|w| w[1] <= w[0]));
        assert!(shifted.best.fitness < -5.0, "{} stalled on negative costs: {}", algorithm, shifted.best.fitness);
    }
}

#[test]
fn test_summary_after_suite() {
    let problem = SphereProblem;
    let cfg = config(20);
    let coordinator = Coordinator::new(&cfg, &problem).unwrap();

    let runs = coordinator.run(Algorithm::Pso).unwrap();
    for run in &runs {
        let summary = run.recorder.summary().unwrap();
        assert!(summary.best <= summary.mean && summary.mean <= summary.worst);
        assert_eq!(summary.total_evaluations, 20 * 20);
        let final_fitness = run.recorder.final_fitness().unwrap();
        assert_eq!(final_fitness.len(), 20);
    }
}
