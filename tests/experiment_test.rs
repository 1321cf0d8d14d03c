use std::fs;
use swarmbench::{run_experiment, ParameterFile, ReportWriter};
use swarmbench_optimization::{Algorithm, ConfigurationError};

const PARAMS: &str = r#"
population_size: 10
dimensions: 3
experimentations: 15
functions: [de_jong, rastrigin, michalewicz]
bounds:
  - { lower: -100, upper: 100 }
  - { lower: -30, upper: 30 }
  - { lower: 0, upper: pi }
seed: 2024
"#;

#[test]
fn test_full_pipeline_writes_reports() {
    let experiment = ParameterFile::from_yaml_str(PARAMS).unwrap().resolve().unwrap();
    let results = run_experiment(&experiment, &Algorithm::ALL).unwrap();
    assert_eq!(results.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let writer = ReportWriter::new(dir.path());
    for (algorithm, runs) in &results {
        assert_eq!(runs.len(), 3);
        for run in runs {
            assert!(run.recorder.is_complete());
            let bounds = experiment.config.bounds[run.function];
            assert!(run.best.variables.iter().all(|&v| bounds.contains(v)));
        }
        writer.write(*algorithm, runs, &experiment.suite).unwrap();
    }

    for name in ["pso", "ffa", "hs"] {
        let best = fs::read_to_string(dir.path().join(name).join("best_fitness.csv")).unwrap();
        let lines: Vec<&str> = best.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("de_jong,"));
        assert!(lines[3].starts_with("michalewicz,"));
        assert_eq!(lines[1].split(',').count(), 16);
    }
    for function in 0..3 {
        let path = dir.path().join("pso/historic_fitness").join(format!("function_{}.csv", function));
        assert!(path.exists());
    }
}

#[test]
fn test_seeded_experiment_is_reproducible() {
    let experiment = ParameterFile::from_yaml_str(PARAMS).unwrap().resolve().unwrap();
    let first = run_experiment(&experiment, &[Algorithm::Firefly, Algorithm::Harmony]).unwrap();
    let second = run_experiment(&experiment, &[Algorithm::Firefly, Algorithm::Harmony]).unwrap();

    for ((_, a), (_, b)) in first.iter().zip(second.iter()) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.recorder.best_fitness_history(), y.recorder.best_fitness_history());
            assert_eq!(x.recorder.worst_fitness_history(), y.recorder.worst_fitness_history());
        }
    }
}

#[test]
fn test_invalid_constants_fail_before_running() {
    let mut params = ParameterFile::from_yaml_str(PARAMS).unwrap();
    params.harmony.hmcr = 1.2;
    assert!(params.resolve().is_err());

    // Bypassing the file checks still cannot start a run
    let mut experiment = ParameterFile::from_yaml_str(PARAMS).unwrap().resolve().unwrap();
    experiment.config.bounds.pop();
    assert_eq!(
        run_experiment(&experiment, &[Algorithm::Pso]).err(),
        Some(ConfigurationError::MissingBounds(2))
    );
}
