//! Swarmbench
//!
//! Runs Particle Swarm, Firefly and Harmony Search over a suite of classic
//! continuous benchmark functions and exports per-experimentation statistics.
//!
//! ## Example Usage
//!
//! ```rust
//! use swarmbench::{ParameterFile, run_experiment};
//! use swarmbench_optimization::Algorithm;
//!
//! let params = ParameterFile::from_yaml_str(
//!     "population_size: 5\ndimensions: 2\nexperimentations: 3\nfunctions: [de_jong]\nseed: 1",
//! ).unwrap();
//! let experiment = params.resolve().unwrap();
//! let results = run_experiment(&experiment, &[Algorithm::Pso]).unwrap();
//! assert_eq!(results[0].1.len(), 1);
//! ```

pub mod config;
pub mod report;
pub mod suite;

pub use config::{BoundSpec, BoundValue, ConfigError, ConfigResult, Experiment, ParameterFile};
pub use report::{ReportError, ReportResult, ReportWriter, SummaryRow};
pub use suite::BenchmarkSuite;

use swarmbench_optimization::{Algorithm, Coordinator, EngineResult, FunctionRun};
use tracing::info;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}

/// Run each algorithm over the experiment's suite.
pub fn run_experiment(
    experiment: &Experiment,
    algorithms: &[Algorithm],
) -> EngineResult<Vec<(Algorithm, Vec<FunctionRun>)>> {
    info!(
        functions = experiment.suite.len(),
        algorithms = algorithms.len(),
        "Starting experiment"
    );
    let coordinator = Coordinator::new(&experiment.config, &experiment.suite)?;
    coordinator.run_all(algorithms)
}
