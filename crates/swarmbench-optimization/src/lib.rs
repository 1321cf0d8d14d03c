//! Population-based metaheuristics over a pluggable objective evaluator.
//!
//! One [`Population`] and one [`ExperimentRecorder`] exist per benchmark
//! function; the [`Coordinator`] hands each pair to a driver on its own worker.

pub mod algorithms;
pub mod common;
pub mod coordinator;
pub mod error;
pub mod population;
pub mod recorder;
pub mod sampling;

/// Re-export common types
pub use common::*;
pub use coordinator::{Algorithm, Coordinator, FunctionRun};
pub use error::{ConfigurationError, EngineResult};
pub use population::Population;
pub use recorder::{ExperimentRecorder, IterationStats, RunSummary};
