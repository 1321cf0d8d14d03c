//! Error types for the optimization engine

use thiserror::Error;

/// Configuration and programmer errors.
///
/// Numeric degeneracies (zero draws) and bound violations are handled locally
/// by re-sampling and clamping; they never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Function id outside the evaluator's known range
    #[error("Unknown benchmark function {id} (evaluator knows {available})")]
    UnknownFunction { id: usize, available: usize },

    /// Candidate, dimension or experimentation index outside its range
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Bounds are not finite or not ordered
    #[error("Invalid bounds for function {function}: [{lower}, {upper}]")]
    InvalidBounds {
        function: usize,
        lower: f64,
        upper: f64,
    },

    /// No bounds were supplied for a function
    #[error("Missing bounds for function {0}")]
    MissingBounds(usize),

    /// Population needs at least one candidate
    #[error("Population size must be at least 1")]
    EmptyPopulation,

    /// Solutions need at least one dimension
    #[error("Solution dimension must be at least 1")]
    ZeroDimension,

    /// Recorder needs at least one experimentation
    #[error("Experimentation count must be at least 1")]
    ZeroExperimentations,

    /// Vector length does not match the population dimension
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Algorithm constant outside its valid domain
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type EngineResult<T> = Result<T, ConfigurationError>;
