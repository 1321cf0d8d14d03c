use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, EngineResult};

/// Index of a benchmark function inside an evaluator's suite.
pub type FunctionId = usize;

/// Represents a candidate solution in the optimization space.
///
/// The position and its fitness travel together so a candidate can never be
/// moved without its fitness moving with it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Individual {
    pub variables: Array1<f64>,
    pub fitness: f64,
}

impl Individual {
    pub fn new(variables: Array1<f64>, fitness: f64) -> Self {
        Self { variables, fitness }
    }
}

/// Maps a solution vector and a function id to a scalar cost.
///
/// Implementations must be pure: the same input always yields the same cost.
pub trait Evaluator: Send + Sync {
    /// Cost of `variables` under benchmark function `function`.
    /// Unknown ids are a configuration error.
    fn evaluate(&self, variables: &Array1<f64>, function: FunctionId) -> EngineResult<f64>;

    /// Number of functions this evaluator knows; valid ids are `0..num_functions()`.
    fn num_functions(&self) -> usize;
}

/// An evaluator backed by a list of closures, one per function id.
pub struct SimpleEvaluator<F>
where
    F: Fn(&Array1<f64>) -> f64 + Send + Sync,
{
    pub functions: Vec<F>,
}

impl<F> SimpleEvaluator<F>
where
    F: Fn(&Array1<f64>) -> f64 + Send + Sync,
{
    pub fn new(functions: Vec<F>) -> Self {
        Self { functions }
    }
}

impl<F> Evaluator for SimpleEvaluator<F>
where
    F: Fn(&Array1<f64>) -> f64 + Send + Sync,
{
    fn evaluate(&self, variables: &Array1<f64>, function: FunctionId) -> EngineResult<f64> {
        let f = self.functions.get(function).ok_or(
            ConfigurationError::UnknownFunction {
                id: function,
                available: self.functions.len(),
            },
        )?;
        Ok(f(variables))
    }

    fn num_functions(&self) -> usize {
        self.functions.len()
    }
}

/// Closed search interval shared by every dimension of a function.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn range(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn is_valid(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite() && self.lower < self.upper
    }
}

/// Particle swarm constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PsoParams {
    /// Cognitive weight (pbest)
    pub c1: f64,
    /// Social weight (gbest)
    pub c2: f64,
    /// Dampening constant `k` applied to the attraction terms
    pub dampener: f64,
    /// Weight of the previous velocity; 0 drops it entirely
    pub inertia: f64,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            c1: 1.5,
            c2: 1.5,
            dampener: 0.7,
            inertia: 0.0,
        }
    }
}

/// Firefly constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireflyParams {
    /// Randomization parameter
    pub alpha: f64,
    /// Attractiveness at r=0
    pub beta0: f64,
    /// Light absorption coefficient
    pub gamma: f64,
}

impl Default for FireflyParams {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            beta0: 1.0,
            gamma: 1.0,
        }
    }
}

/// Harmony search constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyParams {
    /// Harmony Memory Consideration Rate (0.7-0.95)
    pub hmcr: f64,
    /// Pitch Adjustment Rate (0.1-0.5)
    pub par: f64,
    /// Bandwidth (absolute step size)
    pub bandwidth: f64,
}

impl Default for HarmonyParams {
    fn default() -> Self {
        Self {
            hmcr: 0.9,
            par: 0.3,
            bandwidth: 0.01,
        }
    }
}

/// Already-validated configuration for a whole experiment.
///
/// `bounds[f]` holds the search interval of function id `f`, so `bounds.len()`
/// is the number of benchmark functions the run covers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub population_size: usize,
    pub dimensions: usize,
    pub experimentations: usize,
    pub bounds: Vec<Bounds>,
    pub pso: PsoParams,
    pub firefly: FireflyParams,
    pub harmony: HarmonyParams,
    /// Base seed; each worker derives its own generator from it.
    pub seed: Option<u64>,
    /// Run one worker per function concurrently.
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            dimensions: 10,
            experimentations: 50,
            bounds: Vec::new(),
            pso: PsoParams::default(),
            firefly: FireflyParams::default(),
            harmony: HarmonyParams::default(),
            seed: None,
            parallel: true,
        }
    }
}

impl ExperimentConfig {
    pub fn num_functions(&self) -> usize {
        self.bounds.len()
    }

    /// Structural checks that do not depend on the evaluator.
    pub fn validate(&self) -> EngineResult<()> {
        if self.population_size == 0 {
            return Err(ConfigurationError::EmptyPopulation);
        }
        if self.dimensions == 0 {
            return Err(ConfigurationError::ZeroDimension);
        }
        if self.experimentations == 0 {
            return Err(ConfigurationError::ZeroExperimentations);
        }
        for (function, bounds) in self.bounds.iter().enumerate() {
            if !bounds.is_valid() {
                return Err(ConfigurationError::InvalidBounds {
                    function,
                    lower: bounds.lower,
                    upper: bounds.upper,
                });
            }
        }

        check_unit("harmony.hmcr", self.harmony.hmcr)?;
        check_unit("harmony.par", self.harmony.par)?;
        check_non_negative("harmony.bandwidth", self.harmony.bandwidth)?;
        check_non_negative("firefly.gamma", self.firefly.gamma)?;
        check_non_negative("firefly.alpha", self.firefly.alpha)?;
        check_finite("firefly.beta0", self.firefly.beta0)?;
        check_finite("pso.c1", self.pso.c1)?;
        check_finite("pso.c2", self.pso.c2)?;
        check_finite("pso.dampener", self.pso.dampener)?;
        check_finite("pso.inertia", self.pso.inertia)?;
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(ConfigurationError::InvalidParameter {
            name,
            reason: format!("{} is not finite", value),
        });
    }
    Ok(())
}

fn check_unit(name: &'static str, value: f64) -> EngineResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigurationError::InvalidParameter {
            name,
            reason: format!("{} is outside [0, 1]", value),
        });
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f64) -> EngineResult<()> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigurationError::InvalidParameter {
            name,
            reason: format!("{} is negative", value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExperimentConfig {
            bounds: vec![Bounds::new(-1.0, 1.0)],
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_bounds_checks() {
        let b = Bounds::new(-2.0, 3.0);
        assert_eq!(b.range(), 5.0);
        assert_eq!(b.clamp(7.0), 3.0);
        assert_eq!(b.clamp(-9.0), -2.0);
        assert!(b.contains(-2.0) && b.contains(3.0));
        assert!(!Bounds::new(1.0, 1.0).is_valid());
        assert!(!Bounds::new(f64::NEG_INFINITY, 1.0).is_valid());
    }

    #[test]
    fn test_invalid_constants_are_rejected() {
        let mut config = ExperimentConfig {
            bounds: vec![Bounds::new(-1.0, 1.0)],
            ..Default::default()
        };
        config.firefly.gamma = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidParameter { name: "firefly.gamma", .. })
        ));

        config.firefly.gamma = 1.0;
        config.experimentations = 0;
        assert_eq!(config.validate(), Err(ConfigurationError::ZeroExperimentations));
    }

    #[test]
    fn test_simple_evaluator_rejects_unknown_id() {
        let eval = SimpleEvaluator::new(vec![|x: &Array1<f64>| x.sum()]);
        assert_eq!(eval.evaluate(&Array1::ones(3), 0), Ok(3.0));
        assert_eq!(
            eval.evaluate(&Array1::ones(3), 1),
            Err(ConfigurationError::UnknownFunction { id: 1, available: 1 })
        );
    }
}
