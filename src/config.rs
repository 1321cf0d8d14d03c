//! Parameter files
//!
//! A parameter file selects the benchmark functions, their search bounds, the
//! run sizes and the algorithm constants. It is read from YAML, or JSON when
//! the path ends in `.json`, and resolved into an engine [`ExperimentConfig`]
//! plus the [`BenchmarkSuite`] it runs over.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;
use swarmbench_functions::BenchmarkFunction;
use swarmbench_optimization::{
    Bounds, ConfigurationError, ExperimentConfig, FireflyParams, HarmonyParams, PsoParams,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::suite::BenchmarkSuite;

/// Parameter file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Name matches no benchmark function
    #[error("Unknown benchmark function: {0}")]
    UnknownFunction(String),

    /// Bound literal is neither a number nor a multiple of pi
    #[error("Invalid bound value: {0}")]
    InvalidBound(String),

    #[error("Invalid parameter file: {0}")]
    Invalid(String),

    /// Rejected by the engine's own checks
    #[error("Configuration error: {0}")]
    Engine(#[from] ConfigurationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A bound as written in a parameter file: a number, or a literal such as
/// `pi`, `-pi`, `2pi` or `0.5*pi`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundValue {
    Number(f64),
    Literal(String),
}

impl BoundValue {
    pub fn resolve(&self) -> ConfigResult<f64> {
        match self {
            BoundValue::Number(value) => Ok(*value),
            BoundValue::Literal(text) => parse_literal(text),
        }
    }
}

impl From<f64> for BoundValue {
    fn from(value: f64) -> Self {
        BoundValue::Number(value)
    }
}

fn parse_literal(text: &str) -> ConfigResult<f64> {
    let cleaned: String = text.trim().to_ascii_lowercase().replace(' ', "");
    let (sign, magnitude) = match cleaned.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, cleaned.trim_start_matches('+')),
    };

    let value = match magnitude.strip_suffix("pi") {
        Some("") => PI,
        Some(factor) => {
            let factor = factor.trim_end_matches('*');
            factor
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidBound(text.to_string()))?
                * PI
        }
        None => magnitude
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidBound(text.to_string()))?,
    };
    Ok(sign * value)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundSpec {
    pub lower: BoundValue,
    pub upper: BoundValue,
}

impl BoundSpec {
    pub fn resolve(&self) -> ConfigResult<Bounds> {
        Ok(Bounds::new(self.lower.resolve()?, self.upper.resolve()?))
    }
}

/// On-disk shape of a parameter file. Every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterFile {
    pub population_size: usize,
    pub dimensions: usize,
    pub experimentations: usize,
    /// Function names or aliases; empty selects the full suite
    pub functions: Vec<String>,
    /// One entry per selected function; empty uses each function's default domain
    pub bounds: Vec<BoundSpec>,
    pub pso: PsoParams,
    pub firefly: FireflyParams,
    pub harmony: HarmonyParams,
    pub seed: Option<u64>,
    pub parallel: bool,
}

impl Default for ParameterFile {
    fn default() -> Self {
        let engine = ExperimentConfig::default();
        Self {
            population_size: engine.population_size,
            dimensions: engine.dimensions,
            experimentations: engine.experimentations,
            functions: Vec::new(),
            bounds: Vec::new(),
            pso: engine.pso,
            firefly: engine.firefly,
            harmony: engine.harmony,
            seed: engine.seed,
            parallel: engine.parallel,
        }
    }
}

/// A resolved, validated run description.
#[derive(Clone, Debug)]
pub struct Experiment {
    pub config: ExperimentConfig,
    pub suite: BenchmarkSuite,
}

impl ParameterFile {
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let params = if is_json {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        info!(path = %path.display(), "Loaded parameter file");
        Ok(params)
    }

    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Defaults with the full suite and every default domain written out,
    /// ready to be edited.
    pub fn template() -> Self {
        let functions = BenchmarkFunction::ALL
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        let bounds = BenchmarkFunction::ALL
            .iter()
            .map(|f| match f {
                BenchmarkFunction::Michalewicz => BoundSpec {
                    lower: 0.0.into(),
                    upper: BoundValue::Literal("pi".to_string()),
                },
                _ => {
                    let (lower, upper) = f.default_bounds();
                    BoundSpec {
                        lower: lower.into(),
                        upper: upper.into(),
                    }
                }
            })
            .collect();

        Self {
            functions,
            bounds,
            ..Default::default()
        }
    }

    /// Resolve names and bound literals, fill in defaults and validate.
    pub fn resolve(&self) -> ConfigResult<Experiment> {
        let functions = if self.functions.is_empty() {
            BenchmarkFunction::ALL.to_vec()
        } else {
            self.functions
                .iter()
                .map(|name| {
                    BenchmarkFunction::from_name(name).ok_or_else(|| ConfigError::UnknownFunction(name.clone()))
                })
                .collect::<ConfigResult<Vec<_>>>()?
        };

        let bounds = if self.bounds.is_empty() {
            warn!("No bounds given; using each function's default domain");
            functions
                .iter()
                .map(|f| {
                    let (lower, upper) = f.default_bounds();
                    Bounds::new(lower, upper)
                })
                .collect()
        } else if self.bounds.len() != functions.len() {
            return Err(ConfigError::Invalid(format!(
                "{} bounds given for {} functions",
                self.bounds.len(),
                functions.len()
            )));
        } else {
            self.bounds
                .iter()
                .map(BoundSpec::resolve)
                .collect::<ConfigResult<Vec<_>>>()?
        };

        let config = ExperimentConfig {
            population_size: self.population_size,
            dimensions: self.dimensions,
            experimentations: self.experimentations,
            bounds,
            pso: self.pso.clone(),
            firefly: self.firefly.clone(),
            harmony: self.harmony.clone(),
            seed: self.seed,
            parallel: self.parallel,
        };
        config.validate()?;

        Ok(Experiment {
            config,
            suite: BenchmarkSuite::new(functions),
        })
    }
}
