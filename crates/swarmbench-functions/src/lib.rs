//! The benchmark objective suite.
//!
//! Eighteen cost functions in a fixed canonical order. Each takes a solution
//! vector of any dimension and returns a cost where lower is better.

use ndarray::Array1;
use std::f64::consts::PI;
use std::fmt;

pub mod multimodal;
pub mod unimodal;
pub mod waves;

pub use multimodal::*;
pub use unimodal::*;
pub use waves::*;

/// Consecutive coordinate pairs `(x_0, x_1), (x_1, x_2), ...`
pub(crate) fn pairs(x: &Array1<f64>) -> impl Iterator<Item = (f64, f64)> + '_ {
    x.iter().copied().zip(x.iter().copied().skip(1))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BenchmarkFunction {
    Schwefel,
    DeJong,
    Rosenbrock,
    Rastrigin,
    Griewank,
    SineEnvelopeSineWave,
    StretchedVSineWave,
    AckleyOne,
    AckleyTwo,
    EggHolder,
    Rana,
    Pathological,
    Michalewicz,
    MastersCosineWave,
    Quartic,
    Levy,
    Step,
    Alpine,
}

impl BenchmarkFunction {
    /// The full suite in canonical order; a function's id is its index here.
    pub const ALL: [BenchmarkFunction; 18] = [
        BenchmarkFunction::Schwefel,
        BenchmarkFunction::DeJong,
        BenchmarkFunction::Rosenbrock,
        BenchmarkFunction::Rastrigin,
        BenchmarkFunction::Griewank,
        BenchmarkFunction::SineEnvelopeSineWave,
        BenchmarkFunction::StretchedVSineWave,
        BenchmarkFunction::AckleyOne,
        BenchmarkFunction::AckleyTwo,
        BenchmarkFunction::EggHolder,
        BenchmarkFunction::Rana,
        BenchmarkFunction::Pathological,
        BenchmarkFunction::Michalewicz,
        BenchmarkFunction::MastersCosineWave,
        BenchmarkFunction::Quartic,
        BenchmarkFunction::Levy,
        BenchmarkFunction::Step,
        BenchmarkFunction::Alpine,
    ];

    pub fn from_id(id: usize) -> Option<Self> {
        Self::ALL.get(id).copied()
    }

    pub fn id(&self) -> usize {
        *self as usize
    }

    /// Look up by canonical name or alias, ignoring case, spaces, `-` and `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::ALL
            .iter()
            .copied()
            .find(|f| normalize(f.name()) == wanted || f.aliases().iter().any(|a| normalize(a) == wanted))
    }

    pub fn name(&self) -> &'static str {
        match self {
            BenchmarkFunction::Schwefel => "schwefel",
            BenchmarkFunction::DeJong => "de_jong",
            BenchmarkFunction::Rosenbrock => "rosenbrock",
            BenchmarkFunction::Rastrigin => "rastrigin",
            BenchmarkFunction::Griewank => "griewank",
            BenchmarkFunction::SineEnvelopeSineWave => "sine_envelope_sine_wave",
            BenchmarkFunction::StretchedVSineWave => "stretched_v_sine_wave",
            BenchmarkFunction::AckleyOne => "ackley_one",
            BenchmarkFunction::AckleyTwo => "ackley_two",
            BenchmarkFunction::EggHolder => "egg_holder",
            BenchmarkFunction::Rana => "rana",
            BenchmarkFunction::Pathological => "pathological",
            BenchmarkFunction::Michalewicz => "michalewicz",
            BenchmarkFunction::MastersCosineWave => "masters_cosine_wave",
            BenchmarkFunction::Quartic => "quartic",
            BenchmarkFunction::Levy => "levy",
            BenchmarkFunction::Step => "step",
            BenchmarkFunction::Alpine => "alpine",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            BenchmarkFunction::DeJong => &["dejong", "sphere", "de_jong_1"],
            BenchmarkFunction::Rosenbrock => &["rosenbrok"],
            BenchmarkFunction::SineEnvelopeSineWave => &["sine_envelope"],
            BenchmarkFunction::StretchedVSineWave => &["stretched_v"],
            BenchmarkFunction::AckleyOne => &["ackley_1"],
            BenchmarkFunction::AckleyTwo => &["ackley_2", "ackley"],
            BenchmarkFunction::EggHolder => &["eggholder"],
            BenchmarkFunction::MastersCosineWave => &["masters_cos_wave", "masters"],
            _ => &[],
        }
    }

    /// Search domain used when a parameter file gives no bounds.
    pub fn default_bounds(&self) -> (f64, f64) {
        match self {
            BenchmarkFunction::Schwefel => (-512.0, 512.0),
            BenchmarkFunction::DeJong => (-100.0, 100.0),
            BenchmarkFunction::Rosenbrock => (-100.0, 100.0),
            BenchmarkFunction::Rastrigin => (-30.0, 30.0),
            BenchmarkFunction::Griewank => (-500.0, 500.0),
            BenchmarkFunction::SineEnvelopeSineWave => (-30.0, 30.0),
            BenchmarkFunction::StretchedVSineWave => (-30.0, 30.0),
            BenchmarkFunction::AckleyOne => (-32.0, 32.0),
            BenchmarkFunction::AckleyTwo => (-32.0, 32.0),
            BenchmarkFunction::EggHolder => (-500.0, 500.0),
            BenchmarkFunction::Rana => (-500.0, 500.0),
            BenchmarkFunction::Pathological => (-100.0, 100.0),
            BenchmarkFunction::Michalewicz => (0.0, PI),
            BenchmarkFunction::MastersCosineWave => (-30.0, 30.0),
            BenchmarkFunction::Quartic => (-100.0, 100.0),
            BenchmarkFunction::Levy => (-10.0, 10.0),
            BenchmarkFunction::Step => (-100.0, 100.0),
            BenchmarkFunction::Alpine => (-100.0, 100.0),
        }
    }

    pub fn evaluate(&self, x: &Array1<f64>) -> f64 {
        match self {
            BenchmarkFunction::Schwefel => schwefel(x),
            BenchmarkFunction::DeJong => de_jong(x),
            BenchmarkFunction::Rosenbrock => rosenbrock(x),
            BenchmarkFunction::Rastrigin => rastrigin(x),
            BenchmarkFunction::Griewank => griewank(x),
            BenchmarkFunction::SineEnvelopeSineWave => sine_envelope_sine_wave(x),
            BenchmarkFunction::StretchedVSineWave => stretched_v_sine_wave(x),
            BenchmarkFunction::AckleyOne => ackley_one(x),
            BenchmarkFunction::AckleyTwo => ackley_two(x),
            BenchmarkFunction::EggHolder => egg_holder(x),
            BenchmarkFunction::Rana => rana(x),
            BenchmarkFunction::Pathological => pathological(x),
            BenchmarkFunction::Michalewicz => michalewicz(x),
            BenchmarkFunction::MastersCosineWave => masters_cosine_wave(x),
            BenchmarkFunction::Quartic => quartic(x),
            BenchmarkFunction::Levy => levy(x),
            BenchmarkFunction::Step => step(x),
            BenchmarkFunction::Alpine => alpine(x),
        }
    }
}

impl fmt::Display for BenchmarkFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
