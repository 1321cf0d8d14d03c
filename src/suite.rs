//! Adapter from the benchmark function library to the engine's evaluator seam.

use ndarray::Array1;
use swarmbench_functions::BenchmarkFunction;
use swarmbench_optimization::{ConfigurationError, EngineResult, Evaluator, FunctionId};

/// An ordered selection of benchmark functions. Engine function id `i` maps to
/// `functions[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkSuite {
    functions: Vec<BenchmarkFunction>,
}

impl BenchmarkSuite {
    pub fn new(functions: Vec<BenchmarkFunction>) -> Self {
        Self { functions }
    }

    /// All eighteen functions in canonical order.
    pub fn full() -> Self {
        Self::new(BenchmarkFunction::ALL.to_vec())
    }

    pub fn functions(&self) -> &[BenchmarkFunction] {
        &self.functions
    }

    pub fn get(&self, id: FunctionId) -> Option<BenchmarkFunction> {
        self.functions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Evaluator for BenchmarkSuite {
    fn evaluate(&self, variables: &Array1<f64>, function: FunctionId) -> EngineResult<f64> {
        let benchmark = self.get(function).ok_or(ConfigurationError::UnknownFunction {
            id: function,
            available: self.functions.len(),
        })?;
        Ok(benchmark.evaluate(variables))
    }

    fn num_functions(&self) -> usize {
        self.functions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_ids_map_to_selection_order() {
        let suite = BenchmarkSuite::new(vec![BenchmarkFunction::Quartic, BenchmarkFunction::DeJong]);
        let x = array![1.0, 2.0];
        // 1 * 1 + 2 * 16
        assert_eq!(suite.evaluate(&x, 0), Ok(33.0));
        assert_eq!(suite.evaluate(&x, 1), Ok(5.0));
        assert_eq!(suite.num_functions(), 2);
    }

    #[test]
    fn test_unknown_id_is_configuration_error() {
        let suite = BenchmarkSuite::full();
        assert_eq!(suite.len(), 18);
        assert_eq!(
            suite.evaluate(&array![0.0], 18),
            Err(ConfigurationError::UnknownFunction { id: 18, available: 18 })
        );
    }
}
