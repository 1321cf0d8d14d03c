//! Candidate store shared by every driver.
//!
//! A `Population` owns N candidate positions of fixed dimension D together
//! with their fitness values. Positions and fitness only change together:
//! every mutating operation either evaluates the new position itself or takes
//! an already-evaluated `Individual`.

use ndarray::Array1;
use rand::Rng;

use crate::common::{Bounds, Evaluator, FunctionId, Individual};
use crate::error::{ConfigurationError, EngineResult};
use crate::sampling;

pub struct Population<'a> {
    evaluator: &'a dyn Evaluator,
    function: FunctionId,
    bounds: Bounds,
    dim: usize,
    individuals: Vec<Individual>,
    evaluation_count: u64,
}

impl<'a> Population<'a> {
    /// Create an unevaluated population of `size` candidates.
    ///
    /// Candidates start at the in-bounds point closest to the origin with an
    /// infinite fitness; drivers call [`Population::randomize`] before use.
    pub fn new(
        evaluator: &'a dyn Evaluator,
        function: FunctionId,
        bounds: Bounds,
        size: usize,
        dim: usize,
    ) -> EngineResult<Self> {
        check_setup(evaluator, function, &bounds, size, dim)?;
        let start = Array1::from_elem(dim, bounds.clamp(0.0));
        let individuals = (0..size)
            .map(|_| Individual::new(start.clone(), f64::INFINITY))
            .collect();

        Ok(Self {
            evaluator,
            function,
            bounds,
            dim,
            individuals,
            evaluation_count: 0,
        })
    }

    /// Create a population from known positions. Positions are clamped and evaluated.
    pub fn from_positions(
        evaluator: &'a dyn Evaluator,
        function: FunctionId,
        bounds: Bounds,
        positions: Vec<Array1<f64>>,
    ) -> EngineResult<Self> {
        let dim = positions.first().map(|p| p.len()).unwrap_or(0);
        let mut population = Self::new(evaluator, function, bounds, positions.len(), dim)?;
        for (index, position) in positions.into_iter().enumerate() {
            population.replace(index, position)?;
        }
        Ok(population)
    }

    /// Fill every candidate uniformly within bounds and evaluate all of them.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EngineResult<()> {
        for index in 0..self.individuals.len() {
            let position = Array1::from_shape_fn(self.dim, |_| sampling::within(rng, &self.bounds));
            self.replace(index, position)?;
        }
        Ok(())
    }

    /// Re-evaluate every stored candidate.
    pub fn evaluate_all(&mut self) -> EngineResult<()> {
        for index in 0..self.individuals.len() {
            self.evaluate(index)?;
        }
        Ok(())
    }

    /// Re-evaluate candidate `index` and store its fitness.
    pub fn evaluate(&mut self, index: usize) -> EngineResult<f64> {
        self.check_index(index)?;
        let fitness = self.evaluator.evaluate(&self.individuals[index].variables, self.function)?;
        self.evaluation_count += 1;
        self.individuals[index].fitness = fitness;
        Ok(fitness)
    }

    /// Evaluate a position that is not (yet) part of the population.
    pub fn evaluate_position(&mut self, position: &Array1<f64>) -> EngineResult<f64> {
        self.check_dim(position)?;
        let fitness = self.evaluator.evaluate(position, self.function)?;
        self.evaluation_count += 1;
        Ok(fitness)
    }

    /// Clamp, store and evaluate a new position for candidate `index`.
    pub fn replace(&mut self, index: usize, mut position: Array1<f64>) -> EngineResult<f64> {
        self.check_index(index)?;
        self.check_dim(&position)?;
        self.clamp(&mut position);
        let fitness = self.evaluate_position(&position)?;
        self.individuals[index] = Individual::new(position, fitness);
        Ok(fitness)
    }

    /// Clamp every element of `position` into the function bounds.
    pub fn clamp(&self, position: &mut Array1<f64>) {
        let bounds = self.bounds;
        position.mapv_inplace(|x| bounds.clamp(x));
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn function(&self) -> FunctionId {
        self.function
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range; mutators report `IndexOutOfRange` instead.
    pub fn individual(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn position(&self, index: usize) -> &Array1<f64> {
        &self.individuals[index].variables
    }

    /// # Panics
    ///
    /// Panics if `index` or `dim` is out of range.
    pub fn get(&self, index: usize, dim: usize) -> f64 {
        self.individuals[index].variables[dim]
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn fitness(&self, index: usize) -> f64 {
        self.individuals[index].fitness
    }

    /// Snapshot of all fitness values in candidate order.
    pub fn fitness_values(&self) -> Array1<f64> {
        self.individuals.iter().map(|ind| ind.fitness).collect()
    }

    pub fn evaluation_count(&self) -> u64 {
        self.evaluation_count
    }

    pub fn reset_evaluation_count(&mut self) {
        self.evaluation_count = 0;
    }

    /// Index of the minimal fitness; ties go to the first occurrence.
    pub fn index_of_best(&self) -> usize {
        let mut best_idx = 0;
        for (i, ind) in self.individuals.iter().enumerate() {
            if ind.fitness < self.individuals[best_idx].fitness {
                best_idx = i;
            }
        }
        best_idx
    }

    /// Index of the maximal fitness; ties go to the first occurrence.
    pub fn index_of_worst(&self) -> usize {
        let mut worst_idx = 0;
        for (i, ind) in self.individuals.iter().enumerate() {
            if ind.fitness > self.individuals[worst_idx].fitness {
                worst_idx = i;
            }
        }
        worst_idx
    }

    pub fn best(&self) -> &Individual {
        &self.individuals[self.index_of_best()]
    }

    /// Stable ascending sort of candidates by fitness.
    pub fn sort_by_fitness_ascending(&mut self) {
        self.individuals
            .sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
    }

    pub fn is_sorted(&self) -> bool {
        self.individuals
            .windows(2)
            .all(|pair| pair[0].fitness <= pair[1].fitness)
    }

    /// Replace-worst-by-rank insertion into a sorted population.
    ///
    /// The position is clamped and evaluated first, so the stored fitness
    /// always belongs to the stored position. Scans from best to worst for the
    /// first entry strictly worse than the newcomer, shifts that entry and
    /// everything after it one slot towards the tail (dropping the current
    /// worst) and stores the newcomer there. Equal fitness keeps the existing
    /// entries ahead of the newcomer. Returns the slot used, or `None` if the
    /// newcomer is no better than the worst.
    pub fn insert_ranked(&mut self, mut position: Array1<f64>) -> EngineResult<Option<usize>> {
        debug_assert!(self.is_sorted(), "insert_ranked on an unsorted population");
        self.check_dim(&position)?;
        self.clamp(&mut position);
        let fitness = self.evaluate_position(&position)?;

        let slot = match self.individuals.iter().position(|ind| ind.fitness > fitness) {
            Some(slot) => slot,
            None => return Ok(None),
        };
        self.individuals.pop();
        self.individuals.insert(slot, Individual::new(position, fitness));
        Ok(Some(slot))
    }

    /// True if every element of every candidate lies within bounds.
    pub fn in_bounds(&self) -> bool {
        self.individuals
            .iter()
            .all(|ind| ind.variables.iter().all(|&x| self.bounds.contains(x)))
    }

    fn check_index(&self, index: usize) -> EngineResult<()> {
        if index >= self.individuals.len() {
            return Err(ConfigurationError::IndexOutOfRange {
                what: "candidate",
                index,
                len: self.individuals.len(),
            });
        }
        Ok(())
    }

    fn check_dim(&self, position: &Array1<f64>) -> EngineResult<()> {
        if position.len() != self.dim {
            return Err(ConfigurationError::DimensionMismatch {
                expected: self.dim,
                actual: position.len(),
            });
        }
        Ok(())
    }
}

fn check_setup(
    evaluator: &dyn Evaluator,
    function: FunctionId,
    bounds: &Bounds,
    size: usize,
    dim: usize,
) -> EngineResult<()> {
    if function >= evaluator.num_functions() {
        return Err(ConfigurationError::UnknownFunction {
            id: function,
            available: evaluator.num_functions(),
        });
    }
    if !bounds.is_valid() {
        return Err(ConfigurationError::InvalidBounds {
            function,
            lower: bounds.lower,
            upper: bounds.upper,
        });
    }
    if size == 0 {
        return Err(ConfigurationError::EmptyPopulation);
    }
    if dim == 0 {
        return Err(ConfigurationError::ZeroDimension);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::SimpleEvaluator;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn first_coordinate(x: &Array1<f64>) -> f64 {
        x[0]
    }

    fn sphere(x: &Array1<f64>) -> f64 {
        x.iter().map(|&v| v * v).sum()
    }

    fn evaluator() -> SimpleEvaluator<fn(&Array1<f64>) -> f64> {
        SimpleEvaluator::new(vec![first_coordinate as fn(&Array1<f64>) -> f64, sphere])
    }

    fn population_with_fitness<'a>(
        eval: &'a SimpleEvaluator<fn(&Array1<f64>) -> f64>,
        values: &[f64],
    ) -> Population<'a> {
        let positions = values.iter().map(|&v| array![v, 0.0]).collect();
        Population::from_positions(eval, 0, Bounds::new(-100.0, 100.0), positions).unwrap()
    }

    #[test]
    fn test_unknown_function_is_configuration_error() {
        let eval = evaluator();
        let err = Population::new(&eval, 5, Bounds::new(-1.0, 1.0), 4, 2).err();
        assert_eq!(
            err,
            Some(ConfigurationError::UnknownFunction { id: 5, available: 2 })
        );
    }

    #[test]
    fn test_rejects_degenerate_setup() {
        let eval = evaluator();
        assert!(matches!(
            Population::new(&eval, 0, Bounds::new(1.0, 1.0), 4, 2),
            Err(ConfigurationError::InvalidBounds { .. })
        ));
        assert_eq!(
            Population::new(&eval, 0, Bounds::new(-1.0, 1.0), 0, 2).err(),
            Some(ConfigurationError::EmptyPopulation)
        );
        assert_eq!(
            Population::new(&eval, 0, Bounds::new(-1.0, 1.0), 3, 0).err(),
            Some(ConfigurationError::ZeroDimension)
        );
    }

    #[test]
    fn test_randomize_keeps_bounds_and_sync() {
        let eval = evaluator();
        let mut rng = StdRng::seed_from_u64(11);
        let mut pop = Population::new(&eval, 1, Bounds::new(-5.0, 5.0), 20, 3).unwrap();
        pop.randomize(&mut rng).unwrap();

        assert_eq!(pop.size(), 20);
        assert_eq!(pop.fitness_values().len(), 20);
        assert!(pop.in_bounds());
        assert_eq!(pop.evaluation_count(), 20);
        for ind in pop.individuals() {
            assert_eq!(ind.fitness, sphere(&ind.variables));
        }
    }

    #[test]
    fn test_replace_clamps_and_counts() {
        let eval = evaluator();
        let mut pop = Population::new(&eval, 1, Bounds::new(-1.0, 1.0), 2, 2).unwrap();
        let fit = pop.replace(0, array![3.0, -0.5]).unwrap();
        assert_eq!(pop.position(0), &array![1.0, -0.5]);
        assert_eq!(fit, 1.25);
        assert_eq!(pop.fitness(0), 1.25);
        assert_eq!(pop.evaluation_count(), 1);

        pop.reset_evaluation_count();
        assert_eq!(pop.evaluation_count(), 0);

        assert!(matches!(
            pop.replace(2, array![0.0, 0.0]),
            Err(ConfigurationError::IndexOutOfRange { index: 2, .. })
        ));
        assert!(matches!(
            pop.replace(0, array![0.0]),
            Err(ConfigurationError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_index_of_best_first_occurrence() {
        let eval = evaluator();
        let pop = population_with_fitness(&eval, &[3.0, 1.0, 2.0, 1.0]);
        assert_eq!(pop.index_of_best(), 1);
        assert_eq!(pop.index_of_worst(), 0);
    }

    #[test]
    fn test_sort_is_stable_and_keeps_pairs() {
        let eval = evaluator();
        let mut pop = population_with_fitness(&eval, &[4.0, -2.0, 4.0, 0.5]);
        pop.sort_by_fitness_ascending();
        assert!(pop.is_sorted());
        assert_eq!(pop.fitness_values(), array![-2.0, 0.5, 4.0, 4.0]);
        for ind in pop.individuals() {
            assert_eq!(ind.fitness, ind.variables[0]);
        }
    }

    #[test]
    fn test_insert_evicts_worst() {
        let eval = evaluator();
        let mut pop = population_with_fitness(&eval, &[10.0, 5.0, 1.0]);
        pop.sort_by_fitness_ascending();

        let slot = pop.insert_ranked(array![3.0, 0.0]).unwrap();

        assert_eq!(slot, Some(1));
        assert_eq!(pop.fitness_values(), array![1.0, 3.0, 5.0]);
        assert!(pop.individuals().iter().all(|ind| ind.fitness != 10.0));
        assert_eq!(pop.size(), 3);
        assert_eq!(pop.evaluation_count(), 4);
    }

    #[test]
    fn test_insert_non_improving_is_noop() {
        let eval = evaluator();
        let mut pop = population_with_fitness(&eval, &[1.0, 5.0, 10.0]);
        assert_eq!(pop.insert_ranked(array![12.0, 0.0]).unwrap(), None);
        assert_eq!(pop.insert_ranked(array![10.0, 0.0]).unwrap(), None);
        assert_eq!(pop.fitness_values(), array![1.0, 5.0, 10.0]);
    }

    #[test]
    fn test_insert_ties_go_to_existing() {
        let eval = evaluator();
        let mut pop = population_with_fitness(&eval, &[1.0, 5.0, 10.0]);
        let slot = pop.insert_ranked(array![5.0, 1.0]).unwrap();
        assert_eq!(slot, Some(2));
        assert_eq!(pop.position(1), &array![5.0, 0.0]);
        assert_eq!(pop.position(2), &array![5.0, 1.0]);
    }

    #[test]
    fn test_insert_clamps_and_rejects_wrong_dimension() {
        let eval = evaluator();
        let mut pop = Population::from_positions(
            &eval,
            1,
            Bounds::new(-1.0, 1.0),
            vec![array![0.5, 0.5], array![1.0, 1.0]],
        )
        .unwrap();
        pop.sort_by_fitness_ascending();

        assert_eq!(
            pop.insert_ranked(array![50.0]),
            Err(ConfigurationError::DimensionMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(pop.size(), 2);
        assert_eq!(pop.position(1).len(), 2);

        let slot = pop.insert_ranked(array![50.0, 0.0]).unwrap();
        assert_eq!(slot, Some(1));
        assert!(pop.in_bounds());
        assert_eq!(pop.position(1), &array![1.0, 0.0]);
        assert_eq!(pop.fitness(1), 1.0);
    }

    #[test]
    fn test_insert_keeps_order_for_any_size() {
        let eval = evaluator();
        let mut rng = StdRng::seed_from_u64(3);
        for n in 1..8 {
            let mut pop = Population::new(&eval, 0, Bounds::new(-10.0, 10.0), n, 1).unwrap();
            pop.randomize(&mut rng).unwrap();
            pop.sort_by_fitness_ascending();
            for _ in 0..50 {
                let x = rng.gen_range(-10.0..10.0);
                pop.insert_ranked(array![x]).unwrap();
                assert!(pop.is_sorted());
                assert_eq!(pop.size(), n);
            }
        }
    }
}
