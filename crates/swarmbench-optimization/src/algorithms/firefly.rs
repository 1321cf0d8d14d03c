use crate::common::FireflyParams;
use crate::error::EngineResult;
use crate::population::Population;
use crate::recorder::{ExperimentRecorder, IterationStats};
use crate::sampling;
use ndarray::Array1;
use rand::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Light emitted by a firefly of the given fitness. Monotone decreasing in
/// fitness so the lowest cost shines brightest, negative costs included.
pub fn brightness(fitness: f64) -> f64 {
    if fitness >= 0.0 {
        1.0 / (1.0 + fitness)
    } else {
        1.0 + fitness.abs()
    }
}

/// Euclidean distance between two positions.
pub fn distance(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

pub struct FireflySolver {
    pub params: FireflyParams,
}

impl FireflySolver {
    pub fn new(params: FireflyParams) -> Self {
        Self { params }
    }

    /// Attractiveness at distance `r`: `beta0 * exp(-gamma * r)`.
    pub fn attractiveness(&self, r: f64) -> f64 {
        self.params.beta0 * (-self.params.gamma * r).exp()
    }

    /// Light intensity of a firefly seen from distance `r`.
    pub fn intensity(&self, fitness: f64, r: f64) -> f64 {
        brightness(fitness) * (-self.params.gamma * r * r).exp()
    }

    pub fn initialize<R: Rng + ?Sized>(
        &self,
        population: &mut Population<'_>,
        rng: &mut R,
    ) -> EngineResult<()> {
        population.randomize(rng)?;
        population.sort_by_fitness_ascending();
        Ok(())
    }

    /// Candidate position for firefly `i` drawn towards firefly `j`, clamped to bounds.
    pub fn move_towards<R: Rng + ?Sized>(
        &self,
        population: &Population<'_>,
        i: usize,
        j: usize,
        r: f64,
        rng: &mut R,
    ) -> Array1<f64> {
        let beta = self.attractiveness(r);
        let range = population.bounds().range();
        let xi = population.position(i);
        let xj = population.position(j);

        let mut new_vars = Array1::from_shape_fn(population.dim(), |d| {
            let random_step = self.params.alpha * sampling::normal_nonzero(rng) * range;
            xi[d] + beta * (xj[d] - xi[d]) + random_step
        });
        population.clamp(&mut new_vars);
        new_vars
    }

    /// One pass over every ordered pair of fireflies. Returns how many moves
    /// were accepted into the population.
    pub fn step<R: Rng + ?Sized>(
        &self,
        population: &mut Population<'_>,
        rng: &mut R,
    ) -> EngineResult<usize> {
        let pop_size = population.size();
        let mut accepted = 0;

        for i in 0..pop_size {
            for j in 0..pop_size {
                let r = distance(population.position(i), population.position(j));
                let intensity_i = self.intensity(population.fitness(i), r);
                let intensity_j = self.intensity(population.fitness(j), r);

                // Self-pairs are equally bright and never move.
                if intensity_j <= intensity_i {
                    continue;
                }

                let new_vars = self.move_towards(population, i, j, r, rng);
                if population.insert_ranked(new_vars)?.is_some() {
                    accepted += 1;
                }
            }
        }
        Ok(accepted)
    }

    pub fn solve<R: Rng + ?Sized>(
        &self,
        population: &mut Population<'_>,
        recorder: &mut ExperimentRecorder,
        rng: &mut R,
    ) -> EngineResult<()> {
        self.initialize(population, rng)?;
        info!(
            function = population.function(),
            initial_best = population.fitness(0),
            "Firefly initialized"
        );
        let last = population.size() - 1;

        for iter in 0..recorder.experimentations() {
            population.reset_evaluation_count();
            let start = Instant::now();

            let accepted = self.step(population, rng)?;

            let stats = IterationStats {
                best_fitness: population.fitness(0),
                worst_fitness: population.fitness(last),
                evaluation_calls: population.evaluation_count(),
                elapsed: start.elapsed(),
            };
            recorder.record(iter, &stats)?;
            debug!(
                function = population.function(),
                iter,
                accepted,
                best = stats.best_fitness,
                worst = stats.worst_fitness,
                calls = stats.evaluation_calls,
                "Firefly iteration"
            );
        }

        recorder.set_final_fitness(population.fitness_values().view())?;
        Ok(())
    }
}
