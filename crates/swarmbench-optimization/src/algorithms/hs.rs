use crate::common::HarmonyParams;
use crate::error::EngineResult;
use crate::population::Population;
use crate::recorder::{ExperimentRecorder, IterationStats};
use crate::sampling;
use ndarray::Array1;
use rand::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

pub struct HSSolver {
    pub params: HarmonyParams,
}

impl HSSolver {
    pub fn new(params: HarmonyParams) -> Self {
        Self { params }
    }

    /// Random harmony memory, sorted ascending. Setup evaluations do not count
    /// towards the first recorded iteration.
    pub fn initialize<R: Rng + ?Sized>(
        &self,
        population: &mut Population<'_>,
        rng: &mut R,
    ) -> EngineResult<()> {
        population.randomize(rng)?;
        population.sort_by_fitness_ascending();
        population.reset_evaluation_count();
        Ok(())
    }

    /// Compose a new harmony one dimension at a time from memory, pitch
    /// adjustment, or a fresh random value.
    pub fn improvise<R: Rng + ?Sized>(&self, population: &Population<'_>, rng: &mut R) -> Array1<f64> {
        let bounds = population.bounds();
        let pop_size = population.size();

        Array1::from_shape_fn(population.dim(), |d| {
            let consider: f64 = rng.gen();
            if consider <= self.params.hmcr {
                // Memory consideration
                let k = rng.gen_range(0..pop_size);
                let mut value = population.get(k, d);

                // Pitch adjustment
                if sampling::unit_nonzero(rng) <= self.params.par {
                    value += self.params.bandwidth * sampling::symmetric_nonzero(rng);
                    value = bounds.clamp(value);
                }
                value
            } else {
                sampling::within(rng, &bounds)
            }
        })
    }

    /// Improvise, evaluate, and replace the worst harmony if the new one beats it.
    /// Returns the rank the new harmony took, if any.
    pub fn step<R: Rng + ?Sized>(
        &self,
        population: &mut Population<'_>,
        rng: &mut R,
    ) -> EngineResult<Option<usize>> {
        let harmony = self.improvise(population, rng);
        population.insert_ranked(harmony)
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
            "Harmony Search initialized"
        );
        let last = population.size() - 1;

        for iter in 0..recorder.experimentations() {
            population.reset_evaluation_count();
            let start = Instant::now();

            let rank = self.step(population, rng)?;

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
                ?rank,
                best = stats.best_fitness,
                worst = stats.worst_fitness,
                "HS iteration"
            );
        }

        recorder.set_final_fitness(population.fitness_values().view())?;
        Ok(())
    }
}
