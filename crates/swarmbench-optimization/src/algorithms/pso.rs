use crate::common::{Individual, PsoParams};
use crate::error::EngineResult;
use crate::population::Population;
use crate::recorder::{ExperimentRecorder, IterationStats};
use crate::sampling;
use ndarray::Array1;
use rand::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Swarm overlay owned by a PSO run: velocities, personal bests and the global best.
#[derive(Clone, Debug)]
pub struct SwarmState {
    pub velocity: Vec<Array1<f64>>,
    pub personal_best: Vec<Individual>,
    pub global_best: Individual,
}

impl SwarmState {
    /// Seed personal bests from the current candidates and the global best
    /// from the population's best candidate.
    pub fn from_population(population: &Population<'_>, velocity: Vec<Array1<f64>>) -> Self {
        let personal_best = population.individuals().to_vec();
        let global_best = population.best().clone();
        Self {
            velocity,
            personal_best,
            global_best,
        }
    }

    pub fn personal_best_fitness(&self) -> Array1<f64> {
        self.personal_best.iter().map(|p| p.fitness).collect()
    }
}

pub struct PSOSolver {
    pub params: PsoParams,
}

impl PSOSolver {
    pub fn new(params: PsoParams) -> Self {
        Self { params }
    }

    /// Random positions within bounds, random velocities in `[0, range/2]`,
    /// one evaluation pass, then seed personal and global bests.
    pub fn initialize<R: Rng + ?Sized>(
        &self,
        population: &mut Population<'_>,
        rng: &mut R,
    ) -> EngineResult<SwarmState> {
        population.randomize(rng)?;

        let max_velocity = 0.5 * population.bounds().range();
        let dim = population.dim();
        let velocity = (0..population.size())
            .map(|_| Array1::from_shape_fn(dim, |_| rng.gen_range(0.0..=max_velocity)))
            .collect();

        Ok(SwarmState::from_population(population, velocity))
    }

    /// One sweep over the swarm. Each particle moves, is re-evaluated and then
    /// updates its personal best and the global best before the next particle
    /// moves, so later particles already see an improved global best.
    pub fn step<R: Rng + ?Sized>(
        &self,
        population: &mut Population<'_>,
        swarm: &mut SwarmState,
        rng: &mut R,
    ) -> EngineResult<()> {
        let PsoParams { c1, c2, dampener, inertia } = self.params;
        let dim = population.dim();

        for i in 0..population.size() {
            let mut new_vel = Array1::zeros(dim);
            let mut new_vars = Array1::zeros(dim);
            {
                let particle = population.position(i);
                let pbest = &swarm.personal_best[i].variables;
                let gbest = &swarm.global_best.variables;
                let velocity = &swarm.velocity[i];

                for j in 0..dim {
                    let r1 = sampling::unit_nonzero(rng);
                    let r2 = sampling::unit_nonzero(rng);

                    let v = inertia * velocity[j]
                        + dampener
                            * (c1 * r1 * (pbest[j] - particle[j])
                                + c2 * r2 * (gbest[j] - particle[j]));

                    new_vel[j] = v;
                    new_vars[j] = particle[j] + v;
                }
            }
            swarm.velocity[i] = new_vel;

            // replace clamps before evaluating
            let fitness = population.replace(i, new_vars)?;

            if fitness < swarm.personal_best[i].fitness {
                swarm.personal_best[i] = population.individual(i).clone();
            }
            if fitness < swarm.global_best.fitness {
                swarm.global_best = population.individual(i).clone();
            }
        }
        Ok(())
    }

    /// Initialize, then run one recorded sweep per experimentation.
    pub fn solve<R: Rng + ?Sized>(
        &self,
        population: &mut Population<'_>,
        recorder: &mut ExperimentRecorder,
        rng: &mut R,
    ) -> EngineResult<SwarmState> {
        let mut swarm = self.initialize(population, rng)?;
        info!(
            function = population.function(),
            initial_best = swarm.global_best.fitness,
            "PSO initialized"
        );

        for iter in 0..recorder.experimentations() {
            population.reset_evaluation_count();
            let start = Instant::now();

            self.step(population, &mut swarm, rng)?;

            let elapsed = start.elapsed();
            let stats = IterationStats {
                best_fitness: swarm.global_best.fitness,
                worst_fitness: population.fitness(population.index_of_worst()),
                evaluation_calls: population.evaluation_count(),
                elapsed,
            };
            recorder.record(iter, &stats)?;
            recorder.record_candidates(
                iter,
                population.fitness_values().view(),
                swarm.personal_best_fitness().view(),
            )?;
            debug!(
                function = population.function(),
                iter,
                best = stats.best_fitness,
                worst = stats.worst_fitness,
                calls = stats.evaluation_calls,
                "PSO iteration"
            );
        }

        recorder.set_final_fitness(population.fitness_values().view())?;
        Ok(swarm)
    }
}
