//! Per-run statistics across repeated experimentations.
//!
//! Every array is sized once from the experimentation count and population
//! size; rows are written by index and never appended.

use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ConfigurationError, EngineResult};

/// One experimentation's worth of statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationStats {
    pub best_fitness: f64,
    pub worst_fitness: f64,
    pub evaluation_calls: u64,
    pub elapsed: Duration,
}

/// Aggregate view of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Lowest best fitness over all experimentations
    pub best: f64,
    /// Highest best fitness over all experimentations
    pub worst: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub total_evaluations: u64,
    pub total_elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct ExperimentRecorder {
    experimentations: usize,
    population_size: usize,
    best_fitness: Vec<f64>,
    worst_fitness: Vec<f64>,
    evaluation_calls: Vec<u64>,
    elapsed: Vec<Duration>,
    written: Vec<bool>,
    candidates_written: Vec<bool>,
    /// [candidate, experiment] current fitness; swarm runs only
    candidate_fitness: Option<Array2<f64>>,
    /// [candidate, experiment] personal best fitness; swarm runs only
    personal_best: Option<Array2<f64>>,
    final_fitness: Option<Array1<f64>>,
}

impl ExperimentRecorder {
    pub fn new(experimentations: usize, population_size: usize) -> EngineResult<Self> {
        if experimentations == 0 {
            return Err(ConfigurationError::ZeroExperimentations);
        }
        if population_size == 0 {
            return Err(ConfigurationError::EmptyPopulation);
        }
        Ok(Self {
            experimentations,
            population_size,
            best_fitness: vec![f64::NAN; experimentations],
            worst_fitness: vec![f64::NAN; experimentations],
            evaluation_calls: vec![0; experimentations],
            elapsed: vec![Duration::ZERO; experimentations],
            written: vec![false; experimentations],
            candidates_written: vec![false; experimentations],
            candidate_fitness: None,
            personal_best: None,
            final_fitness: None,
        })
    }

    /// Recorder that also keeps the per-candidate matrices of a swarm run.
    pub fn with_candidate_history(experimentations: usize, population_size: usize) -> EngineResult<Self> {
        let mut recorder = Self::new(experimentations, population_size)?;
        recorder.candidate_fitness = Some(Array2::from_elem((population_size, experimentations), f64::NAN));
        recorder.personal_best = Some(Array2::from_elem((population_size, experimentations), f64::NAN));
        Ok(recorder)
    }

    /// Write the summary row of experimentation `experiment`.
    pub fn record(&mut self, experiment: usize, stats: &IterationStats) -> EngineResult<()> {
        self.check_experiment(experiment)?;
        self.best_fitness[experiment] = stats.best_fitness;
        self.worst_fitness[experiment] = stats.worst_fitness;
        self.evaluation_calls[experiment] = stats.evaluation_calls;
        self.elapsed[experiment] = stats.elapsed;
        self.written[experiment] = true;
        Ok(())
    }

    /// Write the per-candidate columns of experimentation `experiment`.
    pub fn record_candidates(
        &mut self,
        experiment: usize,
        fitness: ArrayView1<f64>,
        personal_best: ArrayView1<f64>,
    ) -> EngineResult<()> {
        self.check_experiment(experiment)?;
        self.check_candidates(fitness.len())?;
        self.check_candidates(personal_best.len())?;
        if let Some(matrix) = self.candidate_fitness.as_mut() {
            matrix.column_mut(experiment).assign(&fitness);
        }
        if let Some(matrix) = self.personal_best.as_mut() {
            matrix.column_mut(experiment).assign(&personal_best);
        }
        self.candidates_written[experiment] = true;
        Ok(())
    }

    /// Store the end-of-run fitness of every candidate.
    pub fn set_final_fitness(&mut self, fitness: ArrayView1<f64>) -> EngineResult<()> {
        self.check_candidates(fitness.len())?;
        self.final_fitness = Some(fitness.to_owned());
        Ok(())
    }

    pub fn experimentations(&self) -> usize {
        self.experimentations
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// # Panics
    ///
    /// Panics if `experiment` is out of range; writers report `IndexOutOfRange` instead.
    pub fn best_fitness(&self, experiment: usize) -> f64 {
        self.best_fitness[experiment]
    }

    pub fn best_fitness_history(&self) -> &[f64] {
        &self.best_fitness
    }

    /// # Panics
    ///
    /// Panics if `experiment` is out of range.
    pub fn worst_fitness(&self, experiment: usize) -> f64 {
        self.worst_fitness[experiment]
    }

    pub fn worst_fitness_history(&self) -> &[f64] {
        &self.worst_fitness
    }

    /// # Panics
    ///
    /// Panics if `experiment` is out of range.
    pub fn evaluation_calls(&self, experiment: usize) -> u64 {
        self.evaluation_calls[experiment]
    }

    pub fn evaluation_calls_history(&self) -> &[u64] {
        &self.evaluation_calls
    }

    /// # Panics
    ///
    /// Panics if `experiment` is out of range.
    pub fn elapsed(&self, experiment: usize) -> Duration {
        self.elapsed[experiment]
    }

    /// # Panics
    ///
    /// Panics if `experiment` is out of range.
    pub fn elapsed_millis(&self, experiment: usize) -> f64 {
        self.elapsed[experiment].as_secs_f64() * 1000.0
    }

    pub fn elapsed_history(&self) -> &[Duration] {
        &self.elapsed
    }

    pub fn final_fitness(&self) -> Option<&Array1<f64>> {
        self.final_fitness.as_ref()
    }

    pub fn candidate_fitness(&self) -> Option<&Array2<f64>> {
        self.candidate_fitness.as_ref()
    }

    pub fn personal_best(&self) -> Option<&Array2<f64>> {
        self.personal_best.as_ref()
    }

    /// True once every experimentation row and the final snapshot are written.
    /// A recorder with candidate history also needs every candidate column.
    pub fn is_complete(&self) -> bool {
        let candidates_done = self.candidate_fitness.is_none() || self.candidates_written.iter().all(|&w| w);
        self.written.iter().all(|&w| w) && candidates_done && self.final_fitness.is_some()
    }

    /// Aggregate statistics over the per-experimentation best fitness.
    /// `None` until the run is complete.
    pub fn summary(&self) -> Option<RunSummary> {
        if !self.is_complete() {
            return None;
        }
        let n = self.experimentations as f64;
        let best = self.best_fitness.iter().cloned().fold(f64::INFINITY, f64::min);
        let worst = self.best_fitness.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = self.best_fitness.iter().sum::<f64>() / n;
        let variance = self
            .best_fitness
            .iter()
            .map(|&f| (f - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(RunSummary {
            best,
            worst,
            mean,
            std_dev: variance.sqrt(),
            total_evaluations: self.evaluation_calls.iter().sum(),
            total_elapsed: self.elapsed.iter().sum(),
        })
    }

    fn check_experiment(&self, experiment: usize) -> EngineResult<()> {
        if experiment >= self.experimentations {
            return Err(ConfigurationError::IndexOutOfRange {
                what: "experimentation",
                index: experiment,
                len: self.experimentations,
            });
        }
        Ok(())
    }

    fn check_candidates(&self, len: usize) -> EngineResult<()> {
        if len != self.population_size {
            return Err(ConfigurationError::DimensionMismatch {
                expected: self.population_size,
                actual: len,
            });
        }
        Ok(())
    }
}
