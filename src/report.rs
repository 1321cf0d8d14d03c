//! CSV export of completed runs.
//!
//! Every algorithm gets its own directory under the output root:
//!
//! ```text
//! <output>/<algorithm>/best_fitness.csv      one row per function, one column per experimentation
//! <output>/<algorithm>/worst_fitness.csv
//! <output>/<algorithm>/function_calls.csv
//! <output>/<algorithm>/time_taken.csv        milliseconds
//! <output>/<algorithm>/final_fitness.csv     one column per candidate
//! <output>/<algorithm>/summary.csv           one row per function
//! <output>/pso/historic_fitness/function_<n>.csv
//! ```

use csv::Writer;
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};
use swarmbench_optimization::{Algorithm, FunctionRun, RunSummary};
use thiserror::Error;
use tracing::{debug, info};

use crate::suite::BenchmarkSuite;

/// Report errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A recorder was handed over before its run finished
    #[error("Run for function {0} is incomplete")]
    Incomplete(usize),
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Summary statistics of one function's run, labelled for display.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryRow {
    pub function: String,
    pub summary: RunSummary,
}

/// Label a run by its function's name, falling back to the numeric id.
pub fn function_label(suite: &BenchmarkSuite, function: usize) -> String {
    suite
        .get(function)
        .map(|f| f.name().to_string())
        .unwrap_or_else(|| format!("function_{}", function))
}

pub fn summarize(runs: &[FunctionRun], suite: &BenchmarkSuite) -> ReportResult<Vec<SummaryRow>> {
    runs.iter()
        .map(|run| {
            let summary = run.recorder.summary().ok_or(ReportError::Incomplete(run.function))?;
            Ok(SummaryRow {
                function: function_label(suite, run.function),
                summary,
            })
        })
        .collect()
}

pub struct ReportWriter {
    root: PathBuf,
}

impl ReportWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn algorithm_dir(&self, algorithm: Algorithm) -> PathBuf {
        self.root.join(algorithm.name())
    }

    /// Write the whole CSV family for one algorithm. Returns the files written.
    pub fn write(
        &self,
        algorithm: Algorithm,
        runs: &[FunctionRun],
        suite: &BenchmarkSuite,
    ) -> ReportResult<Vec<PathBuf>> {
        let rows = summarize(runs, suite)?;
        let dir = self.algorithm_dir(algorithm);
        fs::create_dir_all(&dir)?;

        let experimentations = runs.first().map(|r| r.recorder.experimentations()).unwrap_or(0);
        let population = runs.first().map(|r| r.recorder.population_size()).unwrap_or(0);
        let exp_header = numbered_header("experimentation", experimentations);
        let cand_header = numbered_header("candidate", population);

        let mut written = Vec::new();

        written.push(write_per_function(&dir.join("best_fitness.csv"), &exp_header, runs, suite, |run| {
            run.recorder.best_fitness_history().iter().map(f64::to_string).collect()
        })?);
        written.push(write_per_function(&dir.join("worst_fitness.csv"), &exp_header, runs, suite, |run| {
            run.recorder.worst_fitness_history().iter().map(f64::to_string).collect()
        })?);
        written.push(write_per_function(&dir.join("function_calls.csv"), &exp_header, runs, suite, |run| {
            run.recorder.evaluation_calls_history().iter().map(u64::to_string).collect()
        })?);
        written.push(write_per_function(&dir.join("time_taken.csv"), &exp_header, runs, suite, |run| {
            (0..run.recorder.experimentations())
                .map(|e| run.recorder.elapsed_millis(e).to_string())
                .collect()
        })?);
        written.push(write_per_function(&dir.join("final_fitness.csv"), &cand_header, runs, suite, |run| {
            run.recorder
                .final_fitness()
                .map(|f| f.iter().map(f64::to_string).collect())
                .unwrap_or_default()
        })?);
        written.push(write_summary(&dir.join("summary.csv"), &rows)?);

        for run in runs {
            if let Some(matrix) = run.recorder.candidate_fitness() {
                let history_dir = dir.join("historic_fitness");
                fs::create_dir_all(&history_dir)?;
                let path = history_dir.join(format!("function_{}.csv", run.function));
                write_matrix(&path, matrix)?;
                written.push(path);
            }
        }

        info!(%algorithm, dir = %dir.display(), files = written.len(), "Reports written");
        Ok(written)
    }
}

fn numbered_header(prefix: &str, count: usize) -> Vec<String> {
    std::iter::once("function".to_string())
        .chain((1..=count).map(|i| format!("{}_{}", prefix, i)))
        .collect()
}

fn write_per_function<F>(
    path: &Path,
    header: &[String],
    runs: &[FunctionRun],
    suite: &BenchmarkSuite,
    values: F,
) -> ReportResult<PathBuf>
where
    F: Fn(&FunctionRun) -> Vec<String>,
{
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(header)?;
    for run in runs {
        let mut record = vec![function_label(suite, run.function)];
        record.extend(values(run));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    debug!(path = %path.display(), "Wrote report");
    Ok(path.to_path_buf())
}

fn write_summary(path: &Path, rows: &[SummaryRow]) -> ReportResult<PathBuf> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record([
        "function",
        "best",
        "worst",
        "mean",
        "std_dev",
        "total_evaluations",
        "total_time_ms",
    ])?;
    for row in rows {
        let s = &row.summary;
        wtr.write_record([
            row.function.clone(),
            s.best.to_string(),
            s.worst.to_string(),
            s.mean.to_string(),
            s.std_dev.to_string(),
            s.total_evaluations.to_string(),
            (s.total_elapsed.as_secs_f64() * 1000.0).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(path.to_path_buf())
}

/// Candidate rows, experimentation columns.
fn write_matrix(path: &Path, matrix: &Array2<f64>) -> ReportResult<()> {
    let mut wtr = Writer::from_path(path)?;
    let header: Vec<String> = std::iter::once("candidate".to_string())
        .chain((1..=matrix.ncols()).map(|i| format!("experimentation_{}", i)))
        .collect();
    wtr.write_record(&header)?;
    for (i, row) in matrix.rows().into_iter().enumerate() {
        let record: Vec<String> = std::iter::once((i + 1).to_string())
            .chain(row.iter().map(f64::to_string))
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
