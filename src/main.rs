//! Swarmbench CLI: run the suite, list functions, print a parameter template.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use swarmbench::{report, ParameterFile, ReportWriter};
use swarmbench_functions::BenchmarkFunction;
use swarmbench_optimization::Algorithm;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swarmbench", version, about = "Population-based optimizer benchmark harness")]
struct Cli {
    /// Log engine progress (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgorithmChoice {
    Pso,
    Ffa,
    Hs,
    All,
}

impl AlgorithmChoice {
    fn algorithms(self) -> Vec<Algorithm> {
        match self {
            AlgorithmChoice::Pso => vec![Algorithm::Pso],
            AlgorithmChoice::Ffa => vec![Algorithm::Firefly],
            AlgorithmChoice::Hs => vec![Algorithm::Harmony],
            AlgorithmChoice::All => Algorithm::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run algorithms over the benchmark suite and write CSV reports
    Run {
        /// Parameter file (YAML, or JSON by extension)
        #[arg(long, short)]
        params: PathBuf,

        #[arg(long, short, value_enum, default_value = "all")]
        algorithm: AlgorithmChoice,

        /// Report directory
        #[arg(long, short, default_value = "results")]
        output: PathBuf,

        /// Base seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Run functions one after another instead of concurrently
        #[arg(long)]
        sequential: bool,

        /// Override the experimentation count
        #[arg(long)]
        experimentations: Option<usize>,
    },
    /// List benchmark functions and their default bounds
    Functions,
    /// Print a parameter file with every default filled in
    Params,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = dispatch(cli.command) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            params,
            algorithm,
            output,
            seed,
            sequential,
            experimentations,
        } => {
            let mut file = ParameterFile::load(&params)
                .with_context(|| format!("reading parameter file {}", params.display()))?;
            if seed.is_some() {
                file.seed = seed;
            }
            if sequential {
                file.parallel = false;
            }
            if let Some(count) = experimentations {
                file.experimentations = count;
            }
            run(&file, algorithm, output)
        }
        Commands::Functions => {
            print_functions();
            Ok(())
        }
        Commands::Params => {
            print!("{}", ParameterFile::template().to_yaml()?);
            Ok(())
        }
    }
}

fn run(file: &ParameterFile, algorithm: AlgorithmChoice, output: PathBuf) -> Result<()> {
    let experiment = file.resolve().context("invalid parameter file")?;
    let results = swarmbench::run_experiment(&experiment, &algorithm.algorithms())?;

    let writer = ReportWriter::new(output);
    for (algorithm, runs) in &results {
        writer.write(*algorithm, runs, &experiment.suite)?;
        let rows = report::summarize(runs, &experiment.suite)?;

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Function", "Best", "Mean", "Std Dev", "Evaluations", "Time (ms)"]);
        for row in &rows {
            let s = &row.summary;
            table.add_row(vec![
                row.function.clone(),
                format!("{:.6e}", s.best),
                format!("{:.6e}", s.mean),
                format!("{:.3e}", s.std_dev),
                s.total_evaluations.to_string(),
                format!("{:.2}", s.total_elapsed.as_secs_f64() * 1000.0),
            ]);
        }

        println!("{}", algorithm);
        println!("{}", table);
        println!("Reports in {}", writer.algorithm_dir(*algorithm).display());
    }
    Ok(())
}

fn print_functions() {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Aliases", "Lower", "Upper"]);
    for function in BenchmarkFunction::ALL {
        let (lower, upper) = function.default_bounds();
        table.add_row(vec![
            function.id().to_string(),
            function.name().to_string(),
            function.aliases().join(", "),
            lower.to_string(),
            upper.to_string(),
        ]);
    }
    println!("{}", table);
}
