//! Write a random pairs document and its reference answer file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueHint};
use haversine_cli::{init_tracing, CliError};
use haversine_core::generate::{generate, Distribution, GenerateOptions, GenerateSummary, DEFAULT_BATCH_SIZE};

#[derive(Parser, Debug)]
#[command(name = "haversine-gen", version, about = "Generate haversine benchmark input")]
struct Cli {
    /// Point distribution: uniform or cluster
    distribution: Distribution,

    /// Random seed
    seed: u64,

    /// Number of pairs to generate
    count: usize,

    /// Where to write the pairs document
    #[arg(long, default_value = "coordinates.json", value_hint = ValueHint::FilePath)]
    json_out: PathBuf,

    /// Where to write the reference distances
    #[arg(long, default_value = "distance_answers.f64", value_hint = ValueHint::FilePath)]
    answers_out: PathBuf,

    /// Pairs generated per write
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

fn create(path: &Path) -> Result<File, CliError> {
    File::create(path).map_err(|source| CliError::Create {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: &Cli) -> Result<GenerateSummary, CliError> {
    let json = create(&cli.json_out)?;
    let answers = create(&cli.answers_out)?;

    let mut options = GenerateOptions::new(cli.distribution, cli.seed, cli.count);
    options.batch_size = cli.batch_size;
    Ok(generate(&options, json, answers)?)
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let summary = match run(&cli) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Method: {}", cli.distribution);
    println!("Random seed: {}", cli.seed);
    println!("Pair count: {}", summary.count);
    println!("Expected sum: {:.16}", summary.expected_sum);
    ExitCode::SUCCESS
}
