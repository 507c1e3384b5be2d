//! Parse a pairs document, sum the haversine distances, and check the sum
//! against a reference answer file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueHint};
use haversine_cli::{init_tracing, validate, Profiler};
use haversine_core::EARTH_RADIUS;

#[derive(Parser, Debug)]
#[command(name = "haversine", version, about = "Haversine distance benchmark")]
struct Cli {
    /// Pairs document, as written by haversine-gen
    #[arg(value_hint = ValueHint::FilePath)]
    pairs_json: PathBuf,

    /// Reference distances, little-endian f64 (.f64)
    #[arg(value_hint = ValueHint::FilePath)]
    answers_f64: PathBuf,

    /// Sphere radius used for the distances
    #[arg(long, default_value_t = EARTH_RADIUS)]
    earth_radius: f64,

    /// Skip the timing table
    #[arg(long)]
    no_profile: bool,
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

    let mut profiler = Profiler::new();
    let report = match validate::run(&cli.pairs_json, &cli.answers_f64, cli.earth_radius, &mut profiler) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    print!("{report}");
    if !cli.no_profile {
        println!();
        print!("{}", profiler.finish());
    }
    ExitCode::SUCCESS
}
