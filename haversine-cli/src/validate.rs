//! The benchmark proper: read both inputs, parse, sum, compare.

use std::fmt;
use std::fs;
use std::path::Path;

use haversine_core::answers::decode_answers;
use haversine_core::{average_distance, extract_pairs, parse};

use crate::error::CliError;
use crate::profile::Profiler;

/// Reject the run before any work is done.
pub fn check_inputs(json: &Path, answers: &Path) -> Result<(), CliError> {
    if answers.extension().and_then(|ext| ext.to_str()) != Some("f64") {
        return Err(CliError::NotF64(answers.to_path_buf()));
    }
    for path in [json, answers] {
        if !path.is_file() {
            return Err(CliError::Missing(path.to_path_buf()));
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Outcome of one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Report {
    pub input_size: usize,
    pub pair_count: usize,
    pub sum: f64,
    pub reference_sum: f64,
}

impl Report {
    pub fn difference(&self) -> f64 {
        self.sum - self.reference_sum
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input size: {}", self.input_size)?;
        writeln!(f, "Pair count: {}", self.pair_count)?;
        writeln!(f, "Haversine sum: {:.16}", self.sum)?;
        writeln!(f, "Validation:")?;
        writeln!(f, "Reference sum: {:.16}", self.reference_sum)?;
        writeln!(f, "Difference: {:.16}", self.difference())
    }
}

/// Mean of the answer file, accumulated the same way as the computed sum.
fn reference_average(answers: &[f64]) -> f64 {
    if answers.is_empty() {
        return 0.0;
    }
    let coefficient = 1.0 / answers.len() as f64;
    answers.iter().map(|answer| answer * coefficient).sum()
}

/// Run the benchmark over `json` and `answers`, timing each stage.
pub fn run(
    json: &Path,
    answers: &Path,
    earth_radius: f64,
    profiler: &mut Profiler,
) -> Result<Report, CliError> {
    profiler.time("check_inputs", || check_inputs(json, answers))?;

    let json_len = fs::metadata(json).map(|m| m.len()).unwrap_or(0);
    let bytes = profiler.time_bandwidth("read_json", json_len, || read(json))?;
    let text = String::from_utf8(bytes).map_err(|source| CliError::NotUtf8 {
        path: json.to_path_buf(),
        source,
    })?;

    let root = profiler.time_bandwidth("parse", text.len() as u64, || parse(&text))?;
    let pairs = profiler.time("extract_pairs", || extract_pairs(&root))?;
    tracing::debug!(pairs = pairs.len(), "extracted pairs");

    let answers_len = fs::metadata(answers).map(|m| m.len()).unwrap_or(0);
    let raw = profiler.time_bandwidth("read_answers", answers_len, || read(answers))?;
    let answers = decode_answers(&raw)?;

    if answers.len() != pairs.len() {
        return Err(CliError::CountMismatch {
            pairs: pairs.len(),
            answers: answers.len(),
        });
    }

    let (sum, reference_sum) = profiler.time("sum", || {
        (average_distance(&pairs, earth_radius), reference_average(&answers))
    });

    Ok(Report {
        input_size: text.len(),
        pair_count: pairs.len(),
        sum,
        reference_sum,
    })
}
