//! Coordinate pair generation and the companion document writer.
//!
//! The generator produces a pairs document plus an answer file holding the
//! reference distance of every pair. Each coordinate is quantized through
//! the same 16-decimal text the document carries, so parsing the document
//! back yields exactly the values the answers were computed from.

use std::fmt;
use std::io::{BufWriter, Write};
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::answers::AnswerWriter;
use crate::error::{Error, Result};
use crate::haversine::EARTH_RADIUS;
use crate::pairs::Pair;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Number of clusters a clustered run is divided into.
pub const CLUSTER_COUNT: usize = 64;
pub const CLUSTER_LATITUDE_SPREAD: f64 = 5.0;
pub const CLUSTER_LONGITUDE_SPREAD: f64 = 5.0;

/// Pairs written per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Digits after the decimal point in the document.
pub const DECIMALS: usize = 16;

/// How points are spread over the globe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Uniform,
    Cluster,
}

impl Distribution {
    pub fn as_str(self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Cluster => "cluster",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "uniform" => Ok(Distribution::Uniform),
            "cluster" => Ok(Distribution::Cluster),
            other => Err(format!("unknown distribution {other:?}, expected uniform or cluster")),
        }
    }
}

/// Round `value` to what its document text decodes to.
pub fn quantize(value: f64) -> f64 {
    format!("{:.*}", DECIMALS, value).parse().unwrap_or(value)
}

#[inline]
fn uniform(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Cluster {
    center_lat: f64,
    center_lon: f64,
    offset_lat: f64,
    offset_lon: f64,
}

/// Endless, seeded source of coordinate pairs.
#[derive(Debug)]
pub struct PairGenerator {
    rng: StdRng,
    distribution: Distribution,
    points_per_cluster: usize,
    generated: usize,
    cluster: Cluster,
}

impl PairGenerator {
    /// `count` sizes the clusters: a clustered run of `count` pairs is split
    /// into [`CLUSTER_COUNT`] groups.
    pub fn new(distribution: Distribution, seed: u64, count: usize) -> Self {
        PairGenerator {
            rng: StdRng::seed_from_u64(seed),
            distribution,
            points_per_cluster: (count / CLUSTER_COUNT).max(1),
            generated: 0,
            cluster: Cluster::default(),
        }
    }

    fn uniform_pair(&mut self) -> Pair {
        let rng = &mut self.rng;
        Pair {
            x0: uniform(rng, MIN_LATITUDE, MAX_LATITUDE),
            y0: uniform(rng, MIN_LONGITUDE, MAX_LONGITUDE),
            x1: uniform(rng, MIN_LATITUDE, MAX_LATITUDE),
            y1: uniform(rng, MIN_LONGITUDE, MAX_LONGITUDE),
        }
    }

    fn cluster_pair(&mut self) -> Pair {
        if self.generated % self.points_per_cluster == 0 {
            let rng = &mut self.rng;
            self.cluster = Cluster {
                center_lat: uniform(rng, MIN_LATITUDE, MAX_LATITUDE),
                center_lon: uniform(rng, MIN_LONGITUDE, MAX_LONGITUDE),
                offset_lat: uniform(rng, 0.0, CLUSTER_LATITUDE_SPREAD),
                offset_lon: uniform(rng, 0.0, CLUSTER_LONGITUDE_SPREAD),
            };
        }

        let c = self.cluster;
        let lat_edge = (c.center_lat + c.offset_lat).clamp(MIN_LATITUDE, MAX_LATITUDE);
        let lon_edge = (c.center_lon + c.offset_lon).clamp(MIN_LONGITUDE, MAX_LONGITUDE);
        let (lat_lo, lat_hi) = (c.center_lat.min(lat_edge), c.center_lat.max(lat_edge));
        let (lon_lo, lon_hi) = (c.center_lon.min(lon_edge), c.center_lon.max(lon_edge));

        let rng = &mut self.rng;
        Pair {
            x0: uniform(rng, lat_lo, lat_hi),
            y0: uniform(rng, lon_lo, lon_hi),
            x1: uniform(rng, lat_lo, lat_hi),
            y1: uniform(rng, lon_lo, lon_hi),
        }
    }
}

impl Iterator for PairGenerator {
    type Item = Pair;

    fn next(&mut self) -> Option<Pair> {
        let raw = match self.distribution {
            Distribution::Uniform => self.uniform_pair(),
            Distribution::Cluster => self.cluster_pair(),
        };
        self.generated += 1;
        Some(Pair {
            x0: quantize(raw.x0),
            y0: quantize(raw.y0),
            x1: quantize(raw.x1),
            y1: quantize(raw.y1),
        })
    }
}

/// Writes the pairs document incrementally.
///
/// Output shape: `{"pairs":[` and a newline, one indented object per pair
/// separated by `,\n`, a newline after the last pair, then `]}`.
pub struct DocumentWriter<W: Write> {
    out: BufWriter<W>,
    written: usize,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(out: W) -> Result<Self> {
        let mut out = BufWriter::new(out);
        out.write_all(b"{\"pairs\":[\n")?;
        Ok(DocumentWriter { out, written: 0 })
    }

    pub fn write_pair(&mut self, pair: &Pair) -> Result<()> {
        if self.written > 0 {
            self.out.write_all(b",\n")?;
        }
        write!(
            self.out,
            "    {{\"x0\":{:.p$}, \"y0\":{:.p$}, \"x1\":{:.p$}, \"y1\":{:.p$}}}",
            pair.x0,
            pair.y0,
            pair.x1,
            pair.y1,
            p = DECIMALS
        )?;
        self.written += 1;
        Ok(())
    }

    pub fn write_batch(&mut self, pairs: &[Pair]) -> Result<()> {
        pairs.iter().try_for_each(|pair| self.write_pair(pair))
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Close the document and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        if self.written > 0 {
            self.out.write_all(b"\n")?;
        }
        self.out.write_all(b"]}")?;
        self.out.flush()?;
        self.out
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))
    }
}

/// Generator run parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateOptions {
    pub distribution: Distribution,
    pub seed: u64,
    pub count: usize,
    pub batch_size: usize,
    pub earth_radius: f64,
}

impl GenerateOptions {
    pub fn new(distribution: Distribution, seed: u64, count: usize) -> Self {
        GenerateOptions {
            distribution,
            seed,
            count,
            batch_size: DEFAULT_BATCH_SIZE,
            earth_radius: EARTH_RADIUS,
        }
    }
}

/// Outcome of a generator run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateSummary {
    pub count: usize,
    /// Mean reference distance, the value the benchmark should reproduce.
    pub expected_sum: f64,
}

/// Generate `options.count` pairs into a document and an answer file.
pub fn generate<J: Write, A: Write>(
    options: &GenerateOptions,
    json_out: J,
    answers_out: A,
) -> Result<GenerateSummary> {
    let batch_size = options.batch_size.max(1);
    let coefficient = if options.count > 0 {
        1.0 / options.count as f64
    } else {
        0.0
    };

    let mut document = DocumentWriter::new(json_out)?;
    let mut answers = AnswerWriter::new(answers_out);
    let mut generator = PairGenerator::new(options.distribution, options.seed, options.count);

    let mut pairs = Vec::with_capacity(batch_size.min(options.count));
    let mut distances = Vec::with_capacity(pairs.capacity());
    let mut expected_sum = 0.0;
    let mut remaining = options.count;

    while remaining > 0 {
        let take = remaining.min(batch_size);
        pairs.clear();
        distances.clear();
        for pair in generator.by_ref().take(take) {
            let distance = pair.distance(options.earth_radius);
            expected_sum += distance * coefficient;
            distances.push(distance);
            pairs.push(pair);
        }

        document.write_batch(&pairs)?;
        answers.write_batch(&distances)?;
        remaining -= take;
        tracing::debug!(batch = take, written = document.written(), "wrote pair batch");
    }

    document.finish()?;
    answers.finish()?;

    Ok(GenerateSummary {
        count: options.count,
        expected_sum,
    })
}
