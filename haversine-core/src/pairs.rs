//! Typed view of the coordinate document: `{"pairs":[{"x0":..,"y0":..,"x1":..,"y1":..}, ...]}`.

use crate::error::{Error, Result};
use crate::haversine::reference_haversine;
use crate::value::Value;

/// Two points, longitude `x` and latitude `y`, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Pair {
    pub const FIELDS: [&'static str; 4] = ["x0", "y0", "x1", "y1"];

    pub fn distance(&self, earth_radius: f64) -> f64 {
        reference_haversine(self.x0, self.y0, self.x1, self.y1, earth_radius)
    }

    fn from_value(value: &Value, index: usize) -> Result<Pair> {
        let coord = |field: &'static str| -> Result<f64> {
            match value.field(field)? {
                Value::Null => Err(Error::MissingField { index, field }),
                other => other.get::<f64>(),
            }
        };
        Ok(Pair {
            x0: coord("x0")?,
            y0: coord("y0")?,
            x1: coord("x1")?,
            y1: coord("y1")?,
        })
    }
}

/// Pull every pair out of `root["pairs"]`, in document order.
pub fn extract_pairs(root: &Value) -> Result<Vec<Pair>> {
    root.field("pairs")?
        .as_array()?
        .iter()
        .enumerate()
        .map(|(index, value)| Pair::from_value(value, index))
        .collect()
}

/// Mean distance over `pairs`, accumulated as `Σ d · (1/n)`.
pub fn average_distance(pairs: &[Pair], earth_radius: f64) -> f64 {
    if pairs.is_empty() {
        return 0.0;
    }
    let coefficient = 1.0 / pairs.len() as f64;
    pairs
        .iter()
        .map(|pair| pair.distance(earth_radius) * coefficient)
        .sum()
}
