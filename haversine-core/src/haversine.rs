//! Reference great-circle distance.
//!
//! Follows the formula used by the benchmark's answer files exactly, so
//! that sums computed here match the generated reference values bit for bit.

/// Earth radius in kilometres used by the benchmark.
pub const EARTH_RADIUS: f64 = 6372.8;

#[inline]
fn square(a: f64) -> f64 {
    a * a
}

#[inline]
fn radians_from_degrees(degrees: f64) -> f64 {
    0.017_453_292_519_943_295_77 * degrees
}

/// Distance between `(x0, y0)` and `(x1, y1)`, where `x` is longitude and
/// `y` latitude, both in degrees.
pub fn reference_haversine(x0: f64, y0: f64, x1: f64, y1: f64, earth_radius: f64) -> f64 {
    let lat1 = y0;
    let lat2 = y1;
    let lon1 = x0;
    let lon2 = x1;

    let d_lat = radians_from_degrees(lat2 - lat1);
    let d_lon = radians_from_degrees(lon2 - lon1);
    let lat1 = radians_from_degrees(lat1);
    let lat2 = radians_from_degrees(lat2);

    let a = square((d_lat / 2.0).sin()) + lat1.cos() * lat2.cos() * square((d_lon / 2.0).sin());
    let c = 2.0 * a.sqrt().asin();

    earth_radius * c
}
