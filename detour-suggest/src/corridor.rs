//! Corridor sampling between origin and destination.
//!
//! Candidate discovery happens around a fixed set of evaluation points on
//! the straight line between the endpoints. Interpolation is plain lat/lon
//! arithmetic with no road-network awareness; the time-matrix stage is
//! where real travel costs enter.

use geo::Coord;

/// Parametric positions of the evaluation points along the corridor.
pub const SAMPLE_POSITIONS: [f64; 3] = [0.25, 0.5, 0.75];

/// Interpolated evaluation points between `origin` and `destination`.
///
/// Pure and infallible; identical inputs always yield identical points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use detour_suggest::corridor::sample;
///
/// let points = sample(Coord { x: 0.0, y: 0.0 }, Coord { x: 4.0, y: 8.0 });
/// assert_eq!(points[1], Coord { x: 2.0, y: 4.0 });
/// ```
#[must_use]
pub fn sample(origin: Coord<f64>, destination: Coord<f64>) -> [Coord<f64>; 3] {
    SAMPLE_POSITIONS.map(|t| lerp(origin, destination, t))
}

#[expect(
    clippy::float_arithmetic,
    reason = "linear interpolation in coordinate space"
)]
fn lerp(origin: Coord<f64>, destination: Coord<f64>, t: f64) -> Coord<f64> {
    Coord {
        x: origin.x + (destination.x - origin.x) * t,
        y: origin.y + (destination.y - origin.y) * t,
    }
}
