//! Deterministic in-memory collaborators for unit and behaviour tests.
//!
//! These providers answer from fixed data so pipeline tests can assert on
//! exact outcomes: a distance-filtered search fixture, a constant-speed
//! time matrix, a scripted time matrix for exact duration scenarios, and
//! always-failing variants for degradation tests.

use geo::Coord;

use crate::{
    Candidate, DurationsSeconds, PlaceSearchError, PlaceSearchProvider, TimeMatrixError,
    TimeMatrixProvider, TransportMode,
};

/// Mean Earth radius used by the haversine helpers.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance between two WGS84 coordinates, in meters.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use detour_core::test_support::haversine_meters;
///
/// let greenwich = Coord { x: 0.0, y: 51.4779 };
/// let same = haversine_meters(greenwich, greenwich);
/// assert!(same < 1e-6);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is inherently floating-point"
)]
pub fn haversine_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().asin()
}

/// [`PlaceSearchProvider`] answering from a fixed candidate list.
///
/// A query returns the candidates whose `type_tag` matches and whose
/// location lies within the search radius of the query point.
#[derive(Debug, Clone, Default)]
pub struct StaticSearchProvider {
    candidates: Vec<Candidate>,
}

impl StaticSearchProvider {
    /// Build a provider over the given candidates.
    #[must_use]
    pub fn with_candidates<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = Candidate>,
    {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }
}

impl PlaceSearchProvider for StaticSearchProvider {
    fn search_nearby(
        &self,
        point: Coord<f64>,
        type_tag: &str,
        radius_meters: f64,
    ) -> Result<Vec<Candidate>, PlaceSearchError> {
        Ok(self
            .candidates
            .iter()
            .filter(|candidate| candidate.type_tag == type_tag)
            .filter(|candidate| haversine_meters(point, candidate.location) <= radius_meters)
            .cloned()
            .collect())
    }
}

/// [`PlaceSearchProvider`] that fails every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSearchProvider;

impl PlaceSearchProvider for FailingSearchProvider {
    fn search_nearby(
        &self,
        _point: Coord<f64>,
        _type_tag: &str,
        _radius_meters: f64,
    ) -> Result<Vec<Candidate>, PlaceSearchError> {
        Err(PlaceSearchError::Provider {
            message: "search provider unavailable".to_owned(),
        })
    }
}

/// [`TimeMatrixProvider`] deriving durations from straight-line distance at
/// a constant speed.
#[derive(Debug, Clone, Copy)]
pub struct SpeedTimeMatrix {
    meters_per_second: f64,
}

impl SpeedTimeMatrix {
    /// Build a provider travelling at `meters_per_second`.
    #[must_use]
    pub const fn new(meters_per_second: f64) -> Self {
        Self { meters_per_second }
    }
}

impl Default for SpeedTimeMatrix {
    /// Brisk walking pace.
    fn default() -> Self {
        Self::new(1.4)
    }
}

impl TimeMatrixProvider for SpeedTimeMatrix {
    #[expect(
        clippy::float_arithmetic,
        reason = "duration is distance over speed"
    )]
    fn durations(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
        _mode: TransportMode,
    ) -> Result<DurationsSeconds, TimeMatrixError> {
        if destinations.is_empty() {
            return Err(TimeMatrixError::EmptyInput);
        }
        Ok(destinations
            .iter()
            .map(|destination| haversine_meters(origin, *destination) / self.meters_per_second)
            .collect())
    }
}

/// [`TimeMatrixProvider`] answering from scripted per-origin duration lists.
///
/// Lets tests pin exact leg durations. Origins are matched by exact
/// coordinate equality; a query from an unscripted origin fails, which the
/// pipeline treats as all-unreachable.
#[derive(Debug, Clone, Default)]
pub struct PlannedTimeMatrix {
    plans: Vec<(Coord<f64>, DurationsSeconds)>,
}

impl PlannedTimeMatrix {
    /// Construct a provider with no plans.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the durations returned for queries from `origin`.
    #[must_use]
    pub fn with_plan(mut self, origin: Coord<f64>, durations: DurationsSeconds) -> Self {
        self.plans.push((origin, durations));
        self
    }
}

impl TimeMatrixProvider for PlannedTimeMatrix {
    fn durations(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
        _mode: TransportMode,
    ) -> Result<DurationsSeconds, TimeMatrixError> {
        if destinations.is_empty() {
            return Err(TimeMatrixError::EmptyInput);
        }
        self.plans
            .iter()
            .find(|(planned, _)| *planned == origin)
            .map(|(_, durations)| durations.clone())
            .ok_or_else(|| TimeMatrixError::Provider {
                message: format!("no planned durations for origin ({}, {})", origin.x, origin.y),
            })
    }
}

/// [`TimeMatrixProvider`] that fails every lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingTimeMatrix;

impl TimeMatrixProvider for FailingTimeMatrix {
    fn durations(
        &self,
        _origin: Coord<f64>,
        destinations: &[Coord<f64>],
        _mode: TransportMode,
    ) -> Result<DurationsSeconds, TimeMatrixError> {
        if destinations.is_empty() {
            return Err(TimeMatrixError::EmptyInput);
        }
        Err(TimeMatrixError::Provider {
            message: "time matrix unavailable".to_owned(),
        })
    }
}
