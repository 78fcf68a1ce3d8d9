//! The suggestion engine: pipeline orchestration and the retry loop.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use geo::Coord;
use thiserror::Error;

use detour_core::{
    Genre, Mood, MoodTypeLookup, PlaceId, PlaceSearchProvider, StoreError, SuggestionStore,
    TimeMatrixProvider, TransportMode, TypeDisplayNameLookup,
};

use crate::config::{ConfigError, SuggestConfig};
use crate::filter::CostContext;
use crate::{collect, corridor, filter, publish, select};

/// Errors from [`SuggestionEngine::suggest`].
///
/// Provider variability never surfaces here; it degrades to an empty
/// result inside the pipeline. Only malformed configuration and
/// persistence failures are hard errors.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The engine configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parameters of one suggestion run.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use geo::Coord;
/// use detour_core::{Mood, TransportMode};
/// use detour_suggest::SuggestRequest;
///
/// let request = SuggestRequest {
///     origin: Coord { x: 139.69, y: 35.68 },
///     destination: Coord { x: 139.77, y: 35.71 },
///     mood: Mood::new("hungry", "cosy"),
///     mode: TransportMode::Walking,
///     now: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
///     seed: "session-42".into(),
///     time_budget: None,
/// };
/// assert_eq!(request.mode, TransportMode::Walking);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestRequest {
    /// Trip start.
    pub origin: Coord<f64>,
    /// Trip end.
    pub destination: Coord<f64>,
    /// What the traveller feels like on the way.
    pub mood: Mood,
    /// Transport mode for all duration estimates.
    pub mode: TransportMode,
    /// Wall-clock time of the request; feeds the selection seed.
    pub now: DateTime<Utc>,
    /// Caller-supplied semantic seed for reproducible selection.
    pub seed: String,
    /// Optional wall-clock budget; once exceeded the run degrades to an
    /// empty result instead of blocking the caller's loading state.
    pub time_budget: Option<Duration>,
}

/// The waypoint suggestion engine.
///
/// Generic over its five collaborator seams: place search, time matrix,
/// mood lookup, display-name lookup, and the suggestion store. All state
/// shared across runs lives behind the store; the engine itself is
/// stateless and a single instance can serve many runs.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use geo::Coord;
/// use detour_core::test_support::{SpeedTimeMatrix, StaticSearchProvider};
/// use detour_core::{DisplayNameTable, MemoryStore, Mood, MoodTypeTable, TransportMode};
/// use detour_suggest::{SuggestRequest, SuggestionEngine};
///
/// let engine = SuggestionEngine::new(
///     StaticSearchProvider::default(),
///     SpeedTimeMatrix::default(),
///     MoodTypeTable::new().with_types("hungry", "cosy", ["cafe"]),
///     DisplayNameTable::new(),
///     MemoryStore::new(),
/// );
/// let request = SuggestRequest {
///     origin: Coord { x: 0.0, y: 0.0 },
///     destination: Coord { x: 0.05, y: 0.0 },
///     mood: Mood::new("hungry", "cosy"),
///     mode: TransportMode::Walking,
///     now: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
///     seed: "demo".into(),
///     time_budget: None,
/// };
/// // Nothing indexed, so the run legitimately finds no detour.
/// assert!(engine.suggest(&request)?.is_empty());
/// # Ok::<(), detour_suggest::SuggestError>(())
/// ```
pub struct SuggestionEngine<P, T, M, N, S>
where
    P: PlaceSearchProvider,
    T: TimeMatrixProvider,
    M: MoodTypeLookup,
    N: TypeDisplayNameLookup,
    S: SuggestionStore,
{
    search: P,
    matrix: T,
    moods: M,
    names: N,
    store: S,
    config: SuggestConfig,
}

impl<P, T, M, N, S> SuggestionEngine<P, T, M, N, S>
where
    P: PlaceSearchProvider,
    T: TimeMatrixProvider,
    M: MoodTypeLookup,
    N: TypeDisplayNameLookup,
    S: SuggestionStore,
{
    /// Construct an engine with the default policy configuration.
    #[must_use]
    pub fn new(search: P, matrix: T, moods: M, names: N, store: S) -> Self {
        Self::with_config(search, matrix, moods, names, store, SuggestConfig::default())
    }

    /// Construct an engine with explicit policy configuration.
    #[must_use]
    pub const fn with_config(
        search: P,
        matrix: T,
        moods: M,
        names: N,
        store: S,
        config: SuggestConfig,
    ) -> Self {
        Self {
            search,
            matrix,
            moods,
            names,
            store,
            config,
        }
    }

    /// Borrow the persistence collaborator.
    ///
    /// After arrival the caller resolves a chosen genre id back to the
    /// concrete place through the store; this accessor supports embedders
    /// that hand ownership of the store to the engine.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Suggest up to `result_count` anonymized genres for the trip.
    ///
    /// An empty list is the legitimate "no detour available" outcome; it is
    /// produced when the mood maps to no type tags, the direct route is
    /// unreachable, the time budget expires, or both widened-radius
    /// attempts come up empty.
    ///
    /// # Errors
    /// [`SuggestError::Config`] for malformed configuration and
    /// [`SuggestError::Store`] when the persistence collaborator fails;
    /// provider failures degrade to the empty outcome instead.
    pub fn suggest(&self, request: &SuggestRequest) -> Result<Vec<Genre>, SuggestError> {
        self.config.validate()?;
        let deadline = request.time_budget.map(|budget| Instant::now() + budget);

        let type_tags = self.moods.types_for(&request.mood);
        if type_tags.is_empty() {
            log::debug!(
                "mood ({}, {}) maps to no type tags; nothing to suggest",
                request.mood.activity,
                request.mood.vibe,
            );
            return Ok(Vec::new());
        }

        let Some(baseline_seconds) = self.baseline_seconds(request) else {
            log::debug!("direct route is unreachable; no detour concept applies");
            return Ok(Vec::new());
        };

        let excluded: HashSet<PlaceId> = self.store.excluded_ids()?.into_iter().collect();
        let seed_input = seed_input(request, &self.config);
        let points = corridor::sample(request.origin, request.destination);

        for attempt in 0..self.config.max_attempts {
            if deadline_passed(deadline) {
                log::debug!("time budget exhausted before attempt {attempt}; giving up");
                break;
            }
            let radius = attempt_radius(&self.config, attempt);
            let candidates =
                collect::collect(&self.search, &points, &type_tags, radius, &excluded);
            log::debug!(
                "attempt {attempt}: {} candidates within {radius} m",
                candidates.len(),
            );
            if deadline_passed(deadline) {
                log::debug!("time budget exhausted after collection; giving up");
                break;
            }
            if candidates.is_empty() {
                continue;
            }

            let context = CostContext {
                origin: request.origin,
                destination: request.destination,
                baseline_seconds,
                mode: request.mode,
                config: &self.config,
            };
            let pool = filter::filter_and_score(&self.matrix, candidates, &context);
            let winners = select::select(&pool, &seed_input, self.config.result_count);
            if winners.is_empty() {
                log::debug!("attempt {attempt}: no qualifying candidates");
                continue;
            }

            let genres = publish::publish(&self.names, &self.store, &winners, &seed_input)?;
            return Ok(genres);
        }

        Ok(Vec::new())
    }

    /// Direct origin→destination duration, or `None` when unreachable.
    fn baseline_seconds(&self, request: &SuggestRequest) -> Option<f64> {
        let durations = match self.matrix.durations(
            request.origin,
            std::slice::from_ref(&request.destination),
            request.mode,
        ) {
            Ok(durations) => durations,
            Err(error) => {
                log::warn!("baseline duration lookup failed: {error}");
                return None;
            }
        };
        durations.first().copied().filter(|seconds| seconds.is_finite())
    }
}

/// Selection seed for one run.
///
/// Combines the calendar day with the caller seed, plus the epoch seconds
/// of "now" when [`SuggestConfig::timestamp_entropy`] is set.
fn seed_input(request: &SuggestRequest, config: &SuggestConfig) -> String {
    let day = request.now.format("%Y-%m-%d");
    if config.timestamp_entropy {
        format!("{day}:{}:{}", request.seed, request.now.timestamp())
    } else {
        format!("{day}:{}", request.seed)
    }
}

fn deadline_passed(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|instant| Instant::now() >= instant)
}

#[expect(
    clippy::float_arithmetic,
    reason = "radius widening is linear in the attempt number"
)]
fn attempt_radius(config: &SuggestConfig, attempt: u32) -> f64 {
    config.base_corridor_radius_meters + f64::from(attempt) * config.radius_increment_meters
}
