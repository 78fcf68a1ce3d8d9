//! Cost & quality filtering of collected candidates.
//!
//! Detour cost is estimated symmetrically: origin→candidate plus
//! destination→candidate, minus the direct baseline. Direction is
//! irrelevant at this accuracy, so the destination-side lookup stands in
//! for candidate→destination time. The two lookups are independent and run
//! concurrently; both must land before the per-candidate arithmetic.

use geo::Coord;

use detour_core::{Candidate, ScoredCandidate, TimeMatrixProvider, TransportMode};

use crate::config::SuggestConfig;

/// Tolerance absorbing float rounding at the exact minute-budget boundary.
const EPSILON_MINUTES: f64 = 1e-6;

/// Weight of the rating in the composite score.
const RATING_WEIGHT: f64 = 1.0;
/// Weight of log-scaled review volume in the composite score.
const REVIEW_WEIGHT: f64 = 0.3;
/// Penalty per additional detour minute in the composite score.
const DETOUR_PENALTY: f64 = 0.2;

/// Fixed inputs of one filtering pass.
pub(crate) struct CostContext<'a> {
    /// Trip start.
    pub origin: Coord<f64>,
    /// Trip end.
    pub destination: Coord<f64>,
    /// Direct origin→destination duration in seconds.
    pub baseline_seconds: f64,
    /// Transport mode for all duration lookups.
    pub mode: TransportMode,
    /// Thresholds for the time budget and quality bar.
    pub config: &'a SuggestConfig,
}

/// Score candidates and drop those failing the time budget or quality bar.
///
/// Candidates unreachable from either side are discarded. A provider error
/// on either leg degrades that leg to all-unreachable rather than failing
/// the run.
pub(crate) fn filter_and_score<T>(
    matrix: &T,
    candidates: Vec<Candidate>,
    context: &CostContext<'_>,
) -> Vec<ScoredCandidate>
where
    T: TimeMatrixProvider + ?Sized,
{
    if candidates.is_empty() {
        return Vec::new();
    }

    let coordinates: Vec<Coord<f64>> = candidates.iter().map(|c| c.location).collect();
    let (origin_leg, destination_leg) = std::thread::scope(|scope| {
        let origin_thread =
            scope.spawn(|| leg_durations(matrix, context.origin, &coordinates, context.mode));
        let destination_leg =
            leg_durations(matrix, context.destination, &coordinates, context.mode);
        let origin_leg = origin_thread.join().unwrap_or_else(|_| {
            log::warn!("origin-side duration lookup panicked; treating leg as unreachable");
            vec![f64::INFINITY; coordinates.len()]
        });
        (origin_leg, destination_leg)
    });

    candidates
        .into_iter()
        .zip(origin_leg.into_iter().zip(destination_leg))
        .filter_map(|(candidate, (from_origin, from_destination))| {
            score_candidate(candidate, from_origin, from_destination, context)
        })
        .collect()
}

/// One side of the detour estimate; failures degrade to all-unreachable.
fn leg_durations<T>(
    matrix: &T,
    origin: Coord<f64>,
    destinations: &[Coord<f64>],
    mode: TransportMode,
) -> Vec<f64>
where
    T: TimeMatrixProvider + ?Sized,
{
    match matrix.durations(origin, destinations, mode) {
        Ok(durations) if durations.len() == destinations.len() => durations,
        Ok(durations) => {
            log::warn!(
                "time matrix returned {} durations for {} destinations; treating leg as unreachable",
                durations.len(),
                destinations.len(),
            );
            vec![f64::INFINITY; destinations.len()]
        }
        Err(error) => {
            log::warn!("time matrix lookup failed: {error}; treating leg as unreachable");
            vec![f64::INFINITY; destinations.len()]
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "detour cost and composite score are floating-point policy arithmetic"
)]
fn score_candidate(
    candidate: Candidate,
    from_origin: f64,
    from_destination: f64,
    context: &CostContext<'_>,
) -> Option<ScoredCandidate> {
    if !from_origin.is_finite() || !from_destination.is_finite() {
        return None;
    }

    let additional_minutes =
        (from_origin + from_destination - context.baseline_seconds) / 60.0;
    if additional_minutes > context.config.max_additional_minutes + EPSILON_MINUTES {
        return None;
    }
    if candidate.rating_or_default() < context.config.min_rating {
        return None;
    }
    if candidate.review_count_or_default() < context.config.min_reviews {
        return None;
    }

    let score = f64::from(candidate.rating_or_default()) * RATING_WEIGHT
        + (f64::from(candidate.review_count_or_default()) + 1.0).ln() * REVIEW_WEIGHT
        - additional_minutes * DETOUR_PENALTY;

    Some(ScoredCandidate {
        candidate,
        additional_minutes,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use detour_core::Category;
    use detour_core::test_support::{FailingTimeMatrix, PlannedTimeMatrix};
    use rstest::{fixture, rstest};

    const TOLERANCE: f64 = 1e-9;

    const fn coord(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn rated_cafe(id: &str) -> Candidate {
        Candidate::new(id, coord(0.5, 0.5), Category::Food, "cafe").with_quality(4.0, 50)
    }

    #[fixture]
    fn config() -> SuggestConfig {
        SuggestConfig {
            min_rating: 3.5,
            min_reviews: 10,
            max_additional_minutes: 10.0,
            ..SuggestConfig::default()
        }
    }

    const fn context(baseline: f64, config: &SuggestConfig) -> CostContext<'_> {
        CostContext {
            origin: coord(0.0, 0.0),
            destination: coord(1.0, 1.0),
            baseline_seconds: baseline,
            mode: TransportMode::Driving,
            config,
        }
    }

    #[rstest]
    #[expect(clippy::indexing_slicing, reason = "test asserts on the single result")]
    fn zero_detour_candidate_passes(config: SuggestConfig) {
        // Baseline 1800s; legs 600s + 1200s => exactly zero extra minutes.
        let matrix = PlannedTimeMatrix::new()
            .with_plan(coord(0.0, 0.0), vec![600.0])
            .with_plan(coord(1.0, 1.0), vec![1200.0]);

        let scored = filter_and_score(&matrix, vec![rated_cafe("c1")], &context(1800.0, &config));

        assert_eq!(scored.len(), 1);
        assert!(scored[0].additional_minutes.abs() < TOLERANCE);
    }

    #[rstest]
    fn over_budget_candidate_is_dropped() {
        // Baseline 1800s; total 2400s => 10 extra minutes against a 5 minute cap.
        let tight = SuggestConfig {
            max_additional_minutes: 5.0,
            ..config()
        };
        let matrix = PlannedTimeMatrix::new()
            .with_plan(coord(0.0, 0.0), vec![1000.0])
            .with_plan(coord(1.0, 1.0), vec![1400.0]);

        let scored = filter_and_score(&matrix, vec![rated_cafe("c1")], &context(1800.0, &tight));
        assert!(scored.is_empty());
    }

    #[rstest]
    #[expect(
        clippy::indexing_slicing,
        clippy::float_arithmetic,
        reason = "test compares float maths on the single result"
    )]
    fn exact_budget_boundary_is_included(config: SuggestConfig) {
        // 600 extra seconds == exactly the 10 minute budget.
        let matrix = PlannedTimeMatrix::new()
            .with_plan(coord(0.0, 0.0), vec![1200.0])
            .with_plan(coord(1.0, 1.0), vec![1200.0]);

        let scored = filter_and_score(&matrix, vec![rated_cafe("c1")], &context(1800.0, &config));
        assert_eq!(scored.len(), 1);
        assert!((scored[0].additional_minutes - 10.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn unreachable_candidate_is_dropped(config: SuggestConfig) {
        let matrix = PlannedTimeMatrix::new()
            .with_plan(coord(0.0, 0.0), vec![f64::INFINITY])
            .with_plan(coord(1.0, 1.0), vec![600.0]);

        let scored = filter_and_score(&matrix, vec![rated_cafe("c1")], &context(1800.0, &config));
        assert!(scored.is_empty());
    }

    #[rstest]
    #[case(None, None)] // unrated counts as rating 0, reviews 0
    #[case(Some((3.4, 50)), None)] // below min rating
    #[case(Some((4.0, 9)), None)] // below min reviews
    #[case(Some((3.5, 10)), Some(()))] // exactly at both bars
    fn quality_bar_is_enforced(
        #[case] quality: Option<(f32, u32)>,
        #[case] expected: Option<()>,
        config: SuggestConfig,
    ) {
        let mut candidate = Candidate::new("c1", coord(0.5, 0.5), Category::Food, "cafe");
        if let Some((rating, reviews)) = quality {
            candidate = candidate.with_quality(rating, reviews);
        }
        let matrix = PlannedTimeMatrix::new()
            .with_plan(coord(0.0, 0.0), vec![600.0])
            .with_plan(coord(1.0, 1.0), vec![1200.0]);

        let scored = filter_and_score(&matrix, vec![candidate], &context(1800.0, &config));
        assert_eq!(scored.is_empty(), expected.is_none());
    }

    #[rstest]
    #[expect(
        clippy::indexing_slicing,
        clippy::float_arithmetic,
        reason = "test compares float maths on the single result"
    )]
    fn score_rewards_quality_and_penalises_detour(config: SuggestConfig) {
        // additional = (600 + 1500 - 1800) / 60 = 5 minutes.
        let matrix = PlannedTimeMatrix::new()
            .with_plan(coord(0.0, 0.0), vec![600.0])
            .with_plan(coord(1.0, 1.0), vec![1500.0]);
        let candidate = Candidate::new("c1", coord(0.5, 0.5), Category::Food, "cafe")
            .with_quality(4.0, 99);

        let scored = filter_and_score(&matrix, vec![candidate], &context(1800.0, &config));

        let expected = 4.0 + 100.0_f64.ln() * 0.3 - 5.0 * 0.2;
        assert_eq!(scored.len(), 1);
        assert!((scored[0].score - expected).abs() < TOLERANCE);
    }

    #[rstest]
    fn empty_input_skips_provider_entirely(config: SuggestConfig) {
        // FailingTimeMatrix would error; an empty pool must never reach it.
        let scored = filter_and_score(&FailingTimeMatrix, Vec::new(), &context(1800.0, &config));
        assert!(scored.is_empty());
    }

    #[rstest]
    fn provider_failure_degrades_to_empty(config: SuggestConfig) {
        let scored = filter_and_score(
            &FailingTimeMatrix,
            vec![rated_cafe("c1")],
            &context(1800.0, &config),
        );
        assert!(scored.is_empty());
    }
}
