//! Candidate collection across corridor points and mood type tags.

use std::collections::HashSet;

use geo::Coord;

use detour_core::{Candidate, PlaceId, PlaceSearchProvider};

/// Query the search provider for every (point, type tag) pair and
/// aggregate the results.
///
/// Duplicates (by place id) keep their first occurrence; excluded ids are
/// dropped on sight so they never reach the time-matrix stage. A failed
/// query degrades to an empty result for that pair; only the union
/// matters, so partial results are fine.
pub(crate) fn collect<P>(
    search: &P,
    points: &[Coord<f64>],
    type_tags: &[String],
    radius_meters: f64,
    excluded: &HashSet<PlaceId>,
) -> Vec<Candidate>
where
    P: PlaceSearchProvider + ?Sized,
{
    let mut seen: HashSet<PlaceId> = HashSet::new();
    let mut collected = Vec::new();

    for point in points {
        for type_tag in type_tags {
            let found = match search.search_nearby(*point, type_tag, radius_meters) {
                Ok(found) => found,
                Err(error) => {
                    log::warn!(
                        "place search for '{type_tag}' at ({}, {}) failed: {error}; skipping",
                        point.x,
                        point.y,
                    );
                    continue;
                }
            };
            for candidate in found {
                if excluded.contains(&candidate.id) {
                    continue;
                }
                if seen.insert(candidate.id.clone()) {
                    collected.push(candidate);
                }
            }
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use detour_core::Category;
    use detour_core::test_support::{FailingSearchProvider, StaticSearchProvider};
    use rstest::rstest;

    const fn coord(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn cafe(id: &str, x: f64, y: f64) -> Candidate {
        Candidate::new(id, coord(x, y), Category::Food, "cafe")
    }

    #[rstest]
    fn aggregates_across_points_and_tags() {
        let park = Candidate::new("p1", coord(0.02, 0.0), Category::Other, "park");
        let provider =
            StaticSearchProvider::with_candidates([cafe("c1", 0.0, 0.0), park.clone()]);
        let points = [coord(0.0, 0.0), coord(0.02, 0.0)];
        let tags = vec!["cafe".to_owned(), "park".to_owned()];

        let collected = collect(&provider, &points, &tags, 500.0, &HashSet::new());

        let ids: Vec<&str> = collected.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "p1"]);
    }

    #[rstest]
    fn deduplicates_keeping_first_occurrence() {
        // The same cafe is in range of both corridor points.
        let provider = StaticSearchProvider::with_candidates([cafe("c1", 0.001, 0.0)]);
        let points = [coord(0.0, 0.0), coord(0.002, 0.0)];
        let tags = vec!["cafe".to_owned()];

        let collected = collect(&provider, &points, &tags, 1_000.0, &HashSet::new());
        assert_eq!(collected.len(), 1);
    }

    #[rstest]
    fn excluded_ids_are_dropped() {
        let provider = StaticSearchProvider::with_candidates([
            cafe("c1", 0.0, 0.0),
            cafe("c2", 0.0, 0.0),
        ]);
        let excluded: HashSet<PlaceId> = HashSet::from(["c1".to_owned()]);

        let collected = collect(
            &provider,
            &[coord(0.0, 0.0)],
            &["cafe".to_owned()],
            500.0,
            &excluded,
        );
        let ids: Vec<&str> = collected.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c2"]);
    }

    #[rstest]
    fn provider_failure_degrades_to_empty() {
        let provider = FailingSearchProvider;
        let collected = collect(
            &provider,
            &[coord(0.0, 0.0)],
            &["cafe".to_owned()],
            500.0,
            &HashSet::new(),
        );
        assert!(collected.is_empty());
    }
}
