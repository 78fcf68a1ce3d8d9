//! Deterministic stratified selection of winning candidates.
//!
//! Selection must be reproducible for identical (pool, seed input) pairs
//! while still spreading picks across the qualifying pool instead of always
//! rewarding the single top score. Each candidate's ranking key is its
//! quality score plus a keyed pseudo-random value in `[0, 1)` derived from
//! the candidate id and a per-stratum salt.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use detour_core::{Category, ScoredCandidate};

/// Winners drawn from the food stratum; the remainder comes from `other`.
const FOOD_TARGET: usize = 1;

/// Salt tag for the food stratum ranking.
const FOOD_SALT: &str = "food";
/// Salt tag for the non-food stratum ranking.
const OTHER_SALT: &str = "other";
/// Salt tag for the cross-category backfill ranking.
const BACKFILL_SALT: &str = "backfill";
/// Salt tag for anonymized genre tokens.
const GENRE_SALT: &str = "genre";

/// Pick up to `result_count` winners: one food venue, the rest non-food,
/// backfilling from the whole pool when a stratum runs dry.
pub(crate) fn select(
    pool: &[ScoredCandidate],
    seed_input: &str,
    result_count: usize,
) -> Vec<ScoredCandidate> {
    let (food, other): (Vec<&ScoredCandidate>, Vec<&ScoredCandidate>) = pool
        .iter()
        .partition(|entry| entry.candidate.category == Category::Food);

    let mut picks: Vec<&ScoredCandidate> = Vec::with_capacity(result_count);
    picks.extend(
        ranked(&food, seed_input, FOOD_SALT)
            .into_iter()
            .take(FOOD_TARGET.min(result_count)),
    );
    let other_target = result_count.saturating_sub(FOOD_TARGET);
    picks.extend(ranked(&other, seed_input, OTHER_SALT).into_iter().take(other_target));

    if picks.len() < result_count {
        let all: Vec<&ScoredCandidate> = pool.iter().collect();
        for entry in ranked(&all, seed_input, BACKFILL_SALT) {
            if picks.len() >= result_count {
                break;
            }
            if picks.iter().any(|picked| picked.candidate.id == entry.candidate.id) {
                continue;
            }
            picks.push(entry);
        }
    }

    picks.truncate(result_count);
    picks.into_iter().cloned().collect()
}

/// Rank a stratum descending by `score + keyed_unit(salt, id)`.
///
/// Key ties (vanishingly rare) fall back to place-id order so identical
/// inputs always produce identical output order.
#[expect(
    clippy::float_arithmetic,
    reason = "ranking key combines score with the keyed unit draw"
)]
fn ranked<'pool>(
    stratum: &[&'pool ScoredCandidate],
    seed_input: &str,
    stratum_tag: &str,
) -> Vec<&'pool ScoredCandidate> {
    let salt = format!("{seed_input}:{stratum_tag}");
    let mut keyed: Vec<(f64, &'pool ScoredCandidate)> = stratum
        .iter()
        .map(|entry| (entry.score + keyed_unit(&salt, &entry.candidate.id), *entry))
        .collect();
    keyed.sort_unstable_by(|(lhs_key, lhs), (rhs_key, rhs)| {
        rhs_key
            .partial_cmp(lhs_key)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| lhs.candidate.id.cmp(&rhs.candidate.id))
    });
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Keyed pseudo-random value in `[0, 1)` for a (salt, id) pair.
///
/// Deterministic for fixed inputs; cryptographic strength is not required,
/// only an even spread across the pool.
pub(crate) fn keyed_unit(salt: &str, id: &str) -> f64 {
    keyed_rng(salt, id).gen::<f64>()
}

/// Stable anonymized token for a winning candidate.
///
/// One-way: derived from the keyed generator, so the token reveals nothing
/// about the place id it stands for.
pub(crate) fn genre_token(seed_input: &str, id: &str) -> String {
    let salt = format!("{seed_input}:{GENRE_SALT}");
    format!("{:016x}", keyed_rng(&salt, id).gen::<u64>())
}

/// ChaCha8 generator keyed by folding salt and id into the seed.
fn keyed_rng(salt: &str, id: &str) -> ChaCha8Rng {
    let mut seed = [0_u8; 32];
    // 0x1f separates salt from id so ("ab", "c") and ("a", "bc") differ.
    let bytes = salt.bytes().chain(std::iter::once(0x1f)).chain(id.bytes());
    let len = seed.len();
    for (index, byte) in bytes.enumerate() {
        if let Some(slot) = seed.get_mut(index % len) {
            *slot = slot.rotate_left(3) ^ byte;
        }
    }
    ChaCha8Rng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use detour_core::Candidate;
    use geo::Coord;
    use rstest::rstest;

    fn entry(id: &str, category: Category, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            candidate: Candidate::new(id, Coord { x: 0.0, y: 0.0 }, category, "tag"),
            additional_minutes: 1.0,
            score,
        }
    }

    fn mixed_pool() -> Vec<ScoredCandidate> {
        vec![
            entry("f1", Category::Food, 4.0),
            entry("f2", Category::Food, 4.2),
            entry("o1", Category::Other, 3.0),
            entry("o2", Category::Other, 3.5),
            entry("o3", Category::Other, 2.8),
        ]
    }

    #[rstest]
    fn stratifies_one_food_two_other() {
        let winners = select(&mixed_pool(), "2024-06-01:seed", 3);
        let food = winners
            .iter()
            .filter(|w| w.candidate.category == Category::Food)
            .count();
        assert_eq!(winners.len(), 3);
        assert_eq!(food, 1);
    }

    #[rstest]
    fn backfills_from_other_when_food_is_empty() {
        let pool = vec![
            entry("o1", Category::Other, 3.0),
            entry("o2", Category::Other, 3.5),
            entry("o3", Category::Other, 2.8),
        ];
        let winners = select(&pool, "day:seed", 3);
        assert_eq!(winners.len(), 3);
        assert!(winners
            .iter()
            .all(|w| w.candidate.category == Category::Other));
    }

    #[rstest]
    fn backfills_from_food_when_other_is_short() {
        let pool = vec![
            entry("f1", Category::Food, 4.0),
            entry("f2", Category::Food, 4.2),
            entry("f3", Category::Food, 3.9),
            entry("o1", Category::Other, 3.0),
        ];
        let winners = select(&pool, "day:seed", 3);
        assert_eq!(winners.len(), 3);
        let ids: Vec<&str> = winners.iter().map(|w| w.candidate.id.as_str()).collect();
        assert!(ids.contains(&"o1"));
    }

    #[rstest]
    fn never_returns_duplicate_ids() {
        let winners = select(&mixed_pool(), "day:seed", 3);
        let mut ids: Vec<&str> = winners.iter().map(|w| w.candidate.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), winners.len());
    }

    #[rstest]
    fn truncates_to_result_count() {
        let winners = select(&mixed_pool(), "day:seed", 2);
        assert_eq!(winners.len(), 2);
    }

    #[rstest]
    fn exhausted_pool_yields_fewer_winners() {
        let pool = vec![entry("o1", Category::Other, 3.0)];
        let winners = select(&pool, "day:seed", 3);
        assert_eq!(winners.len(), 1);
    }

    #[rstest]
    fn identical_inputs_reproduce_identical_winners() {
        let pool = mixed_pool();
        assert_eq!(select(&pool, "day:seed", 3), select(&pool, "day:seed", 3));
    }

    #[rstest]
    fn keyed_unit_is_deterministic_and_bounded() {
        let first = keyed_unit("salt", "place-1");
        let second = keyed_unit("salt", "place-1");
        assert_eq!(first, second);
        assert!((0.0..1.0).contains(&first));
    }

    #[rstest]
    fn keyed_unit_varies_with_salt_and_id() {
        let base = keyed_unit("salt-a", "place-1");
        assert_ne!(base, keyed_unit("salt-b", "place-1"));
        assert_ne!(base, keyed_unit("salt-a", "place-2"));
    }

    #[rstest]
    fn genre_token_hides_the_place_id() {
        let token = genre_token("day:seed", "place-1");
        assert_eq!(token.len(), 16);
        assert_ne!(token, "place-1");
        assert_eq!(token, genre_token("day:seed", "place-1"));
        assert_ne!(token, genre_token("day:seed", "place-2"));
    }

    mod properties {
        use proptest::prelude::*;
        use std::collections::HashSet;

        use super::*;

        fn arb_pool() -> impl Strategy<Value = Vec<ScoredCandidate>> {
            prop::collection::vec((0_u32..1_000, any::<bool>(), -5.0_f64..5.0), 0..20).prop_map(
                |entries| {
                    let mut seen = HashSet::new();
                    entries
                        .into_iter()
                        .filter(|(id, _, _)| seen.insert(*id))
                        .map(|(id, food, score)| {
                            let category = if food { Category::Food } else { Category::Other };
                            entry(&format!("place-{id}"), category, score)
                        })
                        .collect()
                },
            )
        }

        proptest! {
            #[test]
            fn winners_fill_up_to_count_without_duplicates(
                pool in arb_pool(),
                count in 1_usize..5,
            ) {
                let winners = select(&pool, "prop:seed", count);
                prop_assert_eq!(winners.len(), count.min(pool.len()));

                let ids: HashSet<&str> =
                    winners.iter().map(|w| w.candidate.id.as_str()).collect();
                prop_assert_eq!(ids.len(), winners.len());

                let replay = select(&pool, "prop:seed", count);
                prop_assert_eq!(winners, replay);
            }

            #[test]
            fn keyed_unit_stays_in_unit_interval(salt in ".*", id in ".*") {
                let value = keyed_unit(&salt, &id);
                prop_assert!((0.0..1.0).contains(&value));
            }
        }
    }
}
