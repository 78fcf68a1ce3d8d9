//! Mapping winners to anonymized genres and recording the bookkeeping.

use detour_core::{Genre, ScoredCandidate, StoreError, SuggestionStore, TypeDisplayNameLookup};

use crate::select;

/// Publish winners as genres.
///
/// Each winner becomes one [`Genre`]; the genre↔place association goes to
/// the store and the place id joins the exclusion set, so later runs skip
/// it. Only the genres are returned; concrete place identity never crosses
/// this boundary.
pub(crate) fn publish<N, S>(
    names: &N,
    store: &S,
    winners: &[ScoredCandidate],
    seed_input: &str,
) -> Result<Vec<Genre>, StoreError>
where
    N: TypeDisplayNameLookup + ?Sized,
    S: SuggestionStore + ?Sized,
{
    let mut genres = Vec::with_capacity(winners.len());
    for winner in winners {
        let candidate = &winner.candidate;
        let genre = Genre {
            id: select::genre_token(seed_input, &candidate.id),
            display_name: names.display_name_for(&candidate.type_tag, candidate.category),
            category: candidate.category,
            type_tag: candidate.type_tag.clone(),
        };
        store.save(candidate, &genre)?;
        store.exclude(&candidate.id)?;
        genres.push(genre);
    }
    Ok(genres)
}
