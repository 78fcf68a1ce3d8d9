//! Persistence collaborator for genre↔place associations and exclusions.
//!
//! The store is the privacy boundary: the engine hands it (candidate,
//! genre) pairs after a successful selection and only ever returns genres
//! to its caller. The concrete place behind a genre is revealed by reading
//! the store after arrival. The exclusion set keeps repeat suggestions out
//! of later runs.
//!
//! Durable backends live outside this crate; [`MemoryStore`] covers tests
//! and session-scoped embedding.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::{Candidate, Genre, PlaceId};

/// Errors from [`SuggestionStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage rejected or failed the operation.
    #[error("suggestion store failed: {message}")]
    Backend {
        /// Human-readable description from the backend.
        message: String,
    },
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Backend {
            message: "store mutex poisoned".to_owned(),
        }
    }
}

/// Owned, serialized state shared across suggestion runs.
///
/// The engine reads [`SuggestionStore::excluded_ids`] before collecting
/// candidates and writes [`SuggestionStore::save`] /
/// [`SuggestionStore::exclude`] only after a successful selection. Within a
/// single run the store is treated as a transactional black box; no
/// concurrent mutation happens from inside the engine.
pub trait SuggestionStore: Send + Sync {
    /// Record the genre↔place association for a winning candidate.
    fn save(&self, candidate: &Candidate, genre: &Genre) -> Result<(), StoreError>;

    /// Reveal the candidate behind a previously issued genre id, if any.
    fn get(&self, genre_id: &str) -> Result<Option<Candidate>, StoreError>;

    /// Add a place id to the exclusion set.
    fn exclude(&self, place_id: &str) -> Result<(), StoreError>;

    /// Return every place id suggested in prior runs.
    fn excluded_ids(&self) -> Result<Vec<PlaceId>, StoreError>;
}

/// In-memory [`SuggestionStore`] for tests and session-scoped use.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use detour_core::{Candidate, Category, Genre, MemoryStore, SuggestionStore};
///
/// let store = MemoryStore::new();
/// let cafe = Candidate::new("place-1", Coord { x: 0.0, y: 0.0 }, Category::Food, "cafe");
/// let genre = Genre {
///     id: "abc123".into(),
///     display_name: "Cosy cafe".into(),
///     category: Category::Food,
///     type_tag: "cafe".into(),
/// };
/// store.save(&cafe, &genre)?;
/// assert_eq!(store.get("abc123")?, Some(cafe));
/// # Ok::<(), detour_core::StoreError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreState>,
}

#[derive(Debug, Default)]
struct MemoryStoreState {
    by_genre: HashMap<String, Candidate>,
    excluded: Vec<PlaceId>,
}

impl MemoryStore {
    /// Construct an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the exclusion set, returning `self` for chaining.
    #[must_use]
    pub fn with_excluded<I, T>(self, place_ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PlaceId>,
    {
        if let Ok(mut state) = self.inner.lock() {
            state.excluded.extend(place_ids.into_iter().map(Into::into));
        }
        self
    }
}

impl SuggestionStore for MemoryStore {
    fn save(&self, candidate: &Candidate, genre: &Genre) -> Result<(), StoreError> {
        let mut state = self.inner.lock()?;
        state.by_genre.insert(genre.id.clone(), candidate.clone());
        Ok(())
    }

    fn get(&self, genre_id: &str) -> Result<Option<Candidate>, StoreError> {
        let state = self.inner.lock()?;
        Ok(state.by_genre.get(genre_id).cloned())
    }

    fn exclude(&self, place_id: &str) -> Result<(), StoreError> {
        let mut state = self.inner.lock()?;
        if !state.excluded.iter().any(|id| id == place_id) {
            state.excluded.push(place_id.to_owned());
        }
        Ok(())
    }

    fn excluded_ids(&self) -> Result<Vec<PlaceId>, StoreError> {
        let state = self.inner.lock()?;
        Ok(state.excluded.clone())
    }
}
