//! Core domain types and collaborator traits for the Detour engine.
//!
//! The engine suggests a single anonymized detour waypoint along the way
//! from an origin to a destination. This crate defines the vocabulary the
//! suggestion pipeline speaks: candidate places, anonymized genres, mood
//! lookups, transport modes, and the trait seams behind which the place
//! search, time matrix, and persistence collaborators live.
//!
//! Concrete providers (HTTP clients, durable stores) are implemented
//! elsewhere; this crate ships in-memory implementations suitable for tests
//! and session-scoped embedding.

#![forbid(unsafe_code)]

pub mod candidate;
pub mod genre;
pub mod mood;
pub mod search;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod travel_time;

pub use candidate::{Candidate, Category, PlaceId, ScoredCandidate};
pub use genre::{DisplayNameTable, Genre, TypeDisplayNameLookup};
pub use mood::{Mood, MoodTypeLookup, MoodTypeTable};
pub use search::{PlaceSearchError, PlaceSearchProvider};
pub use store::{MemoryStore, StoreError, SuggestionStore};
pub use travel_time::{DurationsSeconds, TimeMatrixError, TimeMatrixProvider, TransportMode};
