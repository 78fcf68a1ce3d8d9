//! Facade crate for the Detour suggestion engine.
//!
//! Re-exports the core domain types, collaborator traits, and the
//! suggestion engine so embedders depend on a single crate. In-memory test
//! fixtures are available behind the `test-support` feature.

#![forbid(unsafe_code)]

pub use detour_core::{
    Candidate, Category, DisplayNameTable, DurationsSeconds, Genre, MemoryStore, Mood,
    MoodTypeLookup, MoodTypeTable, PlaceId, PlaceSearchError, PlaceSearchProvider,
    ScoredCandidate, StoreError, SuggestionStore, TimeMatrixError, TimeMatrixProvider,
    TransportMode, TypeDisplayNameLookup,
};

pub use detour_suggest::{
    ConfigError, SuggestConfig, SuggestError, SuggestRequest, SuggestionEngine, corridor,
};

#[cfg(feature = "test-support")]
pub use detour_core::test_support;
