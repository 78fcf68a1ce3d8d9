//! The Detour waypoint suggestion engine.
//!
//! Given an origin, a destination, and a traveller mood, the engine samples
//! the corridor between the endpoints, collects candidate places, filters
//! them against a time budget and quality bar, deterministically selects a
//! stratified set of winners (one food venue, two non-food venues), and
//! publishes them as anonymized genres. The concrete place behind a genre
//! stays hidden in the persistence collaborator until arrival.
//!
//! Pipeline stages live in their own modules: [`corridor`] sampling,
//! candidate collection, cost & quality filtering, deterministic selection,
//! and result publishing, wrapped by [`SuggestionEngine`]'s widened-radius
//! retry loop.

#![forbid(unsafe_code)]

pub mod config;
pub mod corridor;
mod collect;
mod filter;
mod publish;
mod select;
mod engine;

pub use config::{ConfigError, SuggestConfig};
pub use engine::{SuggestError, SuggestRequest, SuggestionEngine};
