//! Place-search collaborator trait.
//!
//! The engine queries this provider once per (corridor point, type tag)
//! pair. Individual query failures degrade to empty results inside the
//! pipeline; they are never fatal for a suggestion run.

use geo::Coord;
use thiserror::Error;

use crate::Candidate;

/// Errors from [`PlaceSearchProvider::search_nearby`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceSearchError {
    /// The provider could not be reached or returned a malformed response.
    ///
    /// The pipeline logs and treats the query as empty; callers embedding a
    /// provider directly may want the message for diagnostics.
    #[error("place search failed: {message}")]
    Provider {
        /// Human-readable description from the underlying client.
        message: String,
    },
}

/// Search for candidate places near a point.
///
/// Implementations wrap a place-search API (or an in-memory fixture, see
/// [`crate::test_support::StaticSearchProvider`]). Returning an empty list
/// is the normal "nothing here" outcome, not an error.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use detour_core::{Candidate, PlaceSearchError, PlaceSearchProvider};
///
/// struct NoPlaces;
///
/// impl PlaceSearchProvider for NoPlaces {
///     fn search_nearby(
///         &self,
///         _point: Coord<f64>,
///         _type_tag: &str,
///         _radius_meters: f64,
///     ) -> Result<Vec<Candidate>, PlaceSearchError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let found = NoPlaces.search_nearby(Coord { x: 0.0, y: 0.0 }, "cafe", 500.0)?;
/// assert!(found.is_empty());
/// # Ok::<(), PlaceSearchError>(())
/// ```
pub trait PlaceSearchProvider: Send + Sync {
    /// Return candidates of type `type_tag` within `radius_meters` of `point`.
    fn search_nearby(
        &self,
        point: Coord<f64>,
        type_tag: &str,
        radius_meters: f64,
    ) -> Result<Vec<Candidate>, PlaceSearchError>;
}
