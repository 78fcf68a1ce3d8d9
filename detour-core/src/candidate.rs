//! Candidate places discovered along the travel corridor.
//!
//! A [`Candidate`] is immutable once fetched from the place-search
//! collaborator. The filter stage derives a [`ScoredCandidate`] from it;
//! derived values are never persisted on their own.

use geo::Coord;

/// Opaque identifier assigned by the place-search provider.
pub type PlaceId = String;

/// Broad category of a candidate place.
///
/// The suggestion policy stratifies winners by this closed two-case
/// category (one food venue, two non-food venues). Extending the set would
/// require revisiting that policy, so the enum is deliberately closed.
///
/// # Examples
/// ```
/// use detour_core::Category;
///
/// assert_eq!(Category::Food.as_str(), "food");
/// assert_eq!(Category::Other.to_string(), "other");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Restaurants, cafes, bakeries, and other places to eat.
    Food,
    /// Everything else: parks, viewpoints, galleries, shops.
    Other,
}

impl Category {
    /// Return the category as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use detour_core::Category;
    ///
    /// assert_eq!(Category::Other.as_str(), "other");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "other" => Ok(Self::Other),
            _ => Err(format!("unknown category '{s}'")),
        }
    }
}

/// A place the pipeline may suggest as a detour waypoint.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Rating
/// and review count are optional because the source taxonomy omits them for
/// unrated places; the filter treats missing values as zero.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use detour_core::{Candidate, Category};
///
/// let cafe = Candidate::new("place-1", Coord { x: 0.0, y: 0.0 }, Category::Food, "cafe")
///     .with_quality(4.5, 120);
/// assert_eq!(cafe.rating_or_default(), 4.5);
/// assert_eq!(cafe.review_count_or_default(), 120);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Identifier assigned by the place-search provider.
    pub id: PlaceId,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Broad category used for stratified selection.
    pub category: Category,
    /// Raw type tag from the source taxonomy, e.g. `"cafe"` or `"park"`.
    pub type_tag: String,
    /// Average rating in `0.0..=5.0`, when the provider reports one.
    pub rating: Option<f32>,
    /// Number of reviews behind the rating, when reported.
    pub review_count: Option<u32>,
}

impl Candidate {
    /// Construct an unrated candidate.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use detour_core::{Candidate, Category};
    ///
    /// let park = Candidate::new("p", Coord { x: 1.0, y: 2.0 }, Category::Other, "park");
    /// assert!(park.rating.is_none());
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<PlaceId>,
        location: Coord<f64>,
        category: Category,
        type_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            category,
            type_tag: type_tag.into(),
            rating: None,
            review_count: None,
        }
    }

    /// Attach rating and review count, returning `self` for chaining.
    #[must_use]
    pub const fn with_quality(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = Some(rating);
        self.review_count = Some(review_count);
        self
    }

    /// Rating with missing values mapped to `0.0`.
    #[must_use]
    pub const fn rating_or_default(&self) -> f32 {
        match self.rating {
            Some(rating) => rating,
            None => 0.0,
        }
    }

    /// Review count with missing values mapped to `0`.
    #[must_use]
    pub const fn review_count_or_default(&self) -> u32 {
        match self.review_count {
            Some(count) => count,
            None => 0,
        }
    }
}

/// A candidate annotated with its detour cost and composite quality score.
///
/// Produced by the cost & quality filter; consumed by the selector. The
/// score already folds the detour penalty in, so selection never re-reads
/// the raw rating.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// The underlying place.
    pub candidate: Candidate,
    /// Extra travel minutes incurred by routing through the candidate.
    pub additional_minutes: f64,
    /// Composite quality value; higher is better.
    pub score: f64,
}
