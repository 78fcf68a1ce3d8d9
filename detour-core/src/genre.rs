//! Anonymized genre descriptors and their display-name lookup.
//!
//! A [`Genre`] stands in for a concrete place until the traveller arrives.
//! It carries a display name ("Somewhere delicious: bakery"-style copy is
//! the presentation layer's job), the category, the raw type tag, and a
//! stable id, and nothing that identifies the place itself. The genre↔place
//! association lives behind [`crate::SuggestionStore`].

use crate::Category;

/// Generic label used when a food type tag has no configured display name.
pub const FOOD_FALLBACK_NAME: &str = "Somewhere delicious";

/// Generic label used when a non-food type tag has no configured name.
pub const OTHER_FALLBACK_NAME: &str = "Somewhere interesting";

/// Anonymized, user-facing descriptor for a winning candidate.
///
/// The id is derived one-way from the winning candidate and the run salt;
/// it is stable for identical inputs but cannot be inverted to a place id.
///
/// # Examples
/// ```
/// use detour_core::{Category, Genre};
///
/// let genre = Genre {
///     id: "9f2c4a0d12e35b77".into(),
///     display_name: "Cosy cafe".into(),
///     category: Category::Food,
///     type_tag: "cafe".into(),
/// };
/// assert_eq!(genre.category, Category::Food);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genre {
    /// Stable anonymized identifier; the caller's only pre-arrival handle.
    pub id: String,
    /// Human-readable descriptor shown to the traveller.
    pub display_name: String,
    /// Category inherited from the winning candidate.
    pub category: Category,
    /// Raw type tag inherited from the winning candidate.
    pub type_tag: String,
}

/// Resolve a raw type tag to a user-facing display name.
///
/// Implementations are static configuration tables with no failure mode:
/// unknown tags fall back to a generic per-category label.
pub trait TypeDisplayNameLookup: Send + Sync {
    /// Return the display name for `type_tag`, falling back per `category`.
    fn display_name_for(&self, type_tag: &str, category: Category) -> String;
}

/// Table-backed [`TypeDisplayNameLookup`] implementation.
///
/// # Examples
/// ```
/// use detour_core::{Category, DisplayNameTable, TypeDisplayNameLookup};
///
/// let table = DisplayNameTable::new().with_name("cafe", "Cosy cafe");
/// assert_eq!(table.display_name_for("cafe", Category::Food), "Cosy cafe");
/// assert_eq!(
///     table.display_name_for("ramen", Category::Food),
///     detour_core::genre::FOOD_FALLBACK_NAME,
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct DisplayNameTable {
    names: std::collections::HashMap<String, String>,
}

impl DisplayNameTable {
    /// Construct an empty table; every lookup falls back.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type-tag display name, returning `self` for chaining.
    #[must_use]
    pub fn with_name(mut self, type_tag: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(type_tag.into(), name.into());
        self
    }
}

impl TypeDisplayNameLookup for DisplayNameTable {
    fn display_name_for(&self, type_tag: &str, category: Category) -> String {
        self.names.get(type_tag).cloned().unwrap_or_else(|| {
            match category {
                Category::Food => FOOD_FALLBACK_NAME,
                Category::Other => OTHER_FALLBACK_NAME,
            }
            .to_owned()
        })
    }
}
