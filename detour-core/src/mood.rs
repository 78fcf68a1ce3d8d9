//! Traveller moods and their mapping to place-search type tags.
//!
//! A mood is an activity × vibe pair ("hungry" × "cosy", "stretch" ×
//! "scenic"). The [`MoodTypeLookup`] collaborator resolves it to an ordered
//! list of raw type tags for the place-search provider; the table itself is
//! external configuration, not engine policy.

/// An activity × vibe pair describing what the traveller feels like.
///
/// Both halves are free-form strings because the mood vocabulary is owned
/// by the external lookup table, not by the engine.
///
/// # Examples
/// ```
/// use detour_core::Mood;
///
/// let mood = Mood::new("hungry", "cosy");
/// assert_eq!(mood.activity, "hungry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mood {
    /// What the traveller wants to do.
    pub activity: String,
    /// The atmosphere they are after.
    pub vibe: String,
}

impl Mood {
    /// Construct a mood from its two halves.
    #[must_use]
    pub fn new(activity: impl Into<String>, vibe: impl Into<String>) -> Self {
        Self {
            activity: activity.into(),
            vibe: vibe.into(),
        }
    }
}

/// Resolve a mood to an ordered list of place-search type tags.
///
/// Static configuration with no failure mode; unknown moods resolve to an
/// empty list, which the engine reports as "no detour available".
pub trait MoodTypeLookup: Send + Sync {
    /// Return the type tags to query for `mood`, in priority order.
    fn types_for(&self, mood: &Mood) -> Vec<String>;
}

/// Table-backed [`MoodTypeLookup`] implementation.
///
/// # Examples
/// ```
/// use detour_core::{Mood, MoodTypeLookup, MoodTypeTable};
///
/// let table = MoodTypeTable::new().with_types("hungry", "cosy", ["cafe", "bakery"]);
/// let tags = table.types_for(&Mood::new("hungry", "cosy"));
/// assert_eq!(tags, vec!["cafe".to_owned(), "bakery".to_owned()]);
/// assert!(table.types_for(&Mood::new("bored", "loud")).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MoodTypeTable {
    types: std::collections::HashMap<Mood, Vec<String>>,
}

impl MoodTypeTable {
    /// Construct an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the type tags for an activity × vibe pair.
    #[must_use]
    pub fn with_types<I, T>(
        mut self,
        activity: impl Into<String>,
        vibe: impl Into<String>,
        tags: I,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.types.insert(
            Mood::new(activity, vibe),
            tags.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl MoodTypeLookup for MoodTypeTable {
    fn types_for(&self, mood: &Mood) -> Vec<String> {
        self.types.get(mood).cloned().unwrap_or_default()
    }
}
