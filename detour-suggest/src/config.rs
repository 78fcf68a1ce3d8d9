//! Suggestion policy knobs and their validation.

use thiserror::Error;

/// Errors returned by [`SuggestConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The corridor search radius must be a positive, finite length.
    #[error("base corridor radius must be positive and finite")]
    InvalidRadius,
    /// The per-attempt radius increment must be non-negative and finite.
    #[error("radius increment must be non-negative and finite")]
    InvalidIncrement,
    /// The detour budget must be non-negative and finite.
    #[error("max additional minutes must be non-negative and finite")]
    InvalidMinuteBudget,
    /// Ratings live on a 0-5 scale.
    #[error("min rating must be within 0.0..=5.0")]
    InvalidMinRating,
    /// A run must produce at least one suggestion slot.
    #[error("result count must be at least 1")]
    ZeroResultCount,
    /// The retry loop needs at least one attempt.
    #[error("max attempts must be at least 1")]
    ZeroAttempts,
}

/// Policy configuration for a [`crate::SuggestionEngine`].
///
/// Defaults encode the stock policy: three winners (one food plus two
/// non-food), a two-attempt search with a widened second radius, and epoch
/// seconds folded into the selection seed.
///
/// # Examples
/// ```
/// use detour_suggest::SuggestConfig;
///
/// let config = SuggestConfig::default();
/// assert_eq!(config.result_count, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuggestConfig {
    /// Upper bound on the detour cost, in minutes.
    pub max_additional_minutes: f64,
    /// Minimum rating a candidate must carry; unrated counts as 0.
    pub min_rating: f32,
    /// Minimum review count; missing counts as 0.
    pub min_reviews: u32,
    /// Search radius around each corridor point on the first attempt.
    pub base_corridor_radius_meters: f64,
    /// Radius widening applied per retry attempt.
    pub radius_increment_meters: f64,
    /// Number of winners per successful run.
    pub result_count: usize,
    /// Number of widened-radius attempts before giving up.
    pub max_attempts: u32,
    /// Fold the epoch seconds of "now" into the selection seed.
    ///
    /// When set, identical-timestamp calls reproduce but same-day calls do
    /// not. Disable for same-day reproducibility.
    pub timestamp_entropy: bool,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            max_additional_minutes: 10.0,
            min_rating: 3.5,
            min_reviews: 10,
            base_corridor_radius_meters: 1_500.0,
            radius_increment_meters: 1_000.0,
            result_count: 3,
            max_attempts: 2,
            timestamp_entropy: true,
        }
    }
}

impl SuggestConfig {
    /// Reject malformed configuration.
    ///
    /// Malformed configuration is the one hard-error path of the engine;
    /// every provider-side failure degrades to an empty result instead.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_corridor_radius_meters.is_finite() || self.base_corridor_radius_meters <= 0.0
        {
            return Err(ConfigError::InvalidRadius);
        }
        if !self.radius_increment_meters.is_finite() || self.radius_increment_meters < 0.0 {
            return Err(ConfigError::InvalidIncrement);
        }
        if !self.max_additional_minutes.is_finite() || self.max_additional_minutes < 0.0 {
            return Err(ConfigError::InvalidMinuteBudget);
        }
        if !self.min_rating.is_finite() || !(0.0..=5.0).contains(&self.min_rating) {
            return Err(ConfigError::InvalidMinRating);
        }
        if self.result_count == 0 {
            return Err(ConfigError::ZeroResultCount);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_config_is_valid() {
        assert!(SuggestConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(SuggestConfig { base_corridor_radius_meters: 0.0, ..SuggestConfig::default() }, ConfigError::InvalidRadius)]
    #[case(SuggestConfig { base_corridor_radius_meters: f64::NAN, ..SuggestConfig::default() }, ConfigError::InvalidRadius)]
    #[case(SuggestConfig { radius_increment_meters: -1.0, ..SuggestConfig::default() }, ConfigError::InvalidIncrement)]
    #[case(SuggestConfig { max_additional_minutes: f64::INFINITY, ..SuggestConfig::default() }, ConfigError::InvalidMinuteBudget)]
    #[case(SuggestConfig { max_additional_minutes: -0.1, ..SuggestConfig::default() }, ConfigError::InvalidMinuteBudget)]
    #[case(SuggestConfig { min_rating: 5.5, ..SuggestConfig::default() }, ConfigError::InvalidMinRating)]
    #[case(SuggestConfig { result_count: 0, ..SuggestConfig::default() }, ConfigError::ZeroResultCount)]
    #[case(SuggestConfig { max_attempts: 0, ..SuggestConfig::default() }, ConfigError::ZeroAttempts)]
    fn malformed_config_is_rejected(#[case] config: SuggestConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate(), Err(expected));
    }
}
