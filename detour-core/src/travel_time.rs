//! Time-matrix collaborator trait and transport modes.
//!
//! The engine needs one-to-many travel durations: origin→candidates and
//! destination→candidates, plus the direct origin→destination baseline.
//! Unreachable legs are reported as `f64::INFINITY`, never omitted, so the
//! result stays index-aligned with the input destinations.

use geo::Coord;
use thiserror::Error;

/// One duration in seconds per destination, index-aligned with the input.
pub type DurationsSeconds = Vec<f64>;

/// Mode of transport for duration estimates.
///
/// # Examples
/// ```
/// use detour_core::TransportMode;
///
/// assert_eq!(TransportMode::Walking.as_str(), "walking");
/// assert_eq!(TransportMode::Driving.to_string(), "driving");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    /// On foot.
    Walking,
    /// By bicycle.
    Cycling,
    /// By car.
    Driving,
    /// By public transport.
    Transit,
}

impl TransportMode {
    /// Return the mode as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Driving => "driving",
            Self::Transit => "transit",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walking" => Ok(Self::Walking),
            "cycling" => Ok(Self::Cycling),
            "driving" => Ok(Self::Driving),
            "transit" => Ok(Self::Transit),
            _ => Err(format!("unknown transport mode '{s}'")),
        }
    }
}

/// Errors from [`TimeMatrixProvider::durations`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeMatrixError {
    /// No destinations were provided.
    ///
    /// Callers should pre-filter input; the pipeline never issues a lookup
    /// for an empty candidate list.
    #[error("at least one destination is required")]
    EmptyInput,
    /// The provider could not be reached or returned a malformed response.
    #[error("time matrix lookup failed: {message}")]
    Provider {
        /// Human-readable description from the underlying client.
        message: String,
    },
}

/// Fetch one-to-many travel durations.
///
/// The returned list is index-aligned 1:1 with `destinations`; unreachable
/// or failed entries are `f64::INFINITY`, never omitted.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use detour_core::{TimeMatrixError, TimeMatrixProvider, TransportMode};
///
/// struct UnitMatrix;
///
/// impl TimeMatrixProvider for UnitMatrix {
///     fn durations(
///         &self,
///         _origin: Coord<f64>,
///         destinations: &[Coord<f64>],
///         _mode: TransportMode,
///     ) -> Result<Vec<f64>, TimeMatrixError> {
///         if destinations.is_empty() {
///             return Err(TimeMatrixError::EmptyInput);
///         }
///         Ok(vec![60.0; destinations.len()])
///     }
/// }
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let durations = UnitMatrix.durations(origin, &[Coord { x: 1.0, y: 1.0 }], TransportMode::Walking)?;
/// assert_eq!(durations, vec![60.0]);
/// # Ok::<(), TimeMatrixError>(())
/// ```
pub trait TimeMatrixProvider: Send + Sync {
    /// Return travel durations in seconds from `origin` to each destination.
    ///
    /// Implementations must return `Err(TimeMatrixError::EmptyInput)` when
    /// `destinations` is empty.
    fn durations(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
        mode: TransportMode,
    ) -> Result<DurationsSeconds, TimeMatrixError>;
}
