//! Error types for the solunar library.

use crate::types::PolarCondition;
use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during sun/moon event and score calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// Invalid zenith angle for a crossing search.
    InvalidZenith {
        /// The invalid zenith angle value provided.
        value: f64,
    },
    /// Invalid calendar date or time.
    InvalidDateTime {
        /// Description of the date/time constraint violation.
        message: &'static str,
    },
    /// Search window or sample step that cannot be sampled.
    InvalidSearchWindow {
        /// Description of the window constraint violation.
        message: &'static str,
    },
    /// The body never crosses the requested zenith on that day (polar day or night).
    NoEvent {
        /// Whether the body stays above or below the threshold.
        condition: PolarCondition,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidZenith { value } => {
                write!(
                    f,
                    "invalid zenith angle {value}° (must be between 0° and 180°)"
                )
            }
            Self::InvalidDateTime { message } => {
                write!(f, "invalid date/time: {message}")
            }
            Self::InvalidSearchWindow { message } => {
                write!(f, "invalid search window: {message}")
            }
            Self::NoEvent { condition } => match condition {
                PolarCondition::AllDay => {
                    write!(f, "no event: body stays above the threshold altitude all day")
                }
                PolarCondition::AllNight => {
                    write!(f, "no event: body stays below the threshold altitude all day")
                }
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid zenith error.
    #[must_use]
    pub const fn invalid_zenith(value: f64) -> Self {
        Self::InvalidZenith { value }
    }

    /// Creates an invalid date/time error.
    #[must_use]
    pub const fn invalid_datetime(message: &'static str) -> Self {
        Self::InvalidDateTime { message }
    }

    /// Creates an invalid search window error.
    #[must_use]
    pub const fn invalid_search_window(message: &'static str) -> Self {
        Self::InvalidSearchWindow { message }
    }

    /// Creates a no-event error for a polar day or night.
    #[must_use]
    pub const fn no_event(condition: PolarCondition) -> Self {
        Self::NoEvent { condition }
    }

    /// Checks whether this error reports a missing crossing rather than bad input.
    #[must_use]
    pub const fn is_no_event(&self) -> bool {
        matches!(self, Self::NoEvent { .. })
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates a zenith angle lies strictly between 0 and 180 degrees.
///
/// # Errors
/// Returns `InvalidZenith` if the angle is not finite or outside (0°, 180°).
pub fn check_zenith(zenith: f64) -> Result<()> {
    if !(zenith > 0.0 && zenith < 180.0) {
        return Err(Error::invalid_zenith(zenith));
    }
    Ok(())
}
