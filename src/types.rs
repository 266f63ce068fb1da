//! Core data types for sun and moon event calculations.

use crate::error::{check_coordinates, check_zenith};
use crate::math::{cos, degrees_to_radians, floor, PI};
use crate::Result;
use alloc::vec::Vec;
use core::fmt;

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

/// Observer location on Earth.
///
/// # Example
/// ```
/// # use solunar::GeoCoordinate;
/// let london = GeoCoordinate::new(51.5, -0.12).unwrap();
/// assert_eq!(london.latitude(), 51.5);
/// assert!(GeoCoordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Creates a location from latitude and longitude in degrees.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees, positive north.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, positive east.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Zenith angle that defines a horizon crossing.
///
/// The official zenith (90.833°) accounts for refraction and the solar radius; the
/// twilight zeniths put the sun 6°, 12° and 18° below the geometric horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZenithThreshold {
    /// Official sunrise/sunset, 90.833°
    Official,
    /// Civil twilight, 96°
    Civil,
    /// Nautical twilight, 102°
    Nautical,
    /// Astronomical twilight, 108°
    Astronomical,
    /// Custom zenith angle in degrees
    Custom(f64),
}

impl ZenithThreshold {
    /// Gets the zenith angle in degrees.
    #[must_use]
    pub const fn degrees(&self) -> f64 {
        match self {
            Self::Official => 90.833,
            Self::Civil => 96.0,
            Self::Nautical => 102.0,
            Self::Astronomical => 108.0,
            Self::Custom(zenith) => *zenith,
        }
    }

    /// Creates a custom threshold.
    ///
    /// # Errors
    /// Returns `InvalidZenith` unless the angle lies strictly between 0° and 180°.
    pub fn custom(zenith_degrees: f64) -> Result<Self> {
        check_zenith(zenith_degrees)?;
        Ok(Self::Custom(zenith_degrees))
    }

    /// Altitude of the threshold in degrees (90° minus the zenith angle).
    #[must_use]
    pub fn altitude_degrees(&self) -> f64 {
        90.0 - self.degrees()
    }

    /// Sine of the threshold altitude, i.e. the cosine of the zenith angle.
    #[must_use]
    pub fn sine_altitude(&self) -> f64 {
        cos(degrees_to_radians(self.degrees()))
    }
}

impl Eq for ZenithThreshold {}

impl core::hash::Hash for ZenithThreshold {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Official => 0.hash(state),
            Self::Civil => 1.hash(state),
            Self::Nautical => 2.hash(state),
            Self::Astronomical => 3.hash(state),
            Self::Custom(zenith) => {
                4.hash(state);
                let normalized = if *zenith == 0.0 { 0.0 } else { *zenith };
                normalized.to_bits().hash(state);
            }
        }
    }
}

/// Which horizon crossing to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crossing {
    /// Body crosses the threshold going up (sunrise, twilight begins).
    Rising,
    /// Body crosses the threshold going down (sunset, twilight ends).
    Setting,
}

/// Why no crossing exists on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarCondition {
    /// Body stays above the threshold for the whole day.
    AllDay,
    /// Body stays below the threshold for the whole day.
    AllNight,
}

/// Named phase of the moon.
///
/// Each name covers one eighth of the synodic cycle, centred on its nominal phase
/// (new at 0, first quarter at 0.25, full at 0.5, last quarter at 0.75).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    /// New moon
    New,
    /// Waxing crescent
    WaxingCrescent,
    /// First quarter
    FirstQuarter,
    /// Waxing gibbous
    WaxingGibbous,
    /// Full moon
    Full,
    /// Waning gibbous
    WaningGibbous,
    /// Last quarter
    LastQuarter,
    /// Waning crescent
    WaningCrescent,
}

impl MoonPhase {
    const ALL: [Self; 8] = [
        Self::New,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::Full,
        Self::WaningGibbous,
        Self::LastQuarter,
        Self::WaningCrescent,
    ];

    /// Classifies a phase fraction in [0, 1). Values outside are wrapped.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_fraction(phase: f64) -> Self {
        let wrapped = phase - floor(phase);
        let bucket = floor(wrapped * 8.0 + 0.5) as usize % 8;
        Self::ALL[bucket]
    }

    /// Lower-case hyphenated label, e.g. `"waxing-crescent"`.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::WaxingCrescent => "waxing-crescent",
            Self::FirstQuarter => "first-quarter",
            Self::WaxingGibbous => "waxing-gibbous",
            Self::Full => "full",
            Self::WaningGibbous => "waning-gibbous",
            Self::LastQuarter => "last-quarter",
            Self::WaningCrescent => "waning-crescent",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase, age and distance of the moon at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonState {
    phase: f64,
    age_days: f64,
    distance_km: f64,
}

impl MoonState {
    pub(crate) const fn new(phase: f64, age_days: f64, distance_km: f64) -> Self {
        Self {
            phase,
            age_days,
            distance_km,
        }
    }

    /// Phase fraction in [0, 1): 0 is new, 0.5 is full.
    #[must_use]
    pub const fn phase(&self) -> f64 {
        self.phase
    }

    /// Days since the last new moon, in [0, synodic month).
    #[must_use]
    pub const fn age_days(&self) -> f64 {
        self.age_days
    }

    /// Geocentric distance in kilometres.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Fraction of the disc that is lit, in [0, 1].
    #[must_use]
    pub fn illuminated_fraction(&self) -> f64 {
        (1.0 - cos(2.0 * PI * self.phase)) / 2.0
    }

    /// Named phase for this state.
    #[must_use]
    pub fn phase_name(&self) -> MoonPhase {
        MoonPhase::from_fraction(self.phase)
    }
}

/// Growable list with a hard capacity.
///
/// Pushing past the capacity discards the item and counts it in [`dropped`](Self::dropped).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedEvents<T> {
    items: Vec<T>,
    capacity: usize,
    dropped: usize,
}

impl<T> BoundedEvents<T> {
    /// Creates an empty list holding at most `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Appends an item. Returns `false` (and counts the item as dropped) when full.
    pub fn push(&mut self, item: T) -> bool {
        if self.items.len() < self.capacity {
            self.items.push(item);
            true
        } else {
            self.dropped += 1;
            false
        }
    }

    /// Number of items kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items were kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items discarded because the list was full.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Kept items, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the kept items.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a BoundedEvents<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> IntoIterator for BoundedEvents<T> {
    type Item = T;
    type IntoIter = alloc::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
