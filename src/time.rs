//! Timebase for sun and moon calculations.
//!
//! Every [`Instant`] is a fractional Julian day referenced to UT. The models only add,
//! subtract and compare these values; calendar and time-zone handling stays at the
//! `chrono` boundary ([`Instant::from_datetime`] / [`Instant::to_datetime`]).

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::math::{floor, normalize_degrees_0_to_360, polynomial};
use crate::{Error, Result};
#[cfg(feature = "chrono")]
use chrono::{DateTime, TimeZone, Utc};

/// Seconds per day (86,400)
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// Minutes per day (1,440)
pub(crate) const MINUTES_PER_DAY: f64 = 1_440.0;

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 UTC)
const J2000_JDN: f64 = 2_451_545.0;

/// Days per Julian century
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Offset between Julian and Modified Julian dates
const MJD_OFFSET: f64 = 2_400_000.5;

/// Julian date of the Unix epoch (1970-01-01 00:00:00 UTC)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Greenwich mean sidereal time in degrees as a polynomial in days since J2000.0.
const GMST_COEFFS: [f64; 2] = [280.46061837, 360.98564736629];

/// An absolute point in time, stored as a fractional Julian day (UT).
///
/// # Example
/// ```
/// # use solunar::Instant;
/// let noon = Instant::from_utc(2000, 1, 1, 12, 0, 0.0).unwrap();
/// assert_eq!(noon.julian_date(), 2_451_545.0);
/// assert_eq!(noon.add_minutes(90.0).days_since(noon), 0.0625);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Instant {
    jd: f64,
}

impl Instant {
    /// Creates an instant from a Julian date.
    #[must_use]
    pub const fn from_julian_date(jd: f64) -> Self {
        Self { jd }
    }

    /// Creates an instant from seconds since the Unix epoch.
    #[must_use]
    pub fn from_unix_seconds(seconds: f64) -> Self {
        Self {
            jd: UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY,
        }
    }

    /// Creates an instant from year, month, day, hour, minute, and second in UTC.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if any component is outside its valid range
    /// (month 1-12, day within month, hour 0-23, minute 0-59, second 0-59.999).
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_datetime("month must be between 1 and 12"));
        }
        if !(1..=31).contains(&day) {
            return Err(Error::invalid_datetime("day must be between 1 and 31"));
        }
        if hour > 23 {
            return Err(Error::invalid_datetime("hour must be between 0 and 23"));
        }
        if minute > 59 {
            return Err(Error::invalid_datetime("minute must be between 0 and 59"));
        }
        if !(0.0..60.0).contains(&second) {
            return Err(Error::invalid_datetime(
                "second must be between 0 and 59.999...",
            ));
        }
        if day > days_in_month(year, month, day)? {
            return Err(Error::invalid_datetime("day is out of range for month"));
        }

        Ok(Self {
            jd: calculate_julian_date(year, month, day, hour, minute, second),
        })
    }

    /// Creates an instant from a timezone-aware chrono `DateTime`.
    #[cfg(feature = "chrono")]
    #[must_use]
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        let seconds = datetime.timestamp() as f64
            + f64::from(datetime.timestamp_subsec_nanos()) / 1e9;
        Self::from_unix_seconds(seconds)
    }

    /// Converts this instant into a chrono `DateTime` in the given zone,
    /// rounded to the millisecond.
    ///
    /// # Errors
    /// Returns `InvalidDateTime` if the instant lies outside chrono's representable range.
    #[cfg(feature = "chrono")]
    pub fn to_datetime<Tz: TimeZone>(&self, tz: &Tz) -> Result<DateTime<Tz>> {
        let millis = self.to_unix_seconds() * 1000.0;
        if !millis.is_finite() || crate::math::abs(millis) >= i64::MAX as f64 {
            return Err(Error::invalid_datetime(
                "instant is outside the representable date range",
            ));
        }
        let millis = floor(millis + 0.5) as i64;
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|utc| utc.with_timezone(tz))
            .ok_or(Error::invalid_datetime(
                "instant is outside the representable date range",
            ))
    }

    /// Gets the Julian Date (JD) value.
    #[must_use]
    pub const fn julian_date(&self) -> f64 {
        self.jd
    }

    /// Gets the Modified Julian Date (JD - 2400000.5).
    #[must_use]
    pub fn modified_julian_date(&self) -> f64 {
        self.jd - MJD_OFFSET
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub fn to_unix_seconds(&self) -> f64 {
        (self.jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY
    }

    /// Days elapsed since the J2000.0 epoch (2000-01-01 12:00 UT).
    #[must_use]
    pub fn days_since_j2000(&self) -> f64 {
        self.jd - J2000_JDN
    }

    /// Julian centuries since the J2000.0 epoch.
    #[must_use]
    pub fn julian_century(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_CENTURY
    }

    /// Returns this instant shifted by a (possibly fractional or negative) number of days.
    #[must_use]
    pub fn add_days(self, days: f64) -> Self {
        Self { jd: self.jd + days }
    }

    /// Returns this instant shifted by a number of minutes.
    #[must_use]
    pub fn add_minutes(self, minutes: f64) -> Self {
        self.add_days(minutes / MINUTES_PER_DAY)
    }

    /// Returns this instant shifted by a number of seconds.
    #[must_use]
    pub fn add_seconds(self, seconds: f64) -> Self {
        self.add_days(seconds / SECONDS_PER_DAY)
    }

    /// Days from `earlier` to this instant (negative if `earlier` is later).
    #[must_use]
    pub fn days_since(self, earlier: Self) -> f64 {
        self.jd - earlier.jd
    }

    /// Start (0h UT) of the UT calendar day containing this instant.
    #[must_use]
    pub fn ut_day_start(self) -> Self {
        Self {
            jd: floor(self.jd - 0.5) + 0.5,
        }
    }

    /// Greenwich mean sidereal time in degrees [0, 360).
    #[must_use]
    pub fn greenwich_mean_sidereal_time(&self) -> f64 {
        normalize_degrees_0_to_360(polynomial(&GMST_COEFFS, self.days_since_j2000()))
    }
}

/// Calculates Julian Date from UTC date/time components.
///
/// Meeus, "Astronomical Algorithms", 2nd edition, chapter 7.
#[allow(clippy::cast_possible_wrap)]
fn calculate_julian_date(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: f64,
) -> f64 {
    let mut y = year;
    let mut m = month as i32;

    // January and February count as months 13 and 14 of the previous year
    if m < 3 {
        y -= 1;
        m += 12;
    }

    let d = f64::from(day) + (f64::from(hour) + (f64::from(minute) + second / 60.0) / 60.0) / 24.0;

    let mut jd =
        floor(365.25 * (f64::from(y) + 4716.0)) + floor(30.6001 * f64::from(m + 1)) + d - 1524.5;

    // Gregorian calendar correction from 1582-10-15 (JDN 2299161)
    if jd >= 2_299_161.0 {
        let a = floor(f64::from(y) / 100.0);
        let b = 2.0 - a + floor(a / 4.0);
        jd += b;
    }

    jd
}

const fn is_gregorian_date(year: i32, month: u32, day: u32) -> bool {
    year > 1582 || (year == 1582 && (month > 10 || (month == 10 && day >= 15)))
}

const fn is_leap_year(year: i32, is_gregorian: bool) -> bool {
    if is_gregorian {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year % 4 == 0
    }
}

fn days_in_month(year: i32, month: u32, day: u32) -> Result<u32> {
    if year == 1582 && month == 10 && (5..=14).contains(&day) {
        return Err(Error::invalid_datetime(
            "dates 1582-10-05 through 1582-10-14 do not exist in Gregorian calendar",
        ));
    }

    let is_gregorian = is_gregorian_date(year, month, day);
    let days = match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year, is_gregorian) {
                29
            } else {
                28
            }
        }
        _ => 31,
    };
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_j2000_epoch() {
        let instant = Instant::from_utc(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert!((instant.julian_date() - J2000_JDN).abs() < EPSILON);
        assert!(instant.days_since_j2000().abs() < EPSILON);
        assert!(instant.julian_century().abs() < EPSILON);
    }

    #[test]
    fn test_known_julian_dates() {
        let unix_epoch = Instant::from_utc(1970, 1, 1, 0, 0, 0.0).unwrap();
        assert!((unix_epoch.julian_date() - 2_440_587.5).abs() < EPSILON);
        assert!(unix_epoch.to_unix_seconds().abs() < 1e-3);

        let y2k = Instant::from_utc(2000, 1, 1, 0, 0, 0.0).unwrap();
        assert!((y2k.julian_date() - 2_451_544.5).abs() < EPSILON);
        assert!((y2k.modified_julian_date() - 51_544.0).abs() < EPSILON);
    }

    #[test]
    fn test_from_utc_validation() {
        assert!(Instant::from_utc(2024, 13, 1, 0, 0, 0.0).is_err());
        assert!(Instant::from_utc(2024, 1, 32, 0, 0, 0.0).is_err());
        assert!(Instant::from_utc(2024, 1, 1, 24, 0, 0.0).is_err());
        assert!(Instant::from_utc(2024, 1, 1, 0, 60, 0.0).is_err());
        assert!(Instant::from_utc(2024, 1, 1, 0, 0, 60.0).is_err());
        assert!(Instant::from_utc(2024, 2, 30, 0, 0, 0.0).is_err());
        assert!(Instant::from_utc(2024, 2, 29, 0, 0, 0.0).is_ok());
        assert!(Instant::from_utc(1900, 2, 29, 0, 0, 0.0).is_err());
        assert!(Instant::from_utc(1582, 10, 10, 0, 0, 0.0).is_err());
    }

    #[test]
    fn test_unix_seconds_round_trip() {
        let instant = Instant::from_unix_seconds(1_718_900_000.0);
        assert!((instant.to_unix_seconds() - 1_718_900_000.0).abs() < 1e-3);
    }

    #[test]
    fn test_arithmetic_and_ordering() {
        let start = Instant::from_utc(2024, 6, 20, 0, 0, 0.0).unwrap();
        let later = start.add_minutes(30.0);
        assert!(later > start);
        assert!((later.days_since(start) - 30.0 / MINUTES_PER_DAY).abs() < EPSILON);
        assert!((start.add_seconds(86_400.0).days_since(start) - 1.0).abs() < EPSILON);
        assert!((start.add_days(-0.5).days_since(start) + 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_ut_day_start() {
        let afternoon = Instant::from_utc(2024, 6, 20, 17, 45, 0.0).unwrap();
        let midnight = Instant::from_utc(2024, 6, 20, 0, 0, 0.0).unwrap();
        assert!((afternoon.ut_day_start().days_since(midnight)).abs() < EPSILON);
        assert!((midnight.ut_day_start().days_since(midnight)).abs() < EPSILON);
    }

    #[test]
    fn test_sidereal_time_at_j2000() {
        let instant = Instant::from_julian_date(J2000_JDN);
        assert!((instant.greenwich_mean_sidereal_time() - 280.46061837).abs() < 1e-6);

        // One solar day advances sidereal time by ~0.9856°
        let next = instant.add_days(1.0).greenwich_mean_sidereal_time();
        assert!((next - 281.4462657).abs() < 1e-4);
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_chrono_round_trip() {
        use chrono::{FixedOffset, TimeZone, Timelike};

        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = tz.with_ymd_and_hms(2024, 6, 20, 14, 30, 0).unwrap();
        let instant = Instant::from_datetime(&local);

        let expected = Instant::from_utc(2024, 6, 20, 12, 30, 0.0).unwrap();
        assert!((instant.days_since(expected)).abs() < 1e-8);

        let back = instant.to_datetime(&tz).unwrap();
        assert_eq!(back, local);
        assert_eq!(back.hour(), 14);
    }
}
