//! Low-precision solar ephemeris and horizon-crossing solver.
//!
//! Positions follow the almanac series for the sun's mean longitude and mean anomaly
//! (good to about 0.01° between 1950 and 2050). Crossings are solved in closed form
//! from the hour angle at which the sun reaches a given zenith angle.

#![allow(clippy::unreadable_literal)]

use crate::math::{
    acos, asin, atan2, clamp_unit, cos, degrees_to_radians, normalize_degrees_0_to_360,
    normalize_degrees_signed, radians_to_degrees, sin, sine_of_altitude,
};
use crate::error::check_zenith;
use crate::time::MINUTES_PER_DAY;
use crate::{Crossing, Error, GeoCoordinate, Instant, PolarCondition, Result, ZenithThreshold};
use log::debug;

/// Slack on |cos H0| before a day is declared polar, absorbing rounding near the boundary.
const POLAR_TOLERANCE: f64 = 1e-12;

/// Number of declination evaluations when solving a crossing.
const CROSSING_PASSES: usize = 2;

/// Apparent position of the sun, all angles in degrees.
#[derive(Debug, Clone, Copy)]
struct SunCoordinates {
    mean_longitude: f64,
    ecliptic_longitude: f64,
    right_ascension: f64,
    declination: f64,
}

impl SunCoordinates {
    fn at(instant: Instant) -> Self {
        let n = instant.days_since_j2000();

        let mean_longitude = normalize_degrees_0_to_360(280.460 + 0.9856474 * n);
        let g = degrees_to_radians(normalize_degrees_0_to_360(357.528 + 0.9856003 * n));
        let ecliptic_longitude =
            normalize_degrees_0_to_360(mean_longitude + 1.915 * sin(g) + 0.020 * sin(2.0 * g));
        let epsilon = degrees_to_radians(23.439 - 0.0000004 * n);

        let lambda = degrees_to_radians(ecliptic_longitude);
        let right_ascension = normalize_degrees_0_to_360(radians_to_degrees(atan2(
            cos(epsilon) * sin(lambda),
            cos(lambda),
        )));
        let declination = radians_to_degrees(asin(clamp_unit(sin(epsilon) * sin(lambda))));

        Self {
            mean_longitude,
            ecliptic_longitude,
            right_ascension,
            declination,
        }
    }
}

/// Apparent ecliptic longitude of the sun in degrees [0, 360).
#[must_use]
pub fn ecliptic_longitude(instant: Instant) -> f64 {
    SunCoordinates::at(instant).ecliptic_longitude
}

/// Declination of the sun in degrees.
#[must_use]
pub fn declination(instant: Instant) -> f64 {
    SunCoordinates::at(instant).declination
}

/// Equation of time in minutes (apparent minus mean solar time).
///
/// Positive values mean the sun transits before mean noon.
#[must_use]
pub fn equation_of_time(instant: Instant) -> f64 {
    let sun = SunCoordinates::at(instant);
    normalize_degrees_signed(sun.mean_longitude - sun.right_ascension) * 4.0
}

/// Sine of the sun's altitude above the horizon at the given instant and location.
///
/// # Example
/// ```
/// # use solunar::{sun, GeoCoordinate, Instant};
/// let equator = GeoCoordinate::new(0.0, 0.0).unwrap();
/// let noon = Instant::from_utc(2024, 3, 20, 12, 0, 0.0).unwrap();
/// assert!(sun::altitude(noon, equator) > 0.99);
/// ```
#[must_use]
pub fn altitude(instant: Instant, location: GeoCoordinate) -> f64 {
    let sun = SunCoordinates::at(instant);
    let hour_angle =
        instant.greenwich_mean_sidereal_time() + location.longitude() - sun.right_ascension;

    sine_of_altitude(
        degrees_to_radians(location.latitude()),
        degrees_to_radians(sun.declination),
        degrees_to_radians(hour_angle),
    )
}

/// Local apparent noon: the instant within the 24 hours starting at `day` where the sun's
/// hour angle is zero.
#[must_use]
pub fn solar_noon(location: GeoCoordinate, day: Instant) -> Instant {
    // Mean noon at this longitude, moved into [day, day + 1)
    let mut mean_noon = day.ut_day_start().add_days(0.5 - location.longitude() / 360.0);
    if mean_noon.days_since(day) < 0.0 {
        mean_noon = mean_noon.add_days(1.0);
    } else if mean_noon.days_since(day) >= 1.0 {
        mean_noon = mean_noon.add_days(-1.0);
    }

    let noon = apparent_noon(mean_noon);
    if noon.days_since(day) < 0.0 {
        apparent_noon(mean_noon.add_days(1.0))
    } else if noon.days_since(day) >= 1.0 {
        apparent_noon(mean_noon.add_days(-1.0))
    } else {
        noon
    }
}

fn apparent_noon(mean_noon: Instant) -> Instant {
    let first = mean_noon.add_days(-equation_of_time(mean_noon) / MINUTES_PER_DAY);
    mean_noon.add_days(-equation_of_time(first) / MINUTES_PER_DAY)
}

/// Finds the instant the sun crosses `zenith` on the day starting at `day`.
///
/// # Errors
/// Returns `NoEvent` when the sun stays above (`AllDay`) or below (`AllNight`) the
/// threshold for the whole day, or `InvalidZenith` for a custom zenith outside (0°, 180°).
///
/// # Example
/// ```
/// # use solunar::{sun, Crossing, GeoCoordinate, Instant, ZenithThreshold};
/// let london = GeoCoordinate::new(51.5, -0.12).unwrap();
/// let day = Instant::from_utc(2024, 6, 20, 0, 0, 0.0).unwrap();
/// let official = ZenithThreshold::Official;
/// let rise = sun::find_crossing(london, day, official, Crossing::Rising).unwrap();
/// let set = sun::find_crossing(london, day, official, Crossing::Setting).unwrap();
/// assert!(set.days_since(rise) * 24.0 > 16.0);
/// ```
pub fn find_crossing(
    location: GeoCoordinate,
    day: Instant,
    zenith: ZenithThreshold,
    crossing: Crossing,
) -> Result<Instant> {
    check_zenith(zenith.degrees())?;
    let noon = solar_noon(location, day);
    let phi = degrees_to_radians(location.latitude());
    let cos_zenith = cos(degrees_to_radians(zenith.degrees()));

    let mut event = noon;
    for _ in 0..CROSSING_PASSES {
        let delta = degrees_to_radians(declination(event));
        let half_arc = hour_angle_at_threshold(phi, delta, cos_zenith).map_err(|err| {
            debug!(
                "no {crossing:?} crossing for zenith {:.3}° at latitude {:.3}°: {err}",
                zenith.degrees(),
                location.latitude()
            );
            err
        })?;

        event = match crossing {
            Crossing::Rising => noon.add_days(-half_arc / 360.0),
            Crossing::Setting => noon.add_days(half_arc / 360.0),
        };
    }

    Ok(event)
}

/// Hour angle H0 (degrees) where the altitude reaches the threshold, or the polar condition.
fn hour_angle_at_threshold(phi: f64, delta: f64, cos_zenith: f64) -> Result<f64> {
    let cos_h0 = (cos_zenith - sin(phi) * sin(delta)) / (cos(phi) * cos(delta));

    if !cos_h0.is_finite() {
        // Observer at a pole: altitude is constant over the day
        return if sin(phi) * sin(delta) - cos_zenith > 0.0 {
            Err(Error::no_event(PolarCondition::AllDay))
        } else {
            Err(Error::no_event(PolarCondition::AllNight))
        };
    }
    if cos_h0 < -1.0 - POLAR_TOLERANCE {
        return Err(Error::no_event(PolarCondition::AllDay));
    }
    if cos_h0 > 1.0 + POLAR_TOLERANCE {
        return Err(Error::no_event(PolarCondition::AllNight));
    }

    Ok(radians_to_degrees(acos(clamp_unit(cos_h0))))
}

/// Begin and end of the period the sun spends above one zenith threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonCrossings {
    begins: Result<Instant>,
    ends: Result<Instant>,
}

impl HorizonCrossings {
    fn compute(location: GeoCoordinate, day: Instant, zenith: ZenithThreshold) -> Self {
        Self {
            begins: find_crossing(location, day, zenith, Crossing::Rising),
            ends: find_crossing(location, day, zenith, Crossing::Setting),
        }
    }

    /// Rising crossing (sunrise, or dawn for a twilight zenith).
    #[must_use]
    pub const fn begins(&self) -> &Result<Instant> {
        &self.begins
    }

    /// Setting crossing (sunset, or dusk for a twilight zenith).
    #[must_use]
    pub const fn ends(&self) -> &Result<Instant> {
        &self.ends
    }

    /// Hours between the two crossings, if both exist.
    #[must_use]
    pub fn duration_hours(&self) -> Option<f64> {
        match (&self.begins, &self.ends) {
            (Ok(begins), Ok(ends)) => Some(ends.days_since(*begins) * 24.0),
            _ => None,
        }
    }
}

/// Sunrise, sunset, solar noon and twilight boundaries for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct SunTimes {
    solar_noon: Instant,
    official: HorizonCrossings,
    civil: HorizonCrossings,
    nautical: HorizonCrossings,
    astronomical: HorizonCrossings,
}

impl SunTimes {
    /// Local apparent noon.
    #[must_use]
    pub const fn solar_noon(&self) -> Instant {
        self.solar_noon
    }

    /// Official sunrise (zenith 90.833°).
    #[must_use]
    pub const fn sunrise(&self) -> &Result<Instant> {
        self.official.begins()
    }

    /// Official sunset (zenith 90.833°).
    #[must_use]
    pub const fn sunset(&self) -> &Result<Instant> {
        self.official.ends()
    }

    /// Sunrise and sunset.
    #[must_use]
    pub const fn official(&self) -> &HorizonCrossings {
        &self.official
    }

    /// Civil dawn and dusk (zenith 96°).
    #[must_use]
    pub const fn civil(&self) -> &HorizonCrossings {
        &self.civil
    }

    /// Nautical dawn and dusk (zenith 102°).
    #[must_use]
    pub const fn nautical(&self) -> &HorizonCrossings {
        &self.nautical
    }

    /// Astronomical dawn and dusk (zenith 108°).
    #[must_use]
    pub const fn astronomical(&self) -> &HorizonCrossings {
        &self.astronomical
    }

    /// Hours from sunrise to sunset, if both occur.
    #[must_use]
    pub fn daylight_hours(&self) -> Option<f64> {
        self.official.duration_hours()
    }
}

/// Computes all sun events for the day starting at `day`.
#[must_use]
pub fn sun_times(location: GeoCoordinate, day: Instant) -> SunTimes {
    SunTimes {
        solar_noon: solar_noon(location, day),
        official: HorizonCrossings::compute(location, day, ZenithThreshold::Official),
        civil: HorizonCrossings::compute(location, day, ZenithThreshold::Civil),
        nautical: HorizonCrossings::compute(location, day, ZenithThreshold::Nautical),
        astronomical: HorizonCrossings::compute(location, day, ZenithThreshold::Astronomical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> GeoCoordinate {
        GeoCoordinate::new(51.5, -0.12).unwrap()
    }

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Instant {
        Instant::from_utc(year, month, day, hour, minute, 0.0).unwrap()
    }

    #[test]
    fn test_declination_at_solstices_and_equinox() {
        assert!((declination(utc(2024, 6, 20, 21, 0)) - 23.44).abs() < 0.02);
        assert!((declination(utc(2024, 12, 21, 9, 0)) + 23.44).abs() < 0.02);
        assert!(declination(utc(2024, 3, 20, 3, 6)).abs() < 0.05);
    }

    #[test]
    fn test_ecliptic_longitude_at_equinox() {
        let lambda = ecliptic_longitude(utc(2024, 3, 20, 3, 6));
        assert!(normalize_degrees_signed(lambda).abs() < 0.05);
    }

    #[test]
    fn test_equation_of_time_extremes() {
        // Early November maximum of about +16.4 minutes
        assert!((equation_of_time(utc(2024, 11, 3, 12, 0)) - 16.4).abs() < 0.5);
        // Mid-February minimum of about -14.2 minutes
        assert!((equation_of_time(utc(2024, 2, 11, 12, 0)) + 14.2).abs() < 0.5);
    }

    #[test]
    fn test_solar_noon_london() {
        let day = utc(2024, 6, 20, 0, 0);
        let noon = solar_noon(london(), day);
        let minutes_after_midnight = noon.days_since(day) * MINUTES_PER_DAY;
        // 12:02 UTC
        assert!((minutes_after_midnight - 722.0).abs() < 2.0);
    }

    #[test]
    fn test_solar_noon_stays_within_window() {
        let tokyo = GeoCoordinate::new(35.68, 139.77).unwrap();
        let day = utc(2024, 6, 20, 15, 0); // local midnight in Tokyo
        let noon = solar_noon(tokyo, day);
        assert!(noon.days_since(day) >= 0.0);
        assert!(noon.days_since(day) < 1.0);
        // 02:42 UTC on 2024-06-21
        assert!((noon.days_since(utc(2024, 6, 21, 2, 42)) * MINUTES_PER_DAY).abs() < 3.0);
    }

    #[test]
    fn test_sunrise_sunset_london_midsummer() {
        let day = utc(2024, 6, 20, 0, 0);
        let official = ZenithThreshold::Official;
        let rise = find_crossing(london(), day, official, Crossing::Rising).unwrap();
        let set = find_crossing(london(), day, official, Crossing::Setting).unwrap();

        // 03:43 and 20:21 UTC
        assert!((rise.days_since(utc(2024, 6, 20, 3, 43)) * MINUTES_PER_DAY).abs() < 5.0);
        assert!((set.days_since(utc(2024, 6, 20, 20, 21)) * MINUTES_PER_DAY).abs() < 5.0);
    }

    #[test]
    fn test_polar_conditions() {
        let svalbard = GeoCoordinate::new(78.0, 15.0).unwrap();
        let june = utc(2024, 6, 21, 0, 0);
        let december = utc(2024, 12, 21, 0, 0);

        assert_eq!(
            find_crossing(svalbard, june, ZenithThreshold::Official, Crossing::Setting),
            Err(Error::no_event(PolarCondition::AllDay))
        );
        assert_eq!(
            find_crossing(svalbard, december, ZenithThreshold::Official, Crossing::Rising),
            Err(Error::no_event(PolarCondition::AllNight))
        );
    }

    #[test]
    fn test_at_the_pole() {
        let pole = GeoCoordinate::new(90.0, 0.0).unwrap();
        let june = utc(2024, 6, 21, 0, 0);
        let result = find_crossing(pole, june, ZenithThreshold::Official, Crossing::Rising);
        assert_eq!(result, Err(Error::no_event(PolarCondition::AllDay)));
    }

    #[test]
    fn test_rejects_unchecked_custom_zenith() {
        let day = utc(2024, 6, 20, 0, 0);
        for zenith in [-30.0, 0.0, 180.0, f64::NAN] {
            let custom = ZenithThreshold::Custom(zenith);
            let result = find_crossing(london(), day, custom, Crossing::Rising);
            assert!(matches!(result, Err(Error::InvalidZenith { .. })), "zenith {zenith}");
        }
        let twilight = ZenithThreshold::Custom(95.0);
        assert!(find_crossing(london(), day, twilight, Crossing::Rising).is_ok());
    }

    #[test]
    fn test_altitude_range_and_sign() {
        let location = london();
        let day = utc(2024, 6, 20, 0, 0);
        for step in 0..96 {
            let sa = altitude(day.add_minutes(f64::from(step) * 15.0), location);
            assert!((-1.0..=1.0).contains(&sa));
        }
        // Noon altitude 90 - 51.5 + 23.44 = 61.94°
        let noon = altitude(utc(2024, 6, 20, 12, 0), location);
        assert!((noon - sin(degrees_to_radians(61.94))).abs() < 1e-3);
        assert!(altitude(utc(2024, 6, 20, 0, 0), location) < 0.0);
    }

    #[test]
    fn test_sun_times_ordering() {
        let times = sun_times(london(), utc(2024, 3, 20, 0, 0));

        let astro = times.astronomical().begins().clone().unwrap();
        let nautical = times.nautical().begins().clone().unwrap();
        let civil = times.civil().begins().clone().unwrap();
        let rise = times.sunrise().clone().unwrap();
        let set = times.sunset().clone().unwrap();
        let dusk = times.civil().ends().clone().unwrap();

        assert!(astro < nautical);
        assert!(nautical < civil);
        assert!(civil < rise);
        assert!(rise < times.solar_noon());
        assert!(times.solar_noon() < set);
        assert!(set < dusk);

        // Around the equinox day and night are nearly equal
        let daylight = times.daylight_hours().unwrap();
        assert!((daylight - 12.2).abs() < 0.2);
    }

    #[test]
    fn test_midsummer_without_astronomical_night() {
        let times = sun_times(london(), utc(2024, 6, 20, 0, 0));
        assert!(times.sunrise().is_ok());
        assert_eq!(
            times.astronomical().begins(),
            &Err(Error::no_event(PolarCondition::AllDay))
        );
        assert_eq!(times.astronomical().duration_hours(), None);
    }
}
