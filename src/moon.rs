//! Low-precision lunar theory: position, phase, age, distance and topocentric altitude.
//!
//! Mean elements and the leading periodic terms follow Meeus, "Astronomical Algorithms",
//! 2nd edition, chapter 47. The truncated tables keep the position within a few hundredths
//! of a degree, which is ample for rise/set searches and phase classification.

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]

use crate::math::{
    asin, atan, atan2, clamp_unit, cos, degrees_to_radians, normalize_degrees_0_to_360, polynomial,
    radians_to_degrees, sin, sine_of_altitude, tan,
};
use crate::search::{self, RiseSetEvents, DEFAULT_MAX_EVENTS, DEFAULT_SAMPLE_STEP_MINUTES};
use crate::types::SYNODIC_MONTH_DAYS;
use crate::{sun, GeoCoordinate, Instant, MoonPhase, MoonState, Result};

/// Mean Earth–Moon distance term of the distance series, in km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Equatorial radius of the Earth in km.
const EARTH_RADIUS_KM: f64 = 6_378.14;

/// Polar/equatorial axis ratio (1 - flattening) of the reference ellipsoid.
const EARTH_AXIS_RATIO: f64 = 0.99664719;

const MEAN_LONGITUDE: [f64; 5] = [
    218.3164477,
    481267.88123421,
    -0.0015786,
    1.0 / 538841.0,
    -1.0 / 65194000.0,
];
const MEAN_ELONGATION: [f64; 5] = [
    297.8501921,
    445267.1114034,
    -0.0018819,
    1.0 / 545868.0,
    -1.0 / 113065000.0,
];
const SUN_MEAN_ANOMALY: [f64; 4] = [357.5291092, 35999.0502909, -0.0001536, 1.0 / 24490000.0];
const MOON_MEAN_ANOMALY: [f64; 5] = [
    134.9633964,
    477198.8675055,
    0.0087414,
    1.0 / 69699.0,
    -1.0 / 14712000.0,
];
const ARGUMENT_OF_LATITUDE: [f64; 5] = [
    93.2720950,
    483202.0175233,
    -0.0036539,
    -1.0 / 3526000.0,
    1.0 / 863310000.0,
];

/// Periodic terms for longitude and distance: multiples of D, M, M′, F, then
/// the sine coefficient (1e-6 degrees) and the cosine coefficient (1e-3 km).
const LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, f64, f64); 24] = [
    (0, 0, 1, 0, 6288774.0, -20905355.0),
    (2, 0, -1, 0, 1274027.0, -3699111.0),
    (2, 0, 0, 0, 658314.0, -2955968.0),
    (0, 0, 2, 0, 213618.0, -569925.0),
    (0, 1, 0, 0, -185116.0, 48888.0),
    (0, 0, 0, 2, -114332.0, -3149.0),
    (2, 0, -2, 0, 58793.0, 246158.0),
    (2, -1, -1, 0, 57066.0, -152138.0),
    (2, 0, 1, 0, 53322.0, -170733.0),
    (2, -1, 0, 0, 45758.0, -204586.0),
    (0, 1, -1, 0, -40923.0, -129620.0),
    (1, 0, 0, 0, -34720.0, 108743.0),
    (0, 1, 1, 0, -30383.0, 104755.0),
    (4, 0, -1, 0, 10675.0, 30824.0),
    (0, 0, 3, 0, 10034.0, 2423.0),
    (4, 0, -2, 0, 8548.0, -8379.0),
    (2, 1, -1, 0, -7888.0, -16675.0),
    (2, 1, 0, 0, -6766.0, -12831.0),
    (1, 0, -1, 0, -5163.0, -10445.0),
    (1, 1, 0, 0, 4987.0, -11650.0),
    (2, -1, 1, 0, 4036.0, 14403.0),
    (2, 0, 2, 0, 3994.0, -7003.0),
    (4, 0, 0, 0, 3861.0, 0.0),
    (2, 0, -3, 0, 3665.0, 10056.0),
];

/// Periodic terms for latitude: multiples of D, M, M′, F and the sine coefficient (1e-6 degrees).
const LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 14] = [
    (0, 0, 0, 1, 5128122.0),
    (0, 0, 1, 1, 280602.0),
    (0, 0, 1, -1, 277693.0),
    (2, 0, 0, -1, 173237.0),
    (2, 0, -1, 1, 55413.0),
    (2, 0, -1, -1, 46271.0),
    (2, 0, 0, 1, 32573.0),
    (0, 0, 2, 1, 17198.0),
    (2, 0, 1, -1, 9266.0),
    (0, 0, 2, -1, 8822.0),
    (2, -1, 0, -1, 8216.0),
    (2, 0, -2, -1, 4324.0),
    (2, 0, 1, 1, 4200.0),
    (2, 1, 0, -1, -3359.0),
];

/// Geocentric ecliptic position of the moon.
#[derive(Debug, Clone, Copy)]
struct LunarCoordinates {
    /// Ecliptic longitude in degrees [0, 360)
    longitude: f64,
    /// Ecliptic latitude in degrees
    latitude: f64,
    distance_km: f64,
}

impl LunarCoordinates {
    fn at(instant: Instant) -> Self {
        let t = instant.julian_century();

        let l_prime = normalize_degrees_0_to_360(polynomial(&MEAN_LONGITUDE, t));
        let d = degrees_to_radians(normalize_degrees_0_to_360(polynomial(&MEAN_ELONGATION, t)));
        let m = degrees_to_radians(normalize_degrees_0_to_360(polynomial(&SUN_MEAN_ANOMALY, t)));
        let m_prime =
            degrees_to_radians(normalize_degrees_0_to_360(polynomial(&MOON_MEAN_ANOMALY, t)));
        let f = degrees_to_radians(normalize_degrees_0_to_360(polynomial(
            &ARGUMENT_OF_LATITUDE,
            t,
        )));

        // Decreasing eccentricity of Earth's orbit scales the terms involving M
        let e = polynomial(&[1.0, -0.002516, -0.0000074], t);
        let eccentricity_factor = |m_multiple: i8| match m_multiple.unsigned_abs() {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        let argument = |dm: i8, mm: i8, mpm: i8, fm: i8| {
            f64::from(dm) * d + f64::from(mm) * m + f64::from(mpm) * m_prime + f64::from(fm) * f
        };

        let mut sum_l = 0.0;
        let mut sum_r = 0.0;
        for &(dm, mm, mpm, fm, sl, sr) in &LONGITUDE_DISTANCE_TERMS {
            let arg = argument(dm, mm, mpm, fm);
            let scale = eccentricity_factor(mm);
            sum_l += sl * scale * sin(arg);
            sum_r += sr * scale * cos(arg);
        }

        let mut sum_b = 0.0;
        for &(dm, mm, mpm, fm, sb) in &LATITUDE_TERMS {
            sum_b += sb * eccentricity_factor(mm) * sin(argument(dm, mm, mpm, fm));
        }

        // Venus, Jupiter and Earth-flattening perturbations
        let a1 = degrees_to_radians(119.75 + 131.849 * t);
        let a2 = degrees_to_radians(53.09 + 479264.290 * t);
        let a3 = degrees_to_radians(313.45 + 481266.484 * t);
        let l_prime_rad = degrees_to_radians(l_prime);
        sum_l += 3958.0 * sin(a1) + 1962.0 * sin(l_prime_rad - f) + 318.0 * sin(a2);
        sum_b += -2235.0 * sin(l_prime_rad)
            + 382.0 * sin(a3)
            + 175.0 * sin(a1 - f)
            + 175.0 * sin(a1 + f)
            + 127.0 * sin(l_prime_rad - m_prime)
            - 115.0 * sin(l_prime_rad + m_prime);

        Self {
            longitude: normalize_degrees_0_to_360(l_prime + sum_l / 1e6),
            latitude: sum_b / 1e6,
            distance_km: MEAN_DISTANCE_KM + sum_r / 1000.0,
        }
    }
}

/// Phase, age and distance of the moon at `instant`.
///
/// # Example
/// ```
/// # use solunar::{moon, Instant, MoonPhase};
/// // Full moon of 2024-04-23 23:49 UTC
/// let instant = Instant::from_utc(2024, 4, 23, 23, 49, 0.0).unwrap();
/// let state = moon::state(instant);
/// assert_eq!(state.phase_name(), MoonPhase::Full);
/// assert!((state.phase() - 0.5).abs() < 0.02);
/// ```
#[must_use]
pub fn state(instant: Instant) -> MoonState {
    let moon = LunarCoordinates::at(instant);
    let elongation = normalize_degrees_0_to_360(moon.longitude - sun::ecliptic_longitude(instant));

    let mut phase = elongation / 360.0;
    if phase >= 1.0 {
        phase = 0.0;
    }
    let mut age_days = phase * SYNODIC_MONTH_DAYS;
    if age_days >= SYNODIC_MONTH_DAYS {
        age_days = 0.0;
    }

    MoonState::new(phase, age_days, moon.distance_km)
}

/// Right ascension (degrees) and declination (radians) using the mean obliquity of date.
fn equatorial_position(moon: &LunarCoordinates, instant: Instant) -> (f64, f64) {
    let epsilon = degrees_to_radians(polynomial(
        &[23.439291, -0.0130042],
        instant.julian_century(),
    ));
    let lambda = degrees_to_radians(moon.longitude);
    let beta = degrees_to_radians(moon.latitude);

    let right_ascension = radians_to_degrees(atan2(
        sin(lambda) * cos(epsilon) - tan(beta) * sin(epsilon),
        cos(lambda),
    ));
    let declination = asin(clamp_unit(
        sin(beta) * cos(epsilon) + cos(beta) * sin(epsilon) * sin(lambda),
    ));
    (right_ascension, declination)
}

/// Sine of the moon's topocentric altitude at the given instant and location.
#[must_use]
pub fn altitude(instant: Instant, location: GeoCoordinate) -> f64 {
    let moon = LunarCoordinates::at(instant);

    let (right_ascension, delta) = equatorial_position(&moon, instant);
    let hour_angle = degrees_to_radians(
        instant.greenwich_mean_sidereal_time() + location.longitude() - right_ascension,
    );

    // Shift to the observer's position on the surface
    let phi = degrees_to_radians(location.latitude());
    let sin_parallax = EARTH_RADIUS_KM / moon.distance_km;
    let u = atan(EARTH_AXIS_RATIO * tan(phi));
    let rho_sin_phi = EARTH_AXIS_RATIO * sin(u);
    let rho_cos_phi = cos(u);

    let denominator = cos(delta) - rho_cos_phi * sin_parallax * cos(hour_angle);
    let delta_alpha = atan2(-rho_cos_phi * sin_parallax * sin(hour_angle), denominator);
    let topocentric_delta = atan2(
        (sin(delta) - rho_sin_phi * sin_parallax) * cos(delta_alpha),
        denominator,
    );

    sine_of_altitude(phi, topocentric_delta, hour_angle - delta_alpha)
}

/// Named phase for a phase fraction in [0, 1).
#[must_use]
pub fn phase_name(phase: f64) -> MoonPhase {
    MoonPhase::from_fraction(phase)
}

/// Moonrises and moonsets between `window_start` and `window_end`, at most four of each.
///
/// # Errors
/// Returns `InvalidSearchWindow` if the window is empty or inverted.
pub fn rises_and_sets(
    location: GeoCoordinate,
    window_start: Instant,
    window_end: Instant,
) -> Result<RiseSetEvents> {
    search::find_events(
        altitude,
        location,
        window_start,
        window_end,
        DEFAULT_SAMPLE_STEP_MINUTES,
        DEFAULT_MAX_EVENTS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Instant {
        Instant::from_utc(year, month, day, hour, minute, 0.0).unwrap()
    }

    #[test]
    fn test_position_against_worked_example() {
        // Meeus example 47.a: 1992-04-12 0h TD
        let moon = LunarCoordinates::at(Instant::from_julian_date(2_448_724.5));
        assert!((moon.longitude - 133.162655).abs() < 0.1);
        assert!((moon.latitude + 3.229126).abs() < 0.05);
        assert!((moon.distance_km - 368_409.7).abs() < 100.0);
    }

    #[test]
    fn test_state_at_new_and_full_moon() {
        let new = state(utc(2024, 1, 11, 11, 57));
        assert!(new.phase() < 0.02 || new.phase() > 0.98);
        assert_eq!(new.phase_name(), MoonPhase::New);
        assert!(new.illuminated_fraction() < 0.01);

        let full = state(utc(2024, 1, 25, 17, 54));
        assert!((full.phase() - 0.5).abs() < 0.02);
        assert!((full.age_days() - SYNODIC_MONTH_DAYS / 2.0).abs() < 0.6);
        assert!(full.illuminated_fraction() > 0.99);
    }

    #[test]
    fn test_state_ranges_over_a_month() {
        let start = utc(2024, 3, 1, 0, 0);
        for hour in 0..(24 * 30) {
            let moon = state(start.add_days(f64::from(hour) / 24.0));
            assert!((0.0..1.0).contains(&moon.phase()));
            assert!((0.0..SYNODIC_MONTH_DAYS).contains(&moon.age_days()));
            assert!((356_000.0..407_000.0).contains(&moon.distance_km()));
            assert!((moon.age_days() - moon.phase() * SYNODIC_MONTH_DAYS).abs() < 1e-9);
        }
    }

    #[test]
    fn test_altitude_range() {
        let location = GeoCoordinate::new(-33.9, 151.2).unwrap();
        let start = utc(2024, 8, 1, 0, 0);
        let mut above = false;
        let mut below = false;
        for step in 0..(4 * 48) {
            let sa = altitude(start.add_minutes(f64::from(step) * 15.0), location);
            assert!((-1.0..=1.0).contains(&sa));
            above |= sa > 0.0;
            below |= sa < 0.0;
        }
        assert!(above && below);
    }

    #[test]
    fn test_parallax_lowers_the_moon() {
        // Topocentric altitude sits up to ~1° below the geocentric one
        let instant = utc(2024, 6, 1, 6, 0);
        let location = GeoCoordinate::new(45.0, 10.0).unwrap();
        let moon = LunarCoordinates::at(instant);
        let (ra, dec) = equatorial_position(&moon, instant);
        let h = degrees_to_radians(instant.greenwich_mean_sidereal_time() + 10.0 - ra);
        let geocentric = sine_of_altitude(degrees_to_radians(45.0), dec, h);

        let topocentric = altitude(instant, location);
        let drop = radians_to_degrees(asin(geocentric)) - radians_to_degrees(asin(topocentric));
        assert!(drop > 0.0 && drop < 1.05);
    }

    #[test]
    fn test_phase_name_delegates() {
        assert_eq!(phase_name(0.0), MoonPhase::New);
        assert_eq!(phase_name(0.26), MoonPhase::FirstQuarter);
        assert_eq!(phase_name(0.5), MoonPhase::Full);
    }

    #[test]
    fn test_rises_and_sets_in_one_day() {
        let london = GeoCoordinate::new(51.5, -0.12).unwrap();
        let start = utc(2024, 6, 20, 0, 0);
        let events = rises_and_sets(london, start, start.add_days(1.0)).unwrap();

        assert!(events.rises().len() <= 2);
        assert!(events.sets().len() <= 2);
        assert!(!events.rises().is_empty() || !events.sets().is_empty());
        for rise in events.rises() {
            assert!(*rise >= start && *rise <= start.add_days(1.0));
        }

        assert!(rises_and_sets(london, start, start).is_err());
    }
}
