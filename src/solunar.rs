//! Solunar activity scoring.
//!
//! Solunar theory holds that animals are most active when the sun and moon are near
//! significant positions (rising, setting, overhead or underfoot) at the same time, and more
//! so around new and full moon and when the moon is close to Earth. This module turns those
//! ideas into scores in [0, 1] and finds the peak periods of a day.

use crate::math::{abs, cos, powi, PI};
use crate::{moon, sun, BoundedEvents, GeoCoordinate, Instant, MoonState};
use alloc::vec::Vec;
use log::{debug, trace};

/// Combined score above which a bucket counts as part of an active period.
pub const ACTIVITY_THRESHOLD: f64 = 0.05;

/// Divisor applied to the day's summed combined scores to get the coincidence score.
pub const COINCIDENCE_DIVISOR: f64 = 5.0;

/// Distance of the moon at a typical perigee, in km.
pub const PERIGEE_KM: f64 = 356_500.0;

/// Distance of the moon at a typical apogee, in km.
pub const APOGEE_KM: f64 = 406_700.0;

/// Number of half-hour buckets in a day.
pub const BUCKETS_PER_DAY: usize = 48;

/// Length of one bucket in minutes.
pub const BUCKET_MINUTES: f64 = 30.0;

/// At most this many peak periods are reported per day.
pub const MAX_PEAK_PERIODS: usize = 4;

/// Exponent applied to altitude proximity so that only positions close to a target score well.
pub const PEAK_SHARPNESS: i32 = 6;

/// Extremes below this magnitude are treated as zero.
const EXTREME_EPSILON: f64 = 1e-12;

/// Score for the moon phase: 1 at new and full moon, 0 at the quarters.
#[must_use]
pub fn score_moon_phase(phase: f64) -> f64 {
    abs(cos(2.0 * PI * phase))
}

/// Score for the moon's distance: 1 at perigee, 0 at apogee, clamped outside.
#[must_use]
pub fn score_moon_distance(distance_km: f64) -> f64 {
    ((APOGEE_KM - distance_km) / (APOGEE_KM - PERIGEE_KM)).clamp(0.0, 1.0)
}

/// How far `value` has travelled from 0 towards `extreme`, in [0, 1].
fn fraction_of(value: f64, extreme: f64) -> f64 {
    if abs(extreme) <= EXTREME_EPSILON {
        0.0
    } else {
        (value / extreme).clamp(0.0, 1.0)
    }
}

/// Score for the sun's sine altitude, relative to the day's extremes.
///
/// The sun scores 1 on the horizon and, when selected, at its highest (`max_sa`) or lowest
/// (`min_sa`) point of the day. In between the score falls off steeply.
#[must_use]
pub fn score_solar_altitude(
    sa: f64,
    include_high_noon: bool,
    include_underfoot: bool,
    max_sa: f64,
    min_sa: f64,
) -> f64 {
    let horizon_extreme = if sa >= 0.0 { max_sa } else { min_sa };
    let mut best = 1.0 - fraction_of(sa, horizon_extreme);

    if include_high_noon && sa > 0.0 {
        best = best.max(fraction_of(sa, max_sa));
    }
    if include_underfoot && sa < 0.0 {
        best = best.max(fraction_of(sa, min_sa));
    }

    powi(best, PEAK_SHARPNESS)
}

/// Score for the moon's sine altitude: horizon, overhead and underfoot all count.
#[must_use]
pub fn score_moon_altitude(la: f64, max_la: f64, min_la: f64) -> f64 {
    score_solar_altitude(la, true, true, max_la, min_la)
}

/// Which solar positions count as significant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolunarOptions {
    /// Score the sun highly when it is at its highest.
    pub include_high_noon: bool,
    /// Score the sun highly when it is at its lowest.
    pub include_sun_underfoot: bool,
    /// Instant whose moon state drives the phase and distance scores; the middle of
    /// the scored day when `None`.
    pub moon_at: Option<Instant>,
}

impl Default for SolunarOptions {
    fn default() -> Self {
        Self {
            include_high_noon: true,
            include_sun_underfoot: false,
            moon_at: None,
        }
    }
}

/// Scores for one half-hour bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolunarSample {
    start: Instant,
    sun_altitude: f64,
    moon_altitude: f64,
    sun_score: f64,
    moon_score: f64,
}

impl SolunarSample {
    /// Start of the bucket.
    #[must_use]
    pub const fn start(&self) -> Instant {
        self.start
    }

    /// Sine of the sun's altitude at the bucket centre.
    #[must_use]
    pub const fn sun_altitude(&self) -> f64 {
        self.sun_altitude
    }

    /// Sine of the moon's altitude at the bucket centre.
    #[must_use]
    pub const fn moon_altitude(&self) -> f64 {
        self.moon_altitude
    }

    /// Sun position score.
    #[must_use]
    pub const fn sun_score(&self) -> f64 {
        self.sun_score
    }

    /// Moon position score.
    #[must_use]
    pub const fn moon_score(&self) -> f64 {
        self.moon_score
    }

    /// Product of the sun and moon scores.
    #[must_use]
    pub fn combined_score(&self) -> f64 {
        self.sun_score * self.moon_score
    }
}

/// Solunar scores and peak periods for one day.
///
/// # Example
/// ```
/// # use solunar::{GeoCoordinate, Instant, SolunarDay};
/// let london = GeoCoordinate::new(51.5, -0.12).unwrap();
/// let day = Instant::from_utc(2024, 6, 20, 0, 0, 0.0).unwrap();
/// let scores = SolunarDay::compute(london, day);
/// assert_eq!(scores.samples().len(), 48);
/// assert!(scores.peaks().len() <= 4);
/// assert!((0.0..=1.0).contains(&scores.overall_score()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolunarDay {
    day_start: Instant,
    moon: MoonState,
    samples: Vec<SolunarSample>,
    peaks: BoundedEvents<Instant>,
    phase_score: f64,
    distance_score: f64,
    coincidence_score: f64,
}

impl SolunarDay {
    /// Scores the 24 hours starting at `day_start` with the default options.
    #[must_use]
    pub fn compute(location: GeoCoordinate, day_start: Instant) -> Self {
        Self::compute_with(location, day_start, SolunarOptions::default())
    }

    /// Scores the 24 hours starting at `day_start`.
    #[must_use]
    pub fn compute_with(
        location: GeoCoordinate,
        day_start: Instant,
        options: SolunarOptions,
    ) -> Self {
        let bucket_starts =
            (0..BUCKETS_PER_DAY).map(|i| day_start.add_minutes(i as f64 * BUCKET_MINUTES));

        // Altitudes at each bucket centre, plus the day's extremes (which always straddle 0)
        let mut altitudes = Vec::with_capacity(BUCKETS_PER_DAY);
        let (mut max_sa, mut min_sa, mut max_la, mut min_la) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
        for start in bucket_starts {
            let centre = start.add_minutes(BUCKET_MINUTES / 2.0);
            let sa = sun::altitude(centre, location);
            let la = moon::altitude(centre, location);
            max_sa = max_sa.max(sa);
            min_sa = min_sa.min(sa);
            max_la = max_la.max(la);
            min_la = min_la.min(la);
            altitudes.push((start, sa, la));
        }

        let samples: Vec<SolunarSample> = altitudes
            .into_iter()
            .map(|(start, sa, la)| {
                let sample = SolunarSample {
                    start,
                    sun_altitude: sa,
                    moon_altitude: la,
                    sun_score: score_solar_altitude(
                        sa,
                        options.include_high_noon,
                        options.include_sun_underfoot,
                        max_sa,
                        min_sa,
                    ),
                    moon_score: score_moon_altitude(la, max_la, min_la),
                };
                trace!(
                    "bucket at JD {:.5}: sun {:.3} moon {:.3} combined {:.3}",
                    start.julian_date(),
                    sample.sun_score,
                    sample.moon_score,
                    sample.combined_score()
                );
                sample
            })
            .collect();

        let total: f64 = samples.iter().map(SolunarSample::combined_score).sum();
        let peaks = detect_peaks(&samples);
        let moon_at = options.moon_at.unwrap_or_else(|| day_start.add_days(0.5));
        let moon = moon::state(moon_at);

        Self {
            day_start,
            moon,
            phase_score: score_moon_phase(moon.phase()),
            distance_score: score_moon_distance(moon.distance_km()),
            coincidence_score: (total / COINCIDENCE_DIVISOR).clamp(0.0, 1.0),
            samples,
            peaks,
        }
    }

    /// Start of the scored day.
    #[must_use]
    pub const fn day_start(&self) -> Instant {
        self.day_start
    }

    /// Moon state used for the phase and distance scores.
    #[must_use]
    pub const fn moon(&self) -> MoonState {
        self.moon
    }

    /// Per-bucket scores, earliest first.
    #[must_use]
    pub fn samples(&self) -> &[SolunarSample] {
        &self.samples
    }

    /// Midpoints of the day's peak activity periods.
    #[must_use]
    pub const fn peaks(&self) -> &BoundedEvents<Instant> {
        &self.peaks
    }

    /// Moon phase score.
    #[must_use]
    pub const fn phase_score(&self) -> f64 {
        self.phase_score
    }

    /// Moon distance score.
    #[must_use]
    pub const fn distance_score(&self) -> f64 {
        self.distance_score
    }

    /// How strongly sun and moon positions coincide over the day.
    #[must_use]
    pub const fn coincidence_score(&self) -> f64 {
        self.coincidence_score
    }

    /// Mean of the coincidence, phase and distance scores.
    #[must_use]
    pub fn overall_score(&self) -> f64 {
        (self.coincidence_score + self.phase_score + self.distance_score) / 3.0
    }
}

/// Records the midpoint of each active period at the first drop in the combined score.
fn detect_peaks(samples: &[SolunarSample]) -> BoundedEvents<Instant> {
    let mut peaks = BoundedEvents::with_capacity(MAX_PEAK_PERIODS);
    let mut in_period = false;
    let mut recorded = false;
    let mut last_score = 0.0;

    for sample in samples {
        let score = sample.combined_score();

        if in_period && score < last_score && !recorded {
            recorded = true;
            // Centre of the previous bucket
            peaks.push(sample.start.add_minutes(-BUCKET_MINUTES / 2.0));
        }
        if score > ACTIVITY_THRESHOLD {
            in_period = true;
        } else {
            in_period = false;
            recorded = false;
        }

        last_score = score;
    }

    if peaks.dropped() > 0 {
        debug!(
            "{} solunar peaks beyond the first {MAX_PEAK_PERIODS} were dropped",
            peaks.dropped()
        );
    }
    peaks
}
