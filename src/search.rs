//! Sampling-based rise/set search for any body with an altitude function.
//!
//! The search steps through a window at a fixed interval and reports every point where the
//! sine of the altitude crosses a threshold, refined by linear interpolation between the
//! two bracketing samples.

use crate::error::check_zenith;
use crate::math::ceil;
use crate::time::MINUTES_PER_DAY;
use crate::{BoundedEvents, Error, GeoCoordinate, Instant, Result, ZenithThreshold};
use log::debug;

/// Default interval between altitude samples, in minutes.
pub const DEFAULT_SAMPLE_STEP_MINUTES: f64 = 15.0;

/// Default number of rises (and of sets) kept per search.
pub const DEFAULT_MAX_EVENTS: usize = 4;

/// Upper bound on altitude samples per search; one minute steps over a year fit.
pub const MAX_SAMPLES: f64 = 600_000.0;

/// Rise and set instants found within a search window, earliest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RiseSetEvents {
    rises: BoundedEvents<Instant>,
    sets: BoundedEvents<Instant>,
}

impl RiseSetEvents {
    /// Upward crossings of the threshold.
    #[must_use]
    pub const fn rises(&self) -> &BoundedEvents<Instant> {
        &self.rises
    }

    /// Downward crossings of the threshold.
    #[must_use]
    pub const fn sets(&self) -> &BoundedEvents<Instant> {
        &self.sets
    }

    /// Whether no crossing was found at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rises.is_empty() && self.sets.is_empty()
    }
}

/// Finds crossings of the official horizon (zenith 90.833°).
///
/// `altitude_fn` returns the sine of the body's altitude, e.g. [`crate::sun::altitude`]
/// or [`crate::moon::altitude`].
///
/// # Errors
/// Returns `InvalidSearchWindow` if the window is empty or inverted, the step is not a
/// positive finite number of minutes, or the window needs more than [`MAX_SAMPLES`]
/// samples at that step.
///
/// # Example
/// ```
/// # use solunar::{search, sun, GeoCoordinate, Instant};
/// let london = GeoCoordinate::new(51.5, -0.12).unwrap();
/// let start = Instant::from_utc(2024, 6, 20, 0, 0, 0.0).unwrap();
/// let end = start.add_days(1.0);
/// let events = search::find_events(sun::altitude, london, start, end, 15.0, 4).unwrap();
/// assert_eq!(events.rises().len(), 1);
/// assert_eq!(events.sets().len(), 1);
/// ```
pub fn find_events<F>(
    altitude_fn: F,
    location: GeoCoordinate,
    window_start: Instant,
    window_end: Instant,
    sample_step_minutes: f64,
    max_events: usize,
) -> Result<RiseSetEvents>
where
    F: Fn(Instant, GeoCoordinate) -> f64,
{
    find_events_for_zenith(
        altitude_fn,
        location,
        window_start,
        window_end,
        ZenithThreshold::Official,
        sample_step_minutes,
        max_events,
    )
}

/// Finds crossings of an arbitrary zenith threshold.
///
/// # Errors
/// Returns `InvalidSearchWindow` under the same conditions as [`find_events`], and
/// `InvalidZenith` for a custom zenith outside (0°, 180°).
#[allow(clippy::cast_sign_loss)]
pub fn find_events_for_zenith<F>(
    altitude_fn: F,
    location: GeoCoordinate,
    window_start: Instant,
    window_end: Instant,
    zenith: ZenithThreshold,
    sample_step_minutes: f64,
    max_events: usize,
) -> Result<RiseSetEvents>
where
    F: Fn(Instant, GeoCoordinate) -> f64,
{
    check_zenith(zenith.degrees())?;
    let span_minutes = check_window(window_start, window_end, sample_step_minutes)?;
    let target = zenith.sine_altitude();
    let sample_count = ceil(span_minutes / sample_step_minutes) as usize;

    let mut events = RiseSetEvents {
        rises: BoundedEvents::with_capacity(max_events),
        sets: BoundedEvents::with_capacity(max_events),
    };

    let mut prev_time = window_start;
    let mut prev_value = altitude_fn(window_start, location) - target;

    for i in 1..=sample_count {
        let time = if i == sample_count {
            window_end
        } else {
            window_start.add_minutes(i as f64 * sample_step_minutes)
        };
        let value = altitude_fn(time, location) - target;

        if (prev_value >= 0.0) != (value >= 0.0) {
            let fraction = prev_value / (prev_value - value);
            let crossing = prev_time.add_days(time.days_since(prev_time) * fraction);
            if value >= 0.0 {
                events.rises.push(crossing);
            } else {
                events.sets.push(crossing);
            }
        }

        prev_time = time;
        prev_value = value;
    }

    if events.rises.dropped() > 0 || events.sets.dropped() > 0 {
        debug!(
            "crossing search kept {} rises and {} sets, dropped {} and {} over capacity {max_events}",
            events.rises.len(),
            events.sets.len(),
            events.rises.dropped(),
            events.sets.dropped()
        );
    }

    Ok(events)
}

/// Validates the window and step, returning the window length in minutes.
fn check_window(
    window_start: Instant,
    window_end: Instant,
    sample_step_minutes: f64,
) -> Result<f64> {
    let span_minutes = window_end.days_since(window_start) * MINUTES_PER_DAY;
    if !span_minutes.is_finite() {
        return Err(Error::invalid_search_window("window bounds must be finite"));
    }
    if span_minutes <= 0.0 {
        return Err(Error::invalid_search_window(
            "window end must be after window start",
        ));
    }
    if !(sample_step_minutes.is_finite() && sample_step_minutes > 0.0) {
        return Err(Error::invalid_search_window(
            "sample step must be a positive number of minutes",
        ));
    }
    if span_minutes / sample_step_minutes > MAX_SAMPLES {
        return Err(Error::invalid_search_window(
            "sample step is too small for the window length",
        ));
    }
    Ok(span_minutes)
}
