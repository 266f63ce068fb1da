//! Presentation helpers for reports: star ratings, percentages and zoned event times.

#[cfg(feature = "chrono")]
use crate::{Instant, Result};
use alloc::format;
use alloc::string::String;
#[cfg(feature = "chrono")]
use alloc::string::ToString;
#[cfg(feature = "chrono")]
use chrono::TimeZone;
#[cfg(feature = "chrono")]
use core::fmt::Display;

/// Number of positions in a star rating.
const STAR_SLOTS: u32 = 10;

/// Renders a score in [0, 1] as a ten-character bar of `*` and spaces.
///
/// Position `i` holds a star when `score > i / 10`, so 0 renders as all spaces and any
/// score above 0.9 as ten stars.
///
/// # Example
/// ```
/// # use solunar::display::stars;
/// assert_eq!(stars(0.35), "****      ");
/// assert_eq!(stars(0.0), "          ");
/// ```
#[must_use]
pub fn stars(score: f64) -> String {
    (0..STAR_SLOTS)
        .map(|i| {
            if score > f64::from(i) / f64::from(STAR_SLOTS) {
                '*'
            } else {
                ' '
            }
        })
        .collect()
}

/// Truncated percentage of a score in [0, 1].
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0) as u32
}

/// Clock style for rendered times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeFormat {
    /// `14:05`
    #[default]
    TwentyFourHour,
    /// `02:05 PM`
    TwelveHour,
}

impl TimeFormat {
    /// `strftime`-style pattern for this format.
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        match self {
            Self::TwentyFourHour => "%H:%M",
            Self::TwelveHour => "%I:%M %p",
        }
    }
}

/// Renders an instant as a clock time in the given zone.
///
/// Instants outside chrono's range render as the conversion error.
#[cfg(feature = "chrono")]
#[must_use]
pub fn render_instant<Tz>(instant: Instant, tz: &Tz, format: TimeFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match instant.to_datetime(tz) {
        Ok(datetime) => datetime.format(format.pattern()).to_string(),
        Err(err) => err.to_string(),
    }
}

/// Renders an event time, or the reason there is none.
///
/// # Example
/// ```
/// # use solunar::display::{render_event, TimeFormat};
/// # use solunar::{Error, Instant, PolarCondition};
/// let event = Instant::from_utc(2024, 6, 20, 20, 21, 0.0);
/// assert_eq!(render_event(&event, &chrono::Utc, TimeFormat::TwentyFourHour), "20:21");
/// assert_eq!(render_event(&event, &chrono::Utc, TimeFormat::TwelveHour), "08:21 PM");
///
/// let none = Err(Error::no_event(PolarCondition::AllDay));
/// assert!(render_event(&none, &chrono::Utc, TimeFormat::TwentyFourHour).starts_with("no event"));
/// ```
#[cfg(feature = "chrono")]
#[must_use]
pub fn render_event<Tz>(event: &Result<Instant>, tz: &Tz, format: TimeFormat) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match event {
        Ok(instant) => render_instant(*instant, tz, format),
        Err(err) => err.to_string(),
    }
}

/// Renders a day-level score as percentage and stars, e.g. `"62% *******   "`.
#[must_use]
pub fn score_line(score: f64) -> String {
    format!("{}% {}", percent(score), stars(score))
}
