//! # Solunar
//!
//! Sun and moon rise/set times, moon phase and solunar activity scores.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! The crate combines two compact position models with a heuristic scorer:
//! - **Sun**: low-precision almanac ephemeris (about 0.01°), closed-form sunrise, sunset,
//!   solar noon and civil, nautical and astronomical twilight.
//! - **Moon**: truncated Meeus lunar theory with topocentric parallax; phase, age, distance,
//!   illumination and a sampling search for moonrise and moonset.
//! - **Solunar**: scores each half hour of a day by how close sun and moon are to the horizon,
//!   overhead or underfoot, and rates the day using the moon's phase and distance.
//!
//! All calculations run on [`Instant`], a fractional Julian day in UT. Calendar dates and
//! time zones are handled by `chrono` at the edges only.
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library for native math functions (usually faster than `libm`)
//! - `chrono` (default): Conversions between `DateTime<Tz>` and [`Instant`], zoned rendering
//! - `libm`: Use pure Rust math for `no_std` environments
//!
//! **Configuration examples:**
//! ```toml
//! # Default: std + chrono
//! solunar = "0.1"
//!
//! # Minimal no_std (pure numeric API, needs an allocator)
//! solunar = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## Quick Start
//!
//! ### Sun and moon (numeric API)
//! ```rust
//! use solunar::{moon, sun, GeoCoordinate, Instant};
//!
//! let london = GeoCoordinate::new(51.5, -0.12).unwrap();
//! let day = Instant::from_utc(2024, 6, 20, 0, 0, 0.0).unwrap();
//!
//! let times = sun::sun_times(london, day);
//! let daylight = times.daylight_hours().unwrap();
//! assert!(daylight > 16.0);
//!
//! let state = moon::state(day.add_days(0.5));
//! println!("Moon: {} ({:.0}% lit)", state.phase_name(), state.illuminated_fraction() * 100.0);
//! ```
//!
//! ### Solunar report in a time zone (requires chrono)
//! ```rust
//! # #[cfg(feature = "chrono")] {
//! use chrono::{FixedOffset, TimeZone};
//! use solunar::display::{render_event, score_line, TimeFormat};
//! use solunar::{sun, GeoCoordinate, Instant, SolunarDay};
//!
//! let tz = FixedOffset::east_opt(3600).unwrap();
//! let midnight = tz.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap();
//! let day = Instant::from_datetime(&midnight);
//! let london = GeoCoordinate::new(51.5, -0.12).unwrap();
//!
//! let times = sun::sun_times(london, day);
//! println!("Sunrise: {}", render_event(times.sunrise(), &tz, TimeFormat::TwentyFourHour));
//!
//! let solunar = SolunarDay::compute(london, day);
//! println!("Overall: {}", score_line(solunar.overall_score()));
//! # }
//! ```
//!
//! ## Conventions
//!
//! - **Altitude** values are sines of the elevation angle, in [-1, 1]
//! - **Zenith angle**: 0° = directly overhead, 90° = geometric horizon;
//!   twilight zeniths exceed 90°
//! - **Latitude** positive north, **longitude** positive east

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

extern crate alloc;

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("either the `std` or the `libm` feature must be enabled");

// Public API exports
pub use crate::error::{Error, Result};
pub use crate::search::RiseSetEvents;
pub use crate::solunar::{SolunarDay, SolunarOptions, SolunarSample};
pub use crate::sun::{HorizonCrossings, SunTimes};
pub use crate::time::Instant;
pub use crate::types::{
    BoundedEvents, Crossing, GeoCoordinate, MoonPhase, MoonState, PolarCondition, ZenithThreshold,
};

// Position models
pub mod moon;
pub mod sun;

// Event search and scoring
pub mod search;
pub mod solunar;

// Core modules
pub mod error;
pub mod time;
pub mod types;

// Presentation
pub mod display;

// Internal modules
mod math;
