#![cfg(feature = "chrono")]

//! Rendering event times in real time zones, across daylight saving changes.

use chrono::TimeZone;
use chrono_tz::{America::New_York, Europe::London};
use solunar::display::{render_event, render_instant, score_line, stars, TimeFormat};
use solunar::{sun, GeoCoordinate, Instant, SolunarDay};

fn local_midnight<Tz: TimeZone>(tz: &Tz, year: i32, month: u32, day: u32) -> Instant {
    let midnight = tz.with_ymd_and_hms(year, month, day, 0, 0, 0).single().unwrap();
    Instant::from_datetime(&midnight)
}

#[test]
fn london_sunrise_across_daylight_saving() {
    let london = GeoCoordinate::new(51.5, -0.12).unwrap();

    // British Summer Time
    let summer = sun::sun_times(london, local_midnight(&London, 2024, 6, 20));
    let rendered = render_event(summer.sunrise(), &London, TimeFormat::TwentyFourHour);
    assert!(["04:42", "04:43", "04:44"].contains(&rendered.as_str()), "got {rendered}");

    // Greenwich Mean Time
    let winter = sun::sun_times(london, local_midnight(&London, 2024, 12, 21));
    let rendered = render_event(winter.sunrise(), &London, TimeFormat::TwentyFourHour);
    assert!(["08:03", "08:04", "08:05"].contains(&rendered.as_str()), "got {rendered}");
}

#[test]
fn twelve_hour_clock() {
    let new_york = GeoCoordinate::new(40.7128, -74.006).unwrap();
    let times = sun::sun_times(new_york, local_midnight(&New_York, 2024, 6, 20));

    let sunset = render_event(times.sunset(), &New_York, TimeFormat::TwelveHour);
    assert!(sunset.ends_with("PM"), "got {sunset}");
    assert!(sunset.starts_with("08:"), "got {sunset}");

    let noon = render_instant(times.solar_noon(), &New_York, TimeFormat::TwelveHour);
    assert!(noon.starts_with("12:5") || noon.starts_with("01:0"), "got {noon}");
}

#[test]
fn missing_events_render_their_reason() {
    let tromso = GeoCoordinate::new(69.65, 18.96).unwrap();
    let oslo = chrono_tz::Europe::Oslo;
    let times = sun::sun_times(tromso, local_midnight(&oslo, 2024, 6, 21));

    let rendered = render_event(times.sunset(), &oslo, TimeFormat::TwentyFourHour);
    assert_eq!(
        rendered,
        "no event: body stays above the threshold altitude all day"
    );
}

#[test]
fn solunar_scores_render_as_bars() {
    let london = GeoCoordinate::new(51.5, -0.12).unwrap();
    let scores = SolunarDay::compute(london, local_midnight(&London, 2024, 6, 20));

    let line = score_line(scores.overall_score());
    assert!(line.contains("% "));
    assert!(line.ends_with(&stars(scores.overall_score())));

    for sample in scores.samples() {
        assert_eq!(stars(sample.combined_score()).chars().count(), 10);
    }

    let first = render_instant(scores.samples()[0].start(), &London, TimeFormat::TwentyFourHour);
    assert_eq!(first, "00:00");
}
