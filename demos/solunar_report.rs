//! Full day report: date, sun, moon and solunar scores for one location.
//!
//! ```text
//! cargo run --example solunar_report -- [LATITUDE LONGITUDE [YYYY-MM-DD [TIMEZONE]]]
//! ```
//!
//! Defaults to London, today, in `Europe/London`. Set `RUST_LOG=debug` to see why events
//! are missing, or `RUST_LOG=trace` for per-bucket scores.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use solunar::display::{percent, render_event, render_instant, stars, TimeFormat};
use solunar::{moon, sun, GeoCoordinate, Instant, SolunarDay};
use std::env;
use std::error::Error;

const LABEL_WIDTH: usize = 30;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let latitude: f64 = args.first().map_or(Ok(51.5), |s| s.parse())?;
    let longitude: f64 = args.get(1).map_or(Ok(-0.12), |s| s.parse())?;
    let tz: Tz = args
        .get(3)
        .map_or(Ok(chrono_tz::Europe::London), |s| s.parse())?;
    let date = match args.get(2) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")?,
        None => Utc::now().with_timezone(&tz).date_naive(),
    };

    let location = GeoCoordinate::new(latitude, longitude)?;
    let midnight = tz
        .from_local_datetime(&date.and_hms_opt(0, 0, 0).ok_or("invalid midnight")?)
        .earliest()
        .ok_or("local midnight does not exist in this time zone")?;
    let day = Instant::from_datetime(&midnight);
    let format = TimeFormat::TwentyFourHour;

    println!("Today");
    line("Location", &format!("{latitude:.4}, {longitude:.4} ({tz})"));
    line("Date", &date.format("%A %-d %B %Y").to_string());
    line("Day of year", &date.ordinal().to_string());
    line("Julian date", &format!("{:.2}", day.julian_date()));
    line("Modified Julian date", &format!("{:.2}", day.modified_julian_date()));
    println!();

    let times = sun::sun_times(location, day);
    println!("Sun");
    line("Sunrise", &render_event(times.sunrise(), &tz, format));
    line("Sunset", &render_event(times.sunset(), &tz, format));
    line("High noon", &render_instant(times.solar_noon(), &tz, format));
    line("Civil twilight starts", &render_event(times.civil().begins(), &tz, format));
    line("Civil twilight ends", &render_event(times.civil().ends(), &tz, format));
    line("Nautical twilight starts", &render_event(times.nautical().begins(), &tz, format));
    line("Nautical twilight ends", &render_event(times.nautical().ends(), &tz, format));
    line("Astronomical twilight starts", &render_event(times.astronomical().begins(), &tz, format));
    line("Astronomical twilight ends", &render_event(times.astronomical().ends(), &tz, format));
    println!();

    let state = moon::state(day.add_days(0.5));
    println!("Moon");
    line("Moon phase", &format!("{:.2} {}", state.phase(), state.phase_name()));
    line("Moon age", &format!("{:.1} days", state.age_days()));
    line("Moon distance", &format!("{:.0} km", state.distance_km()));
    line("Illuminated", &format!("{}%", percent(state.illuminated_fraction())));
    let events = moon::rises_and_sets(location, day, day.add_days(1.0))?;
    for rise in events.rises() {
        line("Moonrise", &render_instant(*rise, &tz, format));
    }
    for set in events.sets() {
        line("Moonset", &render_instant(*set, &tz, format));
    }
    println!();

    let solunar = SolunarDay::compute(location, day);
    println!("Solunar");
    line("Moon phase score", &format!("{}%", percent(solunar.phase_score())));
    line("Moon distance score", &format!("{}%", percent(solunar.distance_score())));
    println!();
    println!("Time  Sun        Moon       Combined");
    println!("====  ===        ====       ========");
    for sample in solunar.samples() {
        println!(
            "{} {} {} {}",
            render_instant(sample.start(), &tz, format),
            stars(sample.sun_score()),
            stars(sample.moon_score()),
            stars(sample.combined_score())
        );
    }
    println!();
    line("Solunar coincidence score", &format!("{}%", percent(solunar.coincidence_score())));
    let peaks: Vec<String> = solunar
        .peaks()
        .iter()
        .map(|peak| render_instant(*peak, &tz, format))
        .collect();
    line(
        "Solunar peak times",
        &if peaks.is_empty() { "none".to_string() } else { peaks.join(" ") },
    );
    line("Overall solunar score", &format!("{}%", percent(solunar.overall_score())));

    Ok(())
}

fn line(label: &str, value: &str) {
    println!("{:>width$}: {value}", label, width = LABEL_WIDTH);
}
