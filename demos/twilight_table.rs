//! Sunrise, sunset and twilight boundaries at the December solstice across diverse locations.

use chrono::Utc;
use solunar::display::{render_event, render_instant, TimeFormat};
use solunar::{sun, GeoCoordinate, HorizonCrossings, Instant};

#[derive(Debug)]
struct City {
    name: &'static str,
    latitude: f64,
    longitude: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Cities from polar to equatorial latitudes in both hemispheres
    let cities = [
        City {
            name: "Longyearbyen, Norway (Arctic)",
            latitude: 78.22,
            longitude: 15.65,
        },
        City {
            name: "Anchorage, Alaska",
            latitude: 61.216667,
            longitude: -149.866667,
        },
        City {
            name: "Auckland, New Zealand",
            latitude: -36.840556,
            longitude: 174.74,
        },
        City {
            name: "Singapore",
            latitude: 1.283333,
            longitude: 103.833333,
        },
        City {
            name: "Brasília, Brazil",
            latitude: -15.8,
            longitude: -47.85,
        },
    ];

    let day = Instant::from_utc(2024, 12, 21, 0, 0, 0.0)?;

    for city in &cities {
        let location = GeoCoordinate::new(city.latitude, city.longitude)?;
        let times = sun::sun_times(location, day);

        println!("=== {} ===", city.name);
        println!("Coordinates: {:.2}°N, {:.2}°E", city.latitude, city.longitude);
        println!("Date: December 21, 2024 (UTC day)");
        println!(
            "Solar noon: {} UTC",
            render_instant(times.solar_noon(), &Utc, TimeFormat::TwentyFourHour)
        );
        println!();

        print_crossings("Sunrise/Sunset", times.official());
        print_crossings("Civil Twilight", times.civil());
        print_crossings("Nautical Twilight", times.nautical());
        print_crossings("Astronomical Twilight", times.astronomical());

        match times.daylight_hours() {
            Some(hours) => println!("Daylight: {hours:.2} h"),
            None => println!("Daylight: no sunrise/sunset"),
        }
        println!();
    }

    Ok(())
}

fn print_crossings(label: &str, crossings: &HorizonCrossings) {
    println!("{label}:");
    println!(
        "  Begin: {}",
        render_event(crossings.begins(), &Utc, TimeFormat::TwentyFourHour)
    );
    println!(
        "  End: {}",
        render_event(crossings.ends(), &Utc, TimeFormat::TwentyFourHour)
    );
    println!();
}
