#![cfg(all(feature = "std", feature = "chrono"))]

//! Test sunrise/sunset calculations against published almanac times.

use chrono::{DateTime, FixedOffset, Timelike};
use csv::ReaderBuilder;
use solunar::{sun, GeoCoordinate, Instant};
use std::error::Error;
use std::fs::File;

/// Almanac times are rounded to the minute and the ephemeris is low precision.
const TOLERANCE_MINUTES: i64 = 4;

#[derive(Debug)]
struct SunTestRecord {
    local_midnight: DateTime<FixedOffset>,
    latitude: f64,
    longitude: f64,
    expected_sunrise: String,
    expected_sunset: String,
}

impl SunTestRecord {
    fn from_csv_record(record: &csv::StringRecord) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            local_midnight: DateTime::parse_from_rfc3339(&record[0])?,
            latitude: record[1].parse()?,
            longitude: record[2].parse()?,
            expected_sunrise: record[3].to_string(),
            expected_sunset: record[4].to_string(),
        })
    }
}

fn minutes_of_day(hh_mm: &str) -> Result<i64, Box<dyn Error>> {
    let (hours, minutes) = hh_mm.split_once(':').ok_or("expected HH:MM")?;
    Ok(hours.parse::<i64>()? * 60 + minutes.parse::<i64>()?)
}

fn minute_difference(
    expected: &str,
    actual: &DateTime<FixedOffset>,
) -> Result<i64, Box<dyn Error>> {
    let actual = i64::from(actual.hour()) * 60 + i64::from(actual.minute());
    let diff = (actual - minutes_of_day(expected)?).rem_euclid(1440);
    Ok(diff.min(1440 - diff))
}

#[test]
fn test_sun_reference_data() -> Result<(), Box<dyn Error>> {
    let file = File::open("tests/data/sun_events.csv")?;
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(false)
        .from_reader(file);

    let mut count = 0;
    for result in reader.records() {
        let record = SunTestRecord::from_csv_record(&result?)?;
        let location = GeoCoordinate::new(record.latitude, record.longitude)?;
        let day = Instant::from_datetime(&record.local_midnight);
        let tz = record.local_midnight.timezone();

        let times = sun::sun_times(location, day);
        let sunrise = times.sunrise().clone()?.to_datetime(&tz)?;
        let sunset = times.sunset().clone()?.to_datetime(&tz)?;

        let rise_error = minute_difference(&record.expected_sunrise, &sunrise)?;
        let set_error = minute_difference(&record.expected_sunset, &sunset)?;
        assert!(
            rise_error <= TOLERANCE_MINUTES,
            "sunrise at {} for {:?}: got {}, expected {}",
            record.local_midnight,
            (record.latitude, record.longitude),
            sunrise.format("%H:%M"),
            record.expected_sunrise
        );
        assert!(
            set_error <= TOLERANCE_MINUTES,
            "sunset at {} for {:?}: got {}, expected {}",
            record.local_midnight,
            (record.latitude, record.longitude),
            sunset.format("%H:%M"),
            record.expected_sunset
        );

        // Both events fall on the requested local day
        assert_eq!(sunrise.date_naive(), record.local_midnight.date_naive());
        assert_eq!(sunset.date_naive(), record.local_midnight.date_naive());
        count += 1;
    }

    assert_eq!(count, 4);
    Ok(())
}
