use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};

use solar_clock::angles::{angular_distance, compute, day_number};
use solar_clock::lookup_table::*;
use solar_clock::types::*;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const HELSINKI_SUMMER: GeoLocation = GeoLocation {
    latitude: 60.16,
    longitude: 24.83,
    base_timezone: 3.0,
    observer_timezone: 3.0,
};

static HELSINKI_MIDSUMMER: LazyLock<DayTable> =
    LazyLock::new(|| build_day_table(&HELSINKI_SUMMER, date(2026, 6, 21)));

static TOKYO_WINTER: LazyLock<DayTable> = LazyLock::new(|| {
    build_day_table(&GeoLocation::new(35.683, 139.767, 9.0), date(2026, 12, 21))
});

// ── Time utilities ──

#[test]
fn test_known_time_conversions() {
    assert_eq!(minutes_to_time(0), (0, 0));
    assert_eq!(minutes_to_time(720), (12, 0));
    assert_eq!(minutes_to_time(1439), (23, 59));
    assert_eq!(minutes_to_time(390), (6, 30));
}

#[test]
fn test_day_fraction_to_time() {
    assert_eq!(day_fraction_to_time(0.5), NaiveTime::from_hms_opt(12, 0, 0));
    assert_eq!(day_fraction_to_time(0.25), NaiveTime::from_hms_opt(6, 0, 0));
    assert_eq!(day_fraction_to_time(1.25), NaiveTime::from_hms_opt(6, 0, 0));
    assert_eq!(day_fraction_to_time(-0.25), NaiveTime::from_hms_opt(18, 0, 0));
    assert_eq!(day_fraction_to_time(f64::NAN), None);
}

// ── Current minute ──

#[test]
fn test_current_minute_same_timezone() {
    let t = NaiveTime::from_hms_opt(13, 45, 30).unwrap();
    assert_eq!(current_minute(t, &HELSINKI_SUMMER), 13 * 60 + 45);
}

#[test]
fn test_current_minute_observer_offset() {
    let location = GeoLocation::new(35.683, 139.767, 9.0).with_observer_timezone(3.0);
    let t = NaiveTime::from_hms_opt(20, 10, 0).unwrap();
    // 20:10 in UTC+3 is 02:10 next day in UTC+9
    assert_eq!(current_minute(t, &location), 2 * 60 + 10);

    let west = GeoLocation::new(64.135, -21.895, 0.0).with_observer_timezone(3.5);
    let t = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
    assert_eq!(current_minute(t, &west), 21 * 60 + 30);
}

// ── Table shape ──

#[test]
fn test_table_has_one_sample_per_minute() {
    assert_eq!(HELSINKI_MIDSUMMER.len(), MINUTES_PER_DAY);
    assert_eq!(TOKYO_WINTER.len(), 1440);
    assert!(!HELSINKI_MIDSUMMER.is_empty());
    assert_eq!(HELSINKI_MIDSUMMER.date(), date(2026, 6, 21));
    assert_eq!(*HELSINKI_MIDSUMMER.location(), HELSINKI_SUMMER);
}

#[test]
fn test_index_is_clock_minute() {
    let dn = day_number(date(2026, 6, 21));
    for minute in [0usize, 1, 359, 720, 1000, 1439] {
        let expected = compute(60.16, 24.83, 3.0, dn, minute as f64 / 1440.0);
        assert_eq!(HELSINKI_MIDSUMMER.sample(minute), Some(&expected));
    }
    assert!(HELSINKI_MIDSUMMER.sample(1440).is_none());
}

#[test]
fn test_table_ranges() {
    for table in [&*HELSINKI_MIDSUMMER, &*TOKYO_WINTER] {
        for (i, s) in table.iter().enumerate() {
            assert!((0.0..360.0).contains(&s.azimuth), "minute {} azimuth {}", i, s.azimuth);
            assert!((-90.0..=90.0).contains(&s.elevation), "minute {} elevation {}", i, s.elevation);
            assert!((0.0..1440.0).contains(&s.true_solar_time), "minute {}", i);
        }
    }
}

#[test]
fn test_azimuth_continuous_between_minutes() {
    for table in [&*HELSINKI_MIDSUMMER, &*TOKYO_WINTER] {
        let samples = table.samples();
        for pair in samples.windows(2) {
            let step = angular_distance(pair[0].azimuth, pair[1].azimuth);
            assert!(step < 2.0, "azimuth jump {} -> {}", pair[0].azimuth, pair[1].azimuth);
        }
    }
}

#[test]
fn test_azimuth_continuous_through_solar_noon() {
    let samples = HELSINKI_MIDSUMMER.samples();
    let noon = samples
        .windows(2)
        .position(|w| w[0].hour_angle <= 0.0 && w[1].hour_angle > 0.0)
        .expect("solar noon inside the day");
    let (before, after) = (&samples[noon], &samples[noon + 1]);
    assert!(before.azimuth < 180.0 && after.azimuth > 180.0);
    assert!(angular_distance(before.azimuth, after.azimuth) < 1.0);
}

#[test]
fn test_solar_time_advances_one_minute_per_minute() {
    let samples = HELSINKI_MIDSUMMER.samples();
    for pair in samples.windows(2) {
        let step = (pair[1].true_solar_time - pair[0].true_solar_time).rem_euclid(1440.0);
        assert_approx!(step, 1.0, 0.01);
    }
}

// ── Solar time lookups ──

#[test]
fn test_find_by_solar_time() {
    let idx = HELSINKI_MIDSUMMER.find_by_solar_time(720.0).unwrap();
    let sample = HELSINKI_MIDSUMMER.sample(idx).unwrap();
    assert_approx!(sample.true_solar_time, 720.0, 0.5);
    // clock noon in summer time is well before solar noon here
    assert!(idx > 720);
}

#[test]
fn test_find_by_solar_time_wraps_midnight() {
    let idx = TOKYO_WINTER.find_by_solar_time(1439.9).unwrap();
    let tst = TOKYO_WINTER.sample(idx).unwrap().true_solar_time;
    assert!(tst > 1439.0 || tst < 0.5, "tst={}", tst);
}

#[test]
fn test_solar_day_summary() {
    let day = HELSINKI_MIDSUMMER.solar_day();
    assert_approx!(day.sunrise * 24.0, 3.91, 0.02);
    assert_approx!(day.sunset, 0.9516, 0.0005);
    assert_approx!(day.day_length_minutes, 1135.7, 0.2);
    assert!(day.sunrise < day.solar_noon && day.solar_noon < day.sunset);
}

#[test]
fn test_highest_sample_near_solar_noon() {
    let (idx, _) = HELSINKI_MIDSUMMER
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.elevation.total_cmp(&b.1.elevation))
        .unwrap();
    let noon_minute = HELSINKI_MIDSUMMER.solar_day().solar_noon * 1440.0;
    assert_approx!(idx as f64, noon_minute, 1.0);
}

#[test]
fn test_rebuilt_table_is_identical() {
    let again = build_day_table(&HELSINKI_SUMMER, date(2026, 6, 21));
    assert_eq!(again, *HELSINKI_MIDSUMMER);
}

#[test]
fn test_polar_night_twilight_only() {
    let table = build_day_table(&GeoLocation::new(78.22, 15.65, 1.0), date(2026, 12, 21));
    assert_eq!(table.len(), 1440);
    assert!(table.iter().all(|s| s.corrected_elevation < 0.0));
    assert!(table.solar_day().sunrise.is_nan());
}

#[test]
fn test_twilight_phases() {
    assert_eq!(TwilightPhase::from_elevation(10.0), TwilightPhase::Day);
    assert_eq!(TwilightPhase::from_elevation(3.0), TwilightPhase::Day);
    assert_eq!(TwilightPhase::from_elevation(1.0), TwilightPhase::LowSun);
    assert_eq!(TwilightPhase::from_elevation(-0.1), TwilightPhase::Civil);
    assert_eq!(TwilightPhase::from_elevation(-6.0), TwilightPhase::Civil);
    assert_eq!(TwilightPhase::from_elevation(-11.0), TwilightPhase::Nautical);
    assert_eq!(TwilightPhase::from_elevation(-17.0), TwilightPhase::Astronomical);
    assert_eq!(TwilightPhase::from_elevation(-30.0), TwilightPhase::Night);
}
