use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

pub const MINUTES_PER_DAY: usize = 1440;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    /// Positive east.
    pub longitude: f64,
    /// Hours east of UTC, daylight saving already included.
    pub base_timezone: f64,
    /// The viewer's own timezone, only used to place wall-clock offsets.
    pub observer_timezone: f64,
}

impl GeoLocation {
    pub fn new(latitude: f64, longitude: f64, base_timezone: f64) -> Self {
        Self {
            latitude,
            longitude,
            base_timezone,
            observer_timezone: base_timezone,
        }
    }

    pub fn with_observer_timezone(self, observer_timezone: f64) -> Self {
        Self {
            observer_timezone,
            ..self
        }
    }
}

/// A calendar date plus the fraction of the day elapsed, in the location's
/// base timezone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moment {
    pub date: NaiveDate,
    pub day_fraction: f64,
}

impl Moment {
    pub fn new(date: NaiveDate, day_fraction: f64) -> Self {
        Self { date, day_fraction }
    }

    pub fn from_minute(date: NaiveDate, minute: usize) -> Self {
        Self {
            date,
            day_fraction: minute as f64 / MINUTES_PER_DAY as f64,
        }
    }
}

/// Angles in degrees, times in minutes unless the name says otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub julian_day: f64,
    pub true_longitude: f64,
    pub apparent_longitude: f64,
    pub radius_vector: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub equation_of_time: f64,
    pub sunrise_hour_angle: f64,
    pub solar_noon: f64,
    pub sunrise: f64,
    pub sunset: f64,
    pub day_length: f64,
    pub true_solar_time: f64,
    pub hour_angle: f64,
    pub zenith: f64,
    pub elevation: f64,
    pub refraction: f64,
    pub corrected_elevation: f64,
    pub azimuth: f64,
}

/// Sunrise, solar noon and sunset as fractions of the base-timezone day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    pub sunrise: f64,
    pub solar_noon: f64,
    pub sunset: f64,
    pub day_length_minutes: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwilightPhase {
    Day,
    LowSun,
    Civil,
    Nautical,
    Astronomical,
    Night,
}

impl TwilightPhase {
    pub fn from_elevation(corrected_elevation: f64) -> Self {
        match corrected_elevation {
            e if e >= 3.0 => Self::Day,
            e if e >= 0.0 => Self::LowSun,
            e if e >= -6.0 => Self::Civil,
            e if e >= -12.0 => Self::Nautical,
            e if e >= -18.0 => Self::Astronomical,
            _ => Self::Night,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::LowSun => "low sun",
            Self::Civil => "civil twilight",
            Self::Nautical => "nautical twilight",
            Self::Astronomical => "astronomical twilight",
            Self::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DstRule {
    #[default]
    None,
    Eu,
}

impl DstRule {
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("EU") {
            Self::Eu
        } else {
            Self::None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub base_timezone: f64,
    pub dst_rule: DstRule,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    pub record_file: PathBuf,
    pub refresh_interval: Duration,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            record_file: PathBuf::from("solar_clock.cnf"),
            refresh_interval: Duration::from_secs(5),
        }
    }
}
