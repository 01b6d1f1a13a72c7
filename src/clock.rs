use chrono::{Duration, NaiveDate, NaiveDateTime};
use log::debug;

use crate::lookup_table::{build_day_table, current_minute, DayTable};
use crate::types::{GeoLocation, SolarPosition, TwilightPhase, MINUTES_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockReading {
    pub minute: usize,
    /// Position of the solar time pointer around the dial, in [0, 1).
    pub dial_fraction: f64,
    pub sample: SolarPosition,
    pub phase: TwilightPhase,
}

fn to_base_time(location: &GeoLocation, observer_now: NaiveDateTime) -> NaiveDateTime {
    let shift = (location.base_timezone - location.observer_timezone) * 3600.0;
    observer_now + Duration::seconds(shift.round() as i64)
}

#[derive(Debug, Clone)]
pub struct SolarClock {
    location: GeoLocation,
    table: DayTable,
}

impl SolarClock {
    pub fn new(location: GeoLocation, today: NaiveDate) -> Self {
        Self {
            table: build_day_table(&location, today),
            location,
        }
    }

    /// Starts on the location's own date for the observer's wall clock.
    pub fn starting_at(location: GeoLocation, observer_now: NaiveDateTime) -> Self {
        let today = to_base_time(&location, observer_now).date();
        Self::new(location, today)
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    pub fn table(&self) -> &DayTable {
        &self.table
    }

    pub fn refresh(&mut self, today: NaiveDate) {
        let table = build_day_table(&self.location, today);
        self.table = table;
    }

    /// Converts the observer's wall clock to the location's base timezone.
    pub fn base_time(&self, observer_now: NaiveDateTime) -> NaiveDateTime {
        to_base_time(&self.location, observer_now)
    }

    pub fn reading(&self, observer_now: NaiveDateTime) -> ClockReading {
        let minute = current_minute(observer_now.time(), &self.location) % MINUTES_PER_DAY;
        let sample = self.table.samples()[minute];
        ClockReading {
            minute,
            dial_fraction: sample.true_solar_time / MINUTES_PER_DAY as f64,
            sample,
            phase: TwilightPhase::from_elevation(sample.corrected_elevation),
        }
    }

    pub fn tick(&mut self, observer_now: NaiveDateTime) -> ClockReading {
        let today = self.base_time(observer_now).date();
        debug!("refreshing day table for {today}");
        self.refresh(today);
        self.reading(observer_now)
    }
}
