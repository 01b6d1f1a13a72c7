use chrono::{NaiveDate, NaiveTime, Timelike};
use log::debug;

use crate::angles;
use crate::types::{GeoLocation, Moment, SolarDay, SolarPosition, MINUTES_PER_DAY};

pub fn minutes_to_time(total_minutes: i32) -> (i32, i32) {
    (total_minutes / 60, total_minutes % 60)
}

pub fn day_fraction_to_time(fraction: f64) -> Option<NaiveTime> {
    if !fraction.is_finite() {
        return None;
    }
    let seconds = (fraction.rem_euclid(1.0) * 86400.0).round() as u32 % 86400;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

/// Base-timezone minute of day for the observer's wall clock.
pub fn current_minute(observer_time: NaiveTime, location: &GeoLocation) -> usize {
    let shift = ((location.base_timezone - location.observer_timezone) * 3600.0).round() as i64;
    let seconds = (observer_time.num_seconds_from_midnight() as i64 + shift).rem_euclid(86400);
    (seconds / 60) as usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTable {
    date: NaiveDate,
    location: GeoLocation,
    samples: Vec<SolarPosition>,
}

impl DayTable {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn location(&self) -> &GeoLocation {
        &self.location
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[SolarPosition] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SolarPosition> {
        self.samples.iter()
    }

    pub fn sample(&self, minute: usize) -> Option<&SolarPosition> {
        self.samples.get(minute)
    }

    /// Index of the sample whose true solar time is circularly closest to
    /// `solar_minute`. The table is keyed by clock minute, so this scans.
    pub fn find_by_solar_time(&self, solar_minute: f64) -> Option<usize> {
        let day = MINUTES_PER_DAY as f64;
        let distance = |p: &SolarPosition| {
            let d = (p.true_solar_time - solar_minute).rem_euclid(day);
            d.min(day - d)
        };
        self.samples
            .iter()
            .enumerate()
            .filter(|(_, p)| p.true_solar_time.is_finite())
            .min_by(|(_, a), (_, b)| distance(*a).total_cmp(&distance(*b)))
            .map(|(i, _)| i)
    }

    // evaluated at clock noon
    pub fn solar_day(&self) -> SolarDay {
        let noon = &self.samples[MINUTES_PER_DAY / 2];
        SolarDay {
            sunrise: noon.sunrise,
            solar_noon: noon.solar_noon,
            sunset: noon.sunset,
            day_length_minutes: noon.day_length,
        }
    }
}

impl<'a> IntoIterator for &'a DayTable {
    type Item = &'a SolarPosition;
    type IntoIter = std::slice::Iter<'a, SolarPosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

pub fn build_day_table(location: &GeoLocation, today: NaiveDate) -> DayTable {
    let day_number = angles::day_number(today);
    let samples: Vec<SolarPosition> = (0..MINUTES_PER_DAY)
        .map(|minute| {
            let moment = Moment::from_minute(today, minute);
            angles::compute(
                location.latitude,
                location.longitude,
                location.base_timezone,
                day_number,
                moment.day_fraction,
            )
        })
        .collect();
    debug!("built day table for {today} ({} samples)", samples.len());

    DayTable {
        date: today,
        location: *location,
        samples,
    }
}
