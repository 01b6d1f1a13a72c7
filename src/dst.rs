use chrono::{Datelike, Duration, Local, NaiveDate, Timelike, Weekday};

pub const TRANSITION_HOUR: u32 = 1;

pub fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let mut date = NaiveDate::from_ymd_opt(year, month, 31)?;
    while date.weekday() != Weekday::Sun {
        date = date.pred_opt()?;
    }
    Some(date)
}

pub fn european_dst_offset_hours(today: NaiveDate, local_hour: u32) -> i32 {
    let (Some(march), Some(october)) = (last_sunday(today.year(), 3), last_sunday(today.year(), 10))
    else {
        return 0;
    };

    let mut offset = 0;
    if today == march && local_hour > TRANSITION_HOUR {
        offset = 1;
    }
    if today > march {
        offset = 1;
    }
    if today == october && local_hour > TRANSITION_HOUR {
        offset = 0;
    }
    if today > october {
        offset = 0;
    }
    offset
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstClock {
    pub today: NaiveDate,
    pub hour: u32,
}

impl DstClock {
    pub fn new(today: NaiveDate, hour: u32) -> Self {
        Self { today, hour }
    }

    // observer's date, base-timezone hour
    pub fn now(base_timezone: f64, observer_timezone: f64) -> Self {
        let local = Local::now().naive_local();
        let shift_seconds = ((base_timezone - observer_timezone) * 3600.0).round() as i64;
        let shift = Duration::seconds(shift_seconds);
        Self {
            today: local.date(),
            hour: (local + shift).hour(),
        }
    }

    pub fn offset_hours(&self) -> i32 {
        european_dst_offset_hours(self.today, self.hour)
    }
}
