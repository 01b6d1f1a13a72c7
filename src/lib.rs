pub mod angles;
pub mod clock;
pub mod dst;
pub mod error;
pub mod invocation;
pub mod locations;
pub mod lookup_table;
pub mod types;

pub use angles::{
    angular_distance, atmospheric_refraction, compute, day_number, deg_to_rad, equation_of_time,
    hour_angle, normalize_angle, rad_to_deg, solar_azimuth, solar_declination, solar_position,
    solar_zenith_angle,
};

pub use clock::{ClockReading, SolarClock};

pub use dst::{european_dst_offset_hours, last_sunday, DstClock};

pub use error::{InvocationError, LocationError};

pub use invocation::{Invocation, USAGE};

pub use locations::{builtin_locations, parse_record_line, records, LocationResolver};

pub use lookup_table::{
    build_day_table, current_minute, day_fraction_to_time, minutes_to_time, DayTable,
};

pub use types::{
    ClockConfig, DstRule, GeoLocation, LocationRecord, Moment, SolarDay, SolarPosition,
    TwilightPhase, MINUTES_PER_DAY,
};
