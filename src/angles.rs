use chrono::{Datelike, NaiveDate};

use crate::types::{GeoLocation, Moment, SolarPosition};

pub const DAY_NUMBER_EPOCH_JD: f64 = 2415018.5;
pub const J2000: f64 = 2451545.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;
pub const SUNRISE_ZENITH: f64 = 90.833;
const CE_DAYS_1900: i32 = 693_596;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to the divisor for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_angle(a - b);
    d.min(360.0 - d)
}

// 1900-01-01 is day 2
pub fn day_number(date: NaiveDate) -> f64 {
    (date.num_days_from_ce() - CE_DAYS_1900) as f64 + 2.0
}

pub fn julian_day(day_number: f64, day_fraction: f64, timezone: f64) -> f64 {
    day_number + DAY_NUMBER_EPOCH_JD + day_fraction - timezone / 24.0
}

pub fn julian_century(jday: f64) -> f64 {
    (jday - J2000) / DAYS_PER_CENTURY
}

pub fn geom_mean_longitude(jcen: f64) -> f64 {
    (280.46646 + jcen * (36000.76983 + jcen * 0.0003032)) % 360.0
}

pub fn geom_mean_anomaly(jcen: f64) -> f64 {
    357.52911 + jcen * (35999.05029 - 0.0001537 * jcen)
}

pub fn orbit_eccentricity(jcen: f64) -> f64 {
    0.016708634 - jcen * (0.000042037 + 0.0000001267 * jcen)
}

pub fn equation_of_center(jcen: f64, mean_anomaly: f64) -> f64 {
    deg_to_rad(mean_anomaly).sin() * (1.914602 - jcen * (0.004817 + 0.000014 * jcen))
        + deg_to_rad(2.0 * mean_anomaly).sin() * (0.019993 - 0.000101 * jcen)
        + deg_to_rad(3.0 * mean_anomaly).sin() * 0.000289
}

pub fn radius_vector(eccentricity: f64, true_anomaly: f64) -> f64 {
    (1.000001018 * (1.0 - eccentricity * eccentricity))
        / (1.0 + eccentricity * deg_to_rad(true_anomaly).cos())
}

fn ascending_node(jcen: f64) -> f64 {
    125.04 - 1934.136 * jcen
}

pub fn apparent_longitude(jcen: f64, true_longitude: f64) -> f64 {
    true_longitude - 0.00569 - 0.00478 * deg_to_rad(ascending_node(jcen)).sin()
}

pub fn mean_obliquity(jcen: f64) -> f64 {
    23.0 + (26.0 + (21.448 - jcen * (46.815 + jcen * (0.00059 - jcen * 0.001813))) / 60.0)
        / 60.0
}

pub fn corrected_obliquity(jcen: f64, mean_obliquity: f64) -> f64 {
    mean_obliquity + 0.00256 * deg_to_rad(ascending_node(jcen)).cos()
}

pub fn right_ascension(apparent_longitude: f64, obliquity: f64) -> f64 {
    let lambda = deg_to_rad(apparent_longitude);
    rad_to_deg((deg_to_rad(obliquity).cos() * lambda.sin()).atan2(lambda.cos()))
}

pub fn solar_declination(apparent_longitude: f64, obliquity: f64) -> f64 {
    rad_to_deg((deg_to_rad(obliquity).sin() * deg_to_rad(apparent_longitude).sin()).asin())
}

pub fn equation_of_time(
    mean_longitude: f64,
    mean_anomaly: f64,
    eccentricity: f64,
    obliquity: f64,
) -> f64 {
    let half = deg_to_rad(obliquity / 2.0).tan();
    let var_y = half * half;
    let l = deg_to_rad(mean_longitude);
    let m = deg_to_rad(mean_anomaly);
    4.0 * rad_to_deg(
        var_y * (2.0 * l).sin() - 2.0 * eccentricity * m.sin()
            + 4.0 * eccentricity * var_y * m.sin() * (2.0 * l).cos()
            - 0.5 * var_y * var_y * (4.0 * l).sin()
            - 1.25 * eccentricity * eccentricity * (2.0 * m).sin(),
    )
}

pub fn sunrise_hour_angle(latitude: f64, declination: f64) -> f64 {
    let lat = deg_to_rad(latitude);
    let dec = deg_to_rad(declination);
    rad_to_deg(
        (deg_to_rad(SUNRISE_ZENITH).cos() / (lat.cos() * dec.cos()) - lat.tan() * dec.tan())
            .acos(),
    )
}

pub fn solar_noon(longitude: f64, equation_of_time: f64, timezone: f64) -> f64 {
    (720.0 - 4.0 * longitude - equation_of_time + timezone * 60.0) / 1440.0
}

// sign-preserving remainder, in (-1440, 1440)
pub fn solar_minutes(
    day_fraction: f64,
    equation_of_time: f64,
    longitude: f64,
    timezone: f64,
) -> f64 {
    (day_fraction * 1440.0 + equation_of_time + 4.0 * longitude - 60.0 * timezone) % 1440.0
}

pub fn true_solar_time(solar_minutes: f64) -> f64 {
    let wrapped = solar_minutes.rem_euclid(1440.0);
    if wrapped >= 1440.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn hour_angle(solar_minutes: f64) -> f64 {
    let quarter = solar_minutes / 4.0;
    if quarter < 0.0 {
        quarter + 180.0
    } else {
        quarter - 180.0
    }
}

pub fn solar_zenith_angle(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let dec_rad = deg_to_rad(declination);
    let ha_rad = deg_to_rad(hour_angle);
    // no clamp: NaN near the poles
    let cos_zenith = lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * ha_rad.cos();
    rad_to_deg(cos_zenith.acos())
}

pub fn solar_altitude(zenith_angle: f64) -> f64 {
    90.0 - zenith_angle
}

pub fn atmospheric_refraction(elevation: f64) -> f64 {
    let arc_seconds = if elevation > 85.0 {
        0.0
    } else if elevation > 5.0 {
        let t = deg_to_rad(elevation).tan();
        58.1 / t - 0.07 / t.powi(3) + 0.000086 / t.powi(5)
    } else if elevation > -0.575 {
        1735.0
            + elevation * (-518.2 + elevation * (103.4 + elevation * (-12.79 + elevation * 0.711)))
    } else {
        -20.772 / deg_to_rad(elevation).tan()
    };
    arc_seconds / 3600.0
}

pub fn solar_azimuth(latitude: f64, declination: f64, zenith: f64, hour_angle: f64) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let zen_rad = deg_to_rad(zenith);
    let cos_arg = (lat_rad.sin() * zen_rad.cos() - deg_to_rad(declination).sin())
        / (lat_rad.cos() * zen_rad.sin());
    let angle = rad_to_deg(cos_arg.acos());
    if hour_angle > 0.0 {
        (angle + 180.0) % 360.0
    } else {
        (540.0 - angle) % 360.0
    }
}

pub fn compute(
    latitude: f64,
    longitude: f64,
    timezone: f64,
    day_number: f64,
    day_fraction: f64,
) -> SolarPosition {
    let jday = julian_day(day_number, day_fraction, timezone);
    let jcen = julian_century(jday);

    let mean_long = geom_mean_longitude(jcen);
    let mean_anom = geom_mean_anomaly(jcen);
    let eccent = orbit_eccentricity(jcen);
    let center = equation_of_center(jcen, mean_anom);

    let true_long = mean_long + center;
    let true_anom = mean_anom + center;
    let app_long = apparent_longitude(jcen, true_long);
    let obliquity = corrected_obliquity(jcen, mean_obliquity(jcen));
    let decl = solar_declination(app_long, obliquity);
    let eot = equation_of_time(mean_long, mean_anom, eccent, obliquity);

    let ha_rise = sunrise_hour_angle(latitude, decl);
    let noon = solar_noon(longitude, eot, timezone);

    let raw_solar = solar_minutes(day_fraction, eot, longitude, timezone);
    let ha = hour_angle(raw_solar);
    let zenith = solar_zenith_angle(latitude, decl, ha);
    let elevation = solar_altitude(zenith);
    let refraction = atmospheric_refraction(elevation);

    SolarPosition {
        julian_day: jday,
        true_longitude: true_long,
        apparent_longitude: app_long,
        radius_vector: radius_vector(eccent, true_anom),
        right_ascension: right_ascension(app_long, obliquity),
        declination: decl,
        equation_of_time: eot,
        sunrise_hour_angle: ha_rise,
        solar_noon: noon,
        sunrise: noon - ha_rise * 4.0 / 1440.0,
        sunset: noon + ha_rise * 4.0 / 1440.0,
        day_length: 8.0 * ha_rise,
        true_solar_time: true_solar_time(raw_solar),
        hour_angle: ha,
        zenith,
        elevation,
        refraction,
        corrected_elevation: elevation + refraction,
        azimuth: solar_azimuth(latitude, decl, zenith, ha),
    }
}

pub fn solar_position(location: &GeoLocation, moment: &Moment) -> SolarPosition {
    compute(
        location.latitude,
        location.longitude,
        location.base_timezone,
        day_number(moment.date),
        moment.day_fraction,
    )
}
