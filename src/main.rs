use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use chrono::Local;
use clap::Parser;
use log::{info, LevelFilter};

use solar_clock::{
    day_fraction_to_time, ClockConfig, ClockReading, GeoLocation, Invocation, LocationError,
    LocationResolver, SolarClock, USAGE,
};

#[derive(Parser)]
#[command(
    name = "solar_clock",
    about = "Solar time, Sun elevation and azimuth for a location"
)]
struct Cli {
    /// `name [mytimezone]` or `latitude longitude timezone [mytimezone]`
    #[arg(allow_negative_numbers = true)]
    args: Vec<String>,
    /// Location record list
    #[arg(long)]
    records: Option<PathBuf>,
    /// Keep refreshing instead of printing once
    #[arg(long)]
    watch: bool,
    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn format_fraction(fraction: f64) -> String {
    day_fraction_to_time(fraction)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

fn print_reading(reading: &ClockReading) {
    let s = &reading.sample;
    let (h, m) = solar_clock::minutes_to_time(reading.minute as i32);
    println!(
        "{h:02}:{m:02}  solar {}  elevation {:+5.1}° ({:+5.1}° corrected, {})  azimuth {:3.0}°  sun longitude {:3.0}°",
        format_fraction(reading.dial_fraction),
        s.elevation,
        s.corrected_elevation,
        reading.phase.label(),
        s.azimuth,
        s.true_longitude.rem_euclid(360.0),
    );
}

fn resolve(
    invocation: Invocation,
    resolver: &LocationResolver,
) -> Result<GeoLocation, LocationError> {
    match invocation {
        Invocation::Named {
            name,
            observer_timezone,
        } => resolver.resolve_with_observer(&name, observer_timezone),
        Invocation::Coordinates {
            latitude,
            longitude,
            timezone,
            observer_timezone,
        } => Ok(GeoLocation::new(latitude, longitude, timezone)
            .with_observer_timezone(observer_timezone.unwrap_or(timezone))),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::builder().filter_level(LevelFilter::Debug).init();
    } else {
        env_logger::init();
    }

    let mut config = ClockConfig::default();
    if let Some(path) = cli.records {
        config.record_file = path;
    }

    let invocation = match Invocation::from_args(&cli.args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let resolver = match LocationResolver::from_file(&config.record_file) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let location = match resolve(invocation, &resolver) {
        Ok(location) => location,
        Err(e @ LocationError::UnknownLocation(_)) => {
            eprintln!("{e}.\n\n{USAGE}\n");
            eprintln!("Currently known locations are: {}", resolver.known_names().join(" "));
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut clock = SolarClock::starting_at(location, Local::now().naive_local());
    let day = clock.table().solar_day();
    println!(
        "{:.3}, {:.3}  UTC{:+}  sunrise {}  noon {}  sunset {}  daylight {:.0} min",
        location.latitude,
        location.longitude,
        location.base_timezone,
        format_fraction(day.sunrise),
        format_fraction(day.solar_noon),
        format_fraction(day.sunset),
        day.day_length_minutes,
    );

    loop {
        let reading = clock.tick(Local::now().naive_local());
        print_reading(&reading);
        if !cli.watch {
            return ExitCode::SUCCESS;
        }
        info!("next refresh in {:?}", config.refresh_interval);
        thread::sleep(config.refresh_interval);
    }
}
