use crate::error::InvocationError;

pub const USAGE: &str = "\
Use: solar_clock latitude longitude timezone [mytimezone]
Or:  solar_clock locationname [mytimezone]

Longitude is positive east, timezone must include the daylight saving time.";

/// The accepted positional argument forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Named {
        name: String,
        observer_timezone: Option<f64>,
    },
    Coordinates {
        latitude: f64,
        longitude: f64,
        timezone: f64,
        observer_timezone: Option<f64>,
    },
}

fn number(field: &'static str, value: &str) -> Result<f64, InvocationError> {
    value.parse().map_err(|_| InvocationError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn timezone(field: &'static str, value: &str) -> Result<f64, InvocationError> {
    let hours = number(field, value)?;
    if !hours.is_finite() || hours.abs() > 24.0 {
        return Err(InvocationError::InvalidTimezone { field, value: hours });
    }
    Ok(hours)
}

impl Invocation {
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, InvocationError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match args.as_slice() {
            [name] => Ok(Self::Named {
                name: name.to_string(),
                observer_timezone: None,
            }),
            [name, observer] => Ok(Self::Named {
                name: name.to_string(),
                observer_timezone: Some(timezone("observer timezone", observer)?),
            }),
            [lat, lon, tz, rest @ ..] if rest.len() <= 1 => Ok(Self::Coordinates {
                latitude: number("latitude", lat)?,
                longitude: number("longitude", lon)?,
                timezone: timezone("timezone", tz)?,
                observer_timezone: rest
                    .first()
                    .map(|o| timezone("observer timezone", o))
                    .transpose()?,
            }),
            other => Err(InvocationError::ArgumentCount(other.len())),
        }
    }
}
