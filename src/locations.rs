use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, info};

use crate::dst::DstClock;
use crate::error::LocationError;
use crate::types::{DstRule, GeoLocation, LocationRecord};

pub const SENTINEL: char = '*';

const BUILTIN_TABLE: &[(&str, f64, f64, f64, DstRule)] = &[
    ("Helsinki", 60.16, 24.83, 2.0, DstRule::Eu),
    ("Riihimäki", 60.739, 24.772, 2.0, DstRule::Eu),
    ("Tampere", 61.498, 23.761, 2.0, DstRule::Eu),
    ("Ylöjärvi", 61.55, 23.583, 2.0, DstRule::Eu),
    ("Rovaniemi", 66.5, 25.733, 2.0, DstRule::Eu),
    ("Inari", 68.905, 27.03, 2.0, DstRule::Eu),
    ("Utsjoki", 69.9, 27.017, 2.0, DstRule::Eu),
    ("Tukholma", 59.329, 18.069, 1.0, DstRule::Eu),
    ("Stockholm", 59.329, 18.069, 1.0, DstRule::Eu),
    ("Vargön", 58.35, 12.4, 1.0, DstRule::Eu),
    ("Reykjavik", 64.135, -21.895, 0.0, DstRule::None),
    ("Longyearbyen", 78.22, 15.65, 1.0, DstRule::Eu),
    ("Tallinna", 59.437, 24.745, 2.0, DstRule::Eu),
    ("Tallinn", 59.437, 24.745, 2.0, DstRule::Eu),
    ("Moskova", 55.75, 37.617, 2.0, DstRule::Eu),
    ("Moscow", 55.75, 37.617, 2.0, DstRule::Eu),
    ("Lontoo", 51.5, -0.126, 0.0, DstRule::Eu),
    ("London", 51.5, -0.126, 0.0, DstRule::Eu),
    ("Hampuri", 53.553, 9.992, 1.0, DstRule::Eu),
    ("Hamburg", 53.553, 9.992, 1.0, DstRule::Eu),
    ("Rooma", 41.895, 12.482, 1.0, DstRule::Eu),
    ("Roma", 41.895, 12.482, 1.0, DstRule::Eu),
    ("Tokio", 35.683, 139.767, 9.0, DstRule::None),
    ("Tokyo", 35.683, 139.767, 9.0, DstRule::None),
    ("Teheran", 35.696, 51.423, 3.5, DstRule::None),
    ("Tehran", 35.696, 51.423, 3.5, DstRule::None),
];

static BUILTIN_LOCATIONS: LazyLock<Vec<LocationRecord>> = LazyLock::new(|| {
    BUILTIN_TABLE
        .iter()
        .map(|&(name, latitude, longitude, base_timezone, dst_rule)| LocationRecord {
            name: name.to_string(),
            latitude,
            longitude,
            base_timezone,
            dst_rule,
        })
        .collect()
});

pub fn builtin_locations() -> &'static [LocationRecord] {
    &BUILTIN_LOCATIONS
}

impl LocationRecord {
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub fn to_location(&self, clock: &DstClock) -> GeoLocation {
        let dst = match self.dst_rule {
            DstRule::Eu => clock.offset_hours() as f64,
            DstRule::None => 0.0,
        };
        GeoLocation::new(self.latitude, self.longitude, self.base_timezone + dst)
    }
}

pub fn parse_record_line(line: &str, line_no: usize) -> Result<LocationRecord, LocationError> {
    let malformed = |reason: String| LocationError::MalformedRecordLine {
        line: line_no,
        reason,
    };
    let mut fields = line.split_whitespace();
    let name = fields
        .next()
        .ok_or_else(|| malformed("empty line".to_string()))?;

    let mut number = |what: &str| -> Result<f64, LocationError> {
        let raw = fields
            .next()
            .ok_or_else(|| malformed(format!("missing {what}")))?;
        raw.parse::<f64>()
            .map_err(|_| malformed(format!("{what} '{raw}' is not a number")))
    };
    let latitude = number("latitude")?;
    let longitude = number("longitude")?;
    let base_timezone = number("timezone")?;
    let dst_rule = fields.next().map(DstRule::from_tag).unwrap_or_default();

    Ok(LocationRecord {
        name: name.to_string(),
        latitude,
        longitude,
        base_timezone,
        dst_rule,
    })
}

pub struct Records<R> {
    lines: io::Lines<R>,
    line_no: usize,
    done: bool,
}

pub fn records<R: BufRead>(reader: R) -> Records<R> {
    Records {
        lines: reader.lines(),
        line_no: 0,
        done: false,
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<LocationRecord, LocationError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;
            if line.contains(SENTINEL) {
                self.done = true;
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_record_line(&line, self.line_no));
        }
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationResolver {
    records: Vec<LocationRecord>,
}

impl LocationResolver {
    pub fn builtin_only() -> Self {
        Self::default()
    }

    /// Reads every well-formed record up to the sentinel. Malformed lines
    /// are dropped; a read error ends the list.
    pub fn from_reader<R: BufRead>(reader: R) -> Self {
        let mut list = Vec::new();
        for record in records(reader) {
            match record {
                Ok(record) => list.push(record),
                Err(e @ LocationError::MalformedRecordLine { .. }) => {
                    debug!("skipping record: {e}");
                }
                Err(e) => {
                    debug!("stopping record list: {e}");
                    break;
                }
            }
        }
        Self { records: list }
    }

    /// A missing file is not an error: only the built-in table is used.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LocationError> {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                let resolver = Self::from_reader(BufReader::new(file));
                debug!(
                    "loaded {} location records from {}",
                    resolver.records.len(),
                    path.display()
                );
                Ok(resolver)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no record list at {}, using built-in locations", path.display());
                Ok(Self::builtin_only())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn find(&self, name: &str) -> Result<&LocationRecord, LocationError> {
        if let Some(record) = self.records.iter().find(|r| r.matches(name)) {
            debug!("'{name}' found in record list");
            return Ok(record);
        }
        if let Some(record) = builtin_locations().iter().find(|r| r.matches(name)) {
            debug!("'{name}' found in built-in table");
            return Ok(record);
        }
        Err(LocationError::UnknownLocation(name.to_string()))
    }

    pub fn resolve(&self, name: &str) -> Result<GeoLocation, LocationError> {
        self.resolve_with_observer(name, None)
    }

    /// The DST rule reads the current hour as seen from `observer_timezone`,
    /// which also becomes the location's observer timezone. `None` means the
    /// observer shares the location's base timezone.
    pub fn resolve_with_observer(
        &self,
        name: &str,
        observer_timezone: Option<f64>,
    ) -> Result<GeoLocation, LocationError> {
        let record = self.find(name)?;
        let observer = observer_timezone.unwrap_or(record.base_timezone);
        let location = record.to_location(&DstClock::now(record.base_timezone, observer));
        let location = match observer_timezone {
            Some(tz) => location.with_observer_timezone(tz),
            None => location,
        };
        info!(
            "resolved {} to {:.3}, {:.3}, UTC{:+}",
            record.name, location.latitude, location.longitude, location.base_timezone
        );
        Ok(location)
    }

    pub fn resolve_at(&self, name: &str, clock: DstClock) -> Result<GeoLocation, LocationError> {
        Ok(self.find(name)?.to_location(&clock))
    }

    pub fn known_names(&self) -> Vec<String> {
        self.records
            .iter()
            .chain(builtin_locations())
            .map(|r| r.name.clone())
            .collect()
    }
}
