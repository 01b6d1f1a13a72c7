use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("'{0}' is an unknown location")]
    UnknownLocation(String),

    #[error("malformed location record on line {line}: {reason}")]
    MalformedRecordLine { line: usize, reason: String },

    #[error("failed to read location records: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum InvocationError {
    #[error("expected 1 to 4 arguments, got {0}")]
    ArgumentCount(usize),

    #[error("invalid {field}: '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid {field}: {value} is outside -24..=24 hours")]
    InvalidTimezone { field: &'static str, value: f64 },
}
