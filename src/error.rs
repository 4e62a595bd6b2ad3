use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::field::FieldKind;

#[derive(thiserror::Error, Debug)]
pub enum CronError {
    #[error("Invalid {field} field: {token:?}")]
    InvalidToken { field: FieldKind, token: String },
    #[error("Expected five schedule fields, found {found}: {line:?}")]
    MissingFields { found: usize, line: String },
    #[error("Invalid timestamp {value:?}, expected YYYY-MM-DD HH:MM")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Time window starts after it ends: {earliest} > {latest}")]
    InvalidWindow {
        earliest: NaiveDateTime,
        latest: NaiveDateTime,
    },
    #[error("Year {0} is outside the supported range 0-9999")]
    YearOutOfRange(i32),
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<CronError>,
    },
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Failed to serialize timeline: {0}")]
    Json(#[from] serde_json::Error),
}
