use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::TimezoneError;

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S:%6f";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

pub fn resolve_zone(name: &str) -> Result<Tz, TimezoneError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TimezoneError::UnknownZone(name.to_string()))
}

/// Parses `timestamp` and renders it in `zone` as `YYYY-MM-DDTHH:MM:SS:ffffff`.
///
/// Timestamps without an offset are taken as UTC.
pub fn to_local(timestamp: &str, zone: Tz) -> Result<String, TimezoneError> {
    let utc = parse_timestamp(timestamp)?;
    Ok(utc.with_timezone(&zone).format(LOCAL_FORMAT).to_string())
}

pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>, TimezoneError> {
    let trimmed = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimezoneError::InvalidTimestamp(timestamp.to_string()))
}
