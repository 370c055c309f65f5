mod json;
mod tcx;

use crate::error::ParseError;
use crate::types::activity::{ActivityRecord, FileFormat};

pub use json::JsonParser;
pub use tcx::TcxParser;

/// Divisor from meters to miles. Kept at 1609.0 so output matches earlier exports.
pub const METERS_PER_MILE: f64 = 1609.0;

pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ActivityRecord>, ParseError>;
}

pub fn parse(bytes: &[u8], format: FileFormat) -> Result<Vec<ActivityRecord>, ParseError> {
    match format {
        FileFormat::Json => JsonParser.parse(bytes),
        FileFormat::Tcx => TcxParser.parse(bytes),
    }
}

fn parse_number(field: &'static str, text: &str) -> Result<f64, ParseError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            field,
            value: text.to_string(),
        })
}
