use serde::Deserialize;

use crate::error::ParseError;
use crate::pipeline::parse::{parse_number, Parser, METERS_PER_MILE};
use crate::types::activity::ActivityRecord;

const DISTANCE_METRIC: &str = "com.google.distance.delta";

pub struct JsonParser;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    fitness_activity: Option<String>,
    start_time: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    aggregate: Vec<AggregateMetric>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AggregateMetric {
    metric_name: String,
    float_value: Option<f64>,
}

impl Parser for JsonParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ActivityRecord>, ParseError> {
        let session: Session =
            serde_json::from_slice(bytes).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

        let activity_type = session
            .fitness_activity
            .ok_or(ParseError::MissingField("fitnessActivity"))?;
        let timestamp = session
            .start_time
            .ok_or(ParseError::MissingField("startTime"))?;
        let duration = session
            .duration
            .ok_or(ParseError::MissingField("duration"))?;

        let distance_meters = session
            .aggregate
            .iter()
            .find(|metric| metric.metric_name == DISTANCE_METRIC)
            .and_then(|metric| metric.float_value)
            .ok_or(ParseError::MissingField(DISTANCE_METRIC))?;

        Ok(vec![ActivityRecord {
            timestamp,
            local_timestamp: None,
            activity_type,
            distance_miles: distance_meters / METERS_PER_MILE,
            duration_minutes: duration_seconds(&duration)? / 60.0,
        }])
    }
}

/// Google Fit encodes durations as seconds with a trailing `s`, e.g. `"1234.5s"`.
fn duration_seconds(raw: &str) -> Result<f64, ParseError> {
    let seconds = raw
        .trim()
        .strip_suffix('s')
        .ok_or_else(|| ParseError::InvalidNumber {
            field: "duration",
            value: raw.to_string(),
        })?;
    parse_number("duration", seconds)
}
