use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::error::ParseError;
use crate::pipeline::parse::{parse_number, Parser, METERS_PER_MILE};
use crate::types::activity::ActivityRecord;

pub struct TcxParser;

/// Fields gathered while inside one `<Activity>`. Lap values keep the first
/// occurrence across the activity's laps.
#[derive(Default)]
struct ActivityBuilder {
    sport: Option<String>,
    id: Option<String>,
    distance_meters: Option<String>,
    total_time_seconds: Option<String>,
}

impl ActivityBuilder {
    fn finish(self) -> Result<ActivityRecord, ParseError> {
        let activity_type = self.sport.ok_or(ParseError::MissingField("Sport"))?;
        let timestamp = self.id.ok_or(ParseError::MissingField("Id"))?;
        let distance = self
            .distance_meters
            .ok_or(ParseError::MissingField("Lap/DistanceMeters"))?;
        let total_time = self
            .total_time_seconds
            .ok_or(ParseError::MissingField("Lap/TotalTimeSeconds"))?;

        Ok(ActivityRecord {
            timestamp,
            local_timestamp: None,
            activity_type,
            distance_miles: parse_number("DistanceMeters", &distance)? / METERS_PER_MILE,
            duration_minutes: parse_number("TotalTimeSeconds", &total_time)? / 60.0,
        })
    }
}

/// Element path from the root. Elements outside the root's namespace are
/// kept as `None` so they never match a TCX element name.
#[derive(Default)]
struct ElementPath {
    root_ns: Option<Option<Vec<u8>>>,
    names: Vec<Option<String>>,
}

impl ElementPath {
    fn push(&mut self, resolved: &ResolveResult, e: &BytesStart) -> Result<(), ParseError> {
        let ns = namespace_of(resolved)?;
        let root_ns = self.root_ns.get_or_insert_with(|| ns.clone());

        let name = if *root_ns == ns {
            let local = e.local_name();
            let local = std::str::from_utf8(local.as_ref())
                .map_err(|e| ParseError::InvalidTcx(e.to_string()))?;
            Some(local.to_string())
        } else {
            None
        };
        self.names.push(name);
        Ok(())
    }

    fn pop(&mut self) {
        self.names.pop();
    }

    /// True when the innermost elements are exactly `names`, outermost first.
    fn ends_with(&self, names: &[&str]) -> bool {
        if names.len() > self.names.len() {
            return false;
        }
        let tail = &self.names[self.names.len() - names.len()..];
        tail.iter()
            .zip(names)
            .all(|(actual, expected)| actual.as_deref() == Some(*expected))
    }
}

fn namespace_of(resolved: &ResolveResult) -> Result<Option<Vec<u8>>, ParseError> {
    match resolved {
        ResolveResult::Bound(Namespace(ns)) => Ok(Some(ns.to_vec())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ParseError::InvalidTcx(format!(
            "undeclared namespace prefix '{}'",
            String::from_utf8_lossy(prefix)
        ))),
    }
}

fn sport_attribute(e: &BytesStart) -> Result<Option<String>, ParseError> {
    let attr = e
        .try_get_attribute("Sport")
        .map_err(|e| ParseError::InvalidTcx(e.to_string()))?;
    attr.map(|attr| {
        attr.unescape_value()
            .map(|value| value.into_owned())
            .map_err(|e| ParseError::InvalidTcx(e.to_string()))
    })
    .transpose()
}

struct TcxState {
    path: ElementPath,
    current: Option<ActivityBuilder>,
    records: Vec<ActivityRecord>,
}

impl TcxState {
    fn open(&mut self, resolved: &ResolveResult, e: &BytesStart) -> Result<(), ParseError> {
        self.path.push(resolved, e)?;
        if self.path.ends_with(&["Activities", "Activity"]) {
            self.current = Some(ActivityBuilder {
                sport: sport_attribute(e)?,
                ..ActivityBuilder::default()
            });
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), ParseError> {
        let closing_activity = self.path.ends_with(&["Activities", "Activity"]);
        self.path.pop();
        if closing_activity {
            if let Some(builder) = self.current.take() {
                self.records.push(builder.finish()?);
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        let Some(builder) = self.current.as_mut() else {
            return;
        };

        let slot = if self.path.ends_with(&["Activity", "Id"]) {
            &mut builder.id
        } else if self.path.ends_with(&["Activity", "Lap", "DistanceMeters"]) {
            &mut builder.distance_meters
        } else if self.path.ends_with(&["Activity", "Lap", "TotalTimeSeconds"]) {
            &mut builder.total_time_seconds
        } else {
            return;
        };

        if slot.is_none() {
            *slot = Some(text.to_string());
        }
    }
}

impl Parser for TcxParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<ActivityRecord>, ParseError> {
        let mut reader = NsReader::from_reader(bytes);
        reader.trim_text(true);

        let mut state = TcxState {
            path: ElementPath::default(),
            current: None,
            records: Vec::new(),
        };
        let mut buf = Vec::new();

        loop {
            match reader.read_resolved_event_into(&mut buf) {
                Ok((resolved, Event::Start(e))) => state.open(&resolved, &e)?,
                Ok((resolved, Event::Empty(e))) => {
                    state.open(&resolved, &e)?;
                    state.close()?;
                }
                Ok((_, Event::End(_))) => state.close()?,
                Ok((_, Event::Text(e))) => {
                    let text = e
                        .unescape()
                        .map_err(|e| ParseError::InvalidTcx(e.to_string()))?;
                    state.text(&text);
                }
                Ok((_, Event::CData(e))) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|e| ParseError::InvalidTcx(e.to_string()))?;
                    state.text(text);
                }
                Ok((_, Event::Eof)) => break,
                Err(e) => return Err(ParseError::InvalidTcx(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if state.records.is_empty() {
            return Err(ParseError::EmptyFile);
        }

        Ok(state.records)
    }
}
