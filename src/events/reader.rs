//! Event metadata loading from JSON (keyed by event id) or CSV

use crate::error::{LeaderboardError, Result};
use crate::model::{Day, EventId, EventMetadata, EventTable};
use chrono::{NaiveDate, NaiveTime};
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, digit1, space0},
    combinator::{map_res, opt},
    IResult, Parser,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Event fields as they appear in the metadata JSON values and CSV rows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventRecord {
    /// Only present in CSV rows; JSON carries the id as the object key
    #[serde(rename = "Event", default)]
    pub event: Option<String>,
    #[serde(rename = "Event Name")]
    pub name: String,
    #[serde(rename = "Format", default)]
    pub format: Option<String>,
    #[serde(rename = "Day", default)]
    pub day: Option<String>,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    #[serde(rename = "Time", default)]
    pub time: Option<String>,
    #[serde(rename = "Intensity Level", default)]
    pub intensity_level: Option<u8>,
    #[serde(rename = "Event Type")]
    pub event_type: String,
    #[serde(rename = "Primary Muscles", default)]
    pub primary_muscles: Option<String>,
    #[serde(rename = "Secondary Muscles", default)]
    pub secondary_muscles: Option<String>,
    #[serde(rename = "Movements", default)]
    pub movements: Option<String>,
    #[serde(rename = "Time Cap", default)]
    pub time_cap: Option<String>,
}

impl EventRecord {
    /// Convert to metadata, resolving year-less dates against `year`.
    /// Missing or unreadable fields are dropped with a warning.
    pub fn into_metadata(self, id: EventId, year: i32) -> EventMetadata {
        let intensity_level = match self.intensity_level {
            Some(level) if (1..=5).contains(&level) => Some(level),
            Some(level) => {
                log::warn!("{}: intensity level {} outside 1-5", id, level);
                None
            }
            None => {
                log::warn!("{}: no intensity level", id);
                None
            }
        };

        let date = self.date.as_deref().and_then(|d| {
            let parsed = parse_event_date(d, year);
            if parsed.is_none() {
                log::warn!("{}: unreadable date '{}'", id, d);
            }
            parsed
        });

        let time = self.time.as_deref().and_then(|t| {
            let parsed = parse_event_time(t);
            if parsed.is_none() {
                log::warn!("{}: unreadable time '{}'", id, t);
            }
            parsed
        });

        let day = match self.day.as_deref() {
            Some(d) => {
                let parsed = Day::from_name(d);
                if parsed.is_none() {
                    log::warn!("{}: unknown competition day '{}'", id, d);
                }
                parsed
            }
            None => date.and_then(Day::from_date),
        };

        let time_cap_minutes = self.time_cap.as_deref().and_then(parse_time_cap);

        EventMetadata {
            id,
            name: self.name,
            format: self.format,
            day,
            date,
            time,
            intensity_level,
            event_type: self.event_type,
            primary_muscles: split_list(self.primary_muscles.as_deref()),
            secondary_muscles: split_list(self.secondary_muscles.as_deref()),
            movements: split_list(self.movements.as_deref()),
            time_cap_minutes,
        }
    }

    /// Flatten metadata back into its record form (ISO date, 24h time)
    pub fn from_metadata(event: &EventMetadata) -> Self {
        Self {
            event: Some(event.id.to_string()),
            name: event.name.clone(),
            format: event.format.clone(),
            day: event.day.map(|d| d.name().to_string()),
            date: event.date.map(|d| d.format("%Y-%m-%d").to_string()),
            time: event.time.map(|t| t.format("%H:%M").to_string()),
            intensity_level: event.intensity_level,
            event_type: event.event_type.clone(),
            primary_muscles: join_list(&event.primary_muscles),
            secondary_muscles: join_list(&event.secondary_muscles),
            movements: join_list(&event.movements),
            time_cap: Some(match event.time_cap_minutes {
                Some(minutes) => format!("{} minutes", minutes),
                None => "No Time Cap".to_string(),
            }),
        }
    }
}

/// Parse the metadata JSON document: an object keyed by `"E<n>"`
pub fn read_events_json(content: &str, year: i32) -> Result<EventTable> {
    let raw: BTreeMap<String, EventRecord> = serde_json::from_str(content)?;
    let mut events = Vec::with_capacity(raw.len());
    for (key, record) in raw {
        let id: EventId = key.parse()?;
        events.push(record.into_metadata(id, year));
    }
    Ok(EventTable::new(events))
}

/// Parse metadata CSV with an `Event` id column
pub fn read_events_csv(content: &str, year: i32) -> Result<EventTable> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let mut events = Vec::new();
    for result in reader.deserialize() {
        let record: EventRecord = result?;
        let key = record
            .event
            .clone()
            .ok_or_else(|| LeaderboardError::EventMetadata("row without Event id".to_string()))?;
        let id: EventId = key.parse()?;
        events.push(record.into_metadata(id, year));
    }
    Ok(EventTable::new(events))
}

/// Read event metadata, choosing the format by file extension
pub fn read_events_file(path: &Path, year: i32) -> Result<EventTable> {
    let content = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "json" => read_events_json(&content, year),
        "csv" => read_events_csv(&content, year),
        _ => Err(LeaderboardError::EventMetadata(format!(
            "unsupported event metadata format: {}",
            path.display()
        ))),
    }
}

/// Accepts ISO dates or month-day dates such as "November 8"
fn parse_event_date(text: &str, year: i32) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{} {}", text, year), "%B %d %Y"))
        .or_else(|_| NaiveDate::parse_from_str(&format!("{} {}", text, year), "%b %d %Y"))
        .ok()
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>()).parse(input)
}

/// Parse "a.m." / "pm" style meridiem markers; true for afternoon
fn meridiem(input: &str) -> IResult<&str, bool> {
    let (input, marker) = alt((
        tag_no_case("a.m."),
        tag_no_case("am"),
        tag_no_case("p.m."),
        tag_no_case("pm"),
    ))
    .parse(input)?;
    Ok((input, marker.to_lowercase().starts_with('p')))
}

/// Parse "12:30 p.m. GMT", "9:05am" or "14:45"; a trailing zone name is ignored
fn clock_time(input: &str) -> IResult<&str, (u32, u32, Option<bool>)> {
    let (input, _) = space0.parse(input)?;
    let (input, hour) = number(input)?;
    let (input, _) = char(':').parse(input)?;
    let (input, minute) = number(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, pm) = opt(meridiem).parse(input)?;
    Ok((input, (hour, minute, pm)))
}

fn parse_event_time(text: &str) -> Option<NaiveTime> {
    let (_, (hour, minute, pm)) = clock_time(text).ok()?;
    let hour = match pm {
        Some(_) if hour == 0 || hour > 12 => return None,
        Some(true) if hour < 12 => hour + 12,
        Some(false) if hour == 12 => 0,
        _ => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse "<n> minutes" / "<n> min"
fn minutes(input: &str) -> IResult<&str, u32> {
    let (input, _) = space0.parse(input)?;
    let (input, value) = number(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, _) = alt((tag_no_case("minutes"), tag_no_case("minute"), tag_no_case("min")))
        .parse(input)?;
    Ok((input, value))
}

/// Time cap in minutes; "No Time Cap" and anything unreadable is absent
fn parse_time_cap(text: &str) -> Option<u32> {
    minutes(text).ok().map(|(_, value)| value)
}

fn split_list(text: Option<&str>) -> Vec<String> {
    text.map(|t| {
        t.split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

fn join_list(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}
