use crate::error::LeaderboardError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Event identifier of the form `E<n>`, ordered by ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u32);

impl EventId {
    pub fn new(ordinal: u32) -> Self {
        EventId(ordinal)
    }

    pub fn ordinal(&self) -> u32 {
        self.0
    }

    /// Parse `"E3"` (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('E').or_else(|| s.strip_prefix('e'))?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(EventId)
    }

    /// The first `count` event ids, E1 through E<count>
    pub fn sequence(count: usize) -> Vec<EventId> {
        (1..=count as u32).map(EventId).collect()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventId::parse(s).ok_or_else(|| LeaderboardError::InvalidEventId(s.to_string()))
    }
}

impl Serialize for EventId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Competition day. Declaration order is calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Day {
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fri" | "friday" => Some(Day::Friday),
            "sat" | "saturday" => Some(Day::Saturday),
            "sun" | "sunday" => Some(Day::Sunday),
            _ => None,
        }
    }

    pub fn from_date(date: NaiveDate) -> Option<Self> {
        use chrono::{Datelike, Weekday};
        match date.weekday() {
            Weekday::Fri => Some(Day::Friday),
            Weekday::Sat => Some(Day::Saturday),
            Weekday::Sun => Some(Day::Sunday),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Static description of one competition event
#[derive(Debug, Clone, PartialEq)]
pub struct EventMetadata {
    pub id: EventId,
    pub name: String,
    pub format: Option<String>,
    pub day: Option<Day>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    /// 1 (light) to 5 (hardest); absent when unknown
    pub intensity_level: Option<u8>,
    pub event_type: String,
    pub primary_muscles: Vec<String>,
    pub secondary_muscles: Vec<String>,
    pub movements: Vec<String>,
    pub time_cap_minutes: Option<u32>,
}

impl EventMetadata {
    pub fn new(id: EventId, name: &str, event_type: &str, intensity_level: u8) -> Self {
        Self {
            id,
            name: name.to_string(),
            format: None,
            day: None,
            date: None,
            time: None,
            intensity_level: Some(intensity_level),
            event_type: event_type.to_string(),
            primary_muscles: Vec::new(),
            secondary_muscles: Vec::new(),
            movements: Vec::new(),
            time_cap_minutes: None,
        }
    }

    pub fn with_day(mut self, day: Day) -> Self {
        self.day = Some(day);
        self
    }

    pub fn with_movements(mut self, movements: &[&str]) -> Self {
        self.movements = movements.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn with_time_cap(mut self, minutes: u32) -> Self {
        self.time_cap_minutes = Some(minutes);
        self
    }

    /// Number of distinct movements in the event
    pub fn movement_complexity(&self) -> usize {
        self.movements.len()
    }

    /// Time cap minutes multiplied by movement complexity; absent without a time cap
    pub fn fatigue_index(&self) -> Option<u32> {
        self.time_cap_minutes
            .map(|cap| cap * self.movement_complexity() as u32)
    }

    pub fn datetime(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(self.date?, self.time?))
    }
}

/// Event metadata keyed by event id; iteration is in ordinal order
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    events: Vec<EventMetadata>,
    index: HashMap<EventId, usize>,
}

impl EventTable {
    pub fn new(mut events: Vec<EventMetadata>) -> Self {
        events.sort_by_key(|e| e.id);
        events.dedup_by_key(|e| e.id);
        let index = events.iter().enumerate().map(|(i, e)| (e.id, i)).collect();
        Self { events, index }
    }

    pub fn get(&self, id: EventId) -> Option<&EventMetadata> {
        self.index.get(&id).map(|&i| &self.events[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventMetadata> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Highest intensity level present in the table; events without one are ignored
    pub fn max_intensity(&self) -> Option<u8> {
        self.events.iter().filter_map(|e| e.intensity_level).max()
    }

    /// Events whose intensity equals the observed maximum
    pub fn max_intensity_events(&self) -> Vec<EventId> {
        match self.max_intensity() {
            Some(max) => self
                .events
                .iter()
                .filter(|e| e.intensity_level == Some(max))
                .map(|e| e.id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Distinct event types in ordinal order of first appearance
    pub fn event_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for event in &self.events {
            if !types.contains(&event.event_type.as_str()) {
                types.push(&event.event_type);
            }
        }
        types
    }
}
