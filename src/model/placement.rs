use super::athlete::Division;
use super::event::{Day, EventId};
use serde::Serialize;

/// Long-format row before filtering: one per (athlete, event) pair
#[derive(Debug, Clone, PartialEq)]
pub struct UnpivotedRow {
    pub athlete: String,
    pub division: Division,
    pub event_id: EventId,
    pub placement: Option<u32>,
}

/// Long-format row with a valid placement, joined against event metadata.
/// Metadata columns are absent when the event id had no metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementEntry {
    #[serde(rename = "Athlete")]
    pub athlete: String,
    #[serde(rename = "Division")]
    pub division: Division,
    #[serde(rename = "Event_ID")]
    pub event_id: EventId,
    #[serde(rename = "Event Type")]
    pub event_type: Option<String>,
    #[serde(rename = "Intensity Level")]
    pub intensity_level: Option<u8>,
    #[serde(rename = "Day")]
    pub day: Option<Day>,
    #[serde(rename = "Placement")]
    pub placement: u32,
}
