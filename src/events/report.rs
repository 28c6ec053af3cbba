//! Event-centric views: schedule with fatigue estimates, type distribution
//! per day, and the style mapping used to color event types in charts

use crate::config::ChartStyle;
use crate::model::{Day, EventId, EventTable};
use serde::Serialize;

/// Palette color and marker shape assigned to an event type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeStyle {
    #[serde(rename = "Event Type")]
    pub event_type: String,
    #[serde(rename = "Color")]
    pub color: Option<String>,
    #[serde(rename = "Marker")]
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventReportRow {
    #[serde(rename = "Event")]
    pub event_id: EventId,
    #[serde(rename = "Event Name")]
    pub name: String,
    #[serde(rename = "Day")]
    pub day: Option<Day>,
    #[serde(rename = "Datetime")]
    pub datetime: Option<String>,
    #[serde(rename = "Event Type")]
    pub event_type: String,
    #[serde(rename = "Intensity Level")]
    pub intensity_level: Option<u8>,
    #[serde(rename = "Movement Complexity")]
    pub movement_complexity: usize,
    #[serde(rename = "Time Cap Minutes")]
    pub time_cap_minutes: Option<u32>,
    #[serde(rename = "Fatigue Index")]
    pub fatigue_index: Option<u32>,
    #[serde(rename = "Color")]
    pub color: Option<String>,
    #[serde(rename = "Marker")]
    pub marker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDistributionRow {
    #[serde(rename = "Day")]
    pub day: Day,
    #[serde(rename = "Event Type")]
    pub event_type: String,
    #[serde(rename = "Count")]
    pub count: usize,
}

/// Assign colors and markers to event types in order of first appearance,
/// cycling through the palette and marker list.
pub fn style_mapping(events: &EventTable, style: &ChartStyle) -> Vec<TypeStyle> {
    events
        .event_types()
        .into_iter()
        .enumerate()
        .map(|(i, event_type)| TypeStyle {
            event_type: event_type.to_string(),
            color: cycle(&style.palette, i),
            marker: cycle(&style.markers, i),
        })
        .collect()
}

fn cycle(items: &[String], i: usize) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items[i % items.len()].clone())
    }
}

/// One row per event in schedule order; events without a date and time go
/// last, in ordinal order.
pub fn event_report(events: &EventTable, style: &ChartStyle) -> Vec<EventReportRow> {
    let styles = style_mapping(events, style);

    let mut scheduled: Vec<_> = events.iter().collect();
    scheduled.sort_by_key(|e| (e.datetime().is_none(), e.datetime(), e.id));

    scheduled
        .into_iter()
        .map(|event| {
            let type_style = styles.iter().find(|s| s.event_type == event.event_type);
            EventReportRow {
                event_id: event.id,
                name: event.name.clone(),
                day: event.day,
                datetime: event
                    .datetime()
                    .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string()),
                event_type: event.event_type.clone(),
                intensity_level: event.intensity_level,
                movement_complexity: event.movement_complexity(),
                time_cap_minutes: event.time_cap_minutes,
                fatigue_index: event.fatigue_index(),
                color: type_style.and_then(|s| s.color.clone()),
                marker: type_style.and_then(|s| s.marker.clone()),
            }
        })
        .collect()
}

/// Number of events of each type held on each day, ordered by day then type
pub fn event_type_distribution(events: &EventTable) -> Vec<TypeDistributionRow> {
    let mut rows: Vec<TypeDistributionRow> = Vec::new();
    for event in events.iter() {
        let Some(day) = event.day else {
            continue;
        };
        match rows
            .iter_mut()
            .find(|r| r.day == day && r.event_type == event.event_type)
        {
            Some(row) => row.count += 1,
            None => rows.push(TypeDistributionRow {
                day,
                event_type: event.event_type.clone(),
                count: 1,
            }),
        }
    }
    rows.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| a.event_type.cmp(&b.event_type)));
    rows
}
