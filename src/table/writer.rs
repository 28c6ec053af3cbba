use crate::error::Result;
use crate::events::{EventRecord, EventReportRow, TypeDistributionRow};
use crate::model::{
    ClutchScore, ConsistencyScore, EventTable, LeaderboardTable, PlacementEntry,
    SpecializationRow, SpecializationSummary, TrendRow, TrendTotal, VersatilityScore,
};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Create `dir` (and its parents) if it doesn't exist
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
        log::info!("Created directory: {}", dir.display());
    }
    Ok(())
}

/// Create the parent directory of a file path if needed
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

fn leaderboard_headers(table: &LeaderboardTable) -> Vec<String> {
    let mut headers: Vec<String> = ["Rank", "Athlete", "Points", "Division"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    for id in &table.events {
        headers.push(format!("{}_Placement", id));
        headers.push(format!("{}_Score", id));
        headers.push(format!("{}_ScoreDelta", id));
    }
    headers
}

/// Write the wide leaderboard: one row per athlete, three columns per event
pub fn write_leaderboard_csv<W: Write>(table: &LeaderboardTable, writer: W) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(leaderboard_headers(table))?;

    for row in &table.rows {
        let mut record = vec![
            row.rank.map(|r| r.to_string()).unwrap_or_default(),
            row.athlete.clone(),
            row.points.map(|p| p.to_string()).unwrap_or_default(),
            row.division.to_string(),
        ];
        for score in &row.events {
            record.push(score.placement.map(|p| p.to_string()).unwrap_or_default());
            record.push(score.score.clone().unwrap_or_default());
            record.push(score.delta.clone().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_leaderboard_file(table: &LeaderboardTable, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path)?;
    write_leaderboard_csv(table, file)
}

/// A row type written to CSV. `HEADERS` lists the serialized field names in
/// order, so a file with no rows still carries its header.
pub trait CsvRow: Serialize {
    const HEADERS: &'static [&'static str];
}

impl CsvRow for PlacementEntry {
    const HEADERS: &'static [&'static str] = &[
        "Athlete",
        "Division",
        "Event_ID",
        "Event Type",
        "Intensity Level",
        "Day",
        "Placement",
    ];
}

impl CsvRow for ConsistencyScore {
    const HEADERS: &'static [&'static str] =
        &["Athlete", "Division", "Events", "Consistency Score"];
}

impl CsvRow for TrendRow {
    const HEADERS: &'static [&'static str] =
        &["Athlete", "Division", "Day", "Placement", "Placement Change"];
}

impl CsvRow for TrendTotal {
    const HEADERS: &'static [&'static str] =
        &["Athlete", "Division", "Days", "Total Placement Change"];
}

impl CsvRow for SpecializationRow {
    const HEADERS: &'static [&'static str] =
        &["Athlete", "Division", "Event Type", "Average Placement"];
}

impl CsvRow for VersatilityScore {
    const HEADERS: &'static [&'static str] =
        &["Athlete", "Division", "Event Types", "Versatility Score"];
}

impl CsvRow for SpecializationSummary {
    const HEADERS: &'static [&'static str] =
        &["Athlete", "Division", "Average Placement", "Versatility Score"];
}

impl CsvRow for ClutchScore {
    const HEADERS: &'static [&'static str] =
        &["Athlete", "Division", "Events", "Clutch Placement"];
}

impl CsvRow for EventReportRow {
    const HEADERS: &'static [&'static str] = &[
        "Event",
        "Event Name",
        "Day",
        "Datetime",
        "Event Type",
        "Intensity Level",
        "Movement Complexity",
        "Time Cap Minutes",
        "Fatigue Index",
        "Color",
        "Marker",
    ];
}

impl CsvRow for TypeDistributionRow {
    const HEADERS: &'static [&'static str] = &["Day", "Event Type", "Count"];
}

impl CsvRow for EventRecord {
    const HEADERS: &'static [&'static str] = &[
        "Event",
        "Event Name",
        "Format",
        "Day",
        "Date",
        "Time",
        "Intensity Level",
        "Event Type",
        "Primary Muscles",
        "Secondary Muscles",
        "Movements",
        "Time Cap",
    ];
}

/// Serialize rows to a CSV file under a header row; returns the row count
pub fn write_rows_file<T: CsvRow>(rows: &[T], path: &Path) -> Result<usize> {
    ensure_parent_dir(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

/// Write event metadata as CSV, readable again by `read_events_csv`
pub fn write_events_file(events: &EventTable, path: &Path) -> Result<usize> {
    let records: Vec<EventRecord> = events.iter().map(EventRecord::from_metadata).collect();
    write_rows_file(&records, path)
}
