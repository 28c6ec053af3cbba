//! Wide-to-long reshaping of leaderboard tables joined against event metadata

use crate::config::AnalysisConfig;
use crate::model::{
    Division, EventId, EventTable, LeaderboardTable, PlacementEntry, UnpivotedRow,
};
use std::collections::HashSet;

/// Unpivot per-event placement columns into one row per (athlete, event).
///
/// Produces exactly `rows x events` rows, in athlete order then event order.
pub fn unpivot(table: &LeaderboardTable) -> Vec<UnpivotedRow> {
    let mut rows = Vec::with_capacity(table.rows.len() * table.events.len());
    for row in &table.rows {
        for (slot, &event_id) in table.events.iter().enumerate() {
            rows.push(UnpivotedRow {
                athlete: row.athlete.clone(),
                division: row.division,
                event_id,
                placement: row.events.get(slot).and_then(|e| e.placement),
            });
        }
    }
    rows
}

/// Coerce a placement cell to an integer. Non-numeric, fractional and
/// negative values are absent.
pub fn coerce_placement(text: &str) -> Option<u32> {
    let value: f64 = text.trim().parse().ok()?;
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value as u32)
}

/// Long-format placement table: the shared input of every metric aggregator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    entries: Vec<PlacementEntry>,
}

impl LongTable {
    /// Unpivot, drop absent placements and those outside the configured
    /// range, then left-join event type, intensity and day from the metadata table.
    pub fn build(table: &LeaderboardTable, events: &EventTable, config: &AnalysisConfig) -> Self {
        let unpivoted = unpivot(table);
        let total = unpivoted.len();
        let mut missing_metadata: HashSet<EventId> = HashSet::new();

        let entries: Vec<PlacementEntry> = unpivoted
            .into_iter()
            .filter_map(|row| {
                let placement = row.placement.filter(|&p| config.is_valid_placement(p))?;
                let metadata = events.get(row.event_id);
                if metadata.is_none() && missing_metadata.insert(row.event_id) {
                    log::warn!("No event metadata for {}", row.event_id);
                }
                Some(PlacementEntry {
                    athlete: row.athlete,
                    division: row.division,
                    event_id: row.event_id,
                    event_type: metadata.map(|m| m.event_type.clone()),
                    intensity_level: metadata.and_then(|m| m.intensity_level),
                    day: metadata.and_then(|m| m.day),
                    placement,
                })
            })
            .collect();

        log::debug!(
            "Reshaped {} athlete/event pairs into {} valid placements",
            total,
            entries.len()
        );
        Self { entries }
    }

    pub fn from_entries(entries: Vec<PlacementEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlacementEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows belonging to one division, order preserved
    pub fn for_division(&self, division: Division) -> LongTable {
        LongTable {
            entries: self
                .entries
                .iter()
                .filter(|e| e.division == division)
                .cloned()
                .collect(),
        }
    }

    /// Distinct (athlete, division) pairs in order of first appearance
    pub fn athletes(&self) -> Vec<(&str, Division)> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert((e.athlete.as_str(), e.division)))
            .map(|e| (e.athlete.as_str(), e.division))
            .collect()
    }
}
