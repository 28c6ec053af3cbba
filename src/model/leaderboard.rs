use super::athlete::{Division, EventScore};
use super::event::EventId;

/// Wide-format row: one athlete with placement, score and differential per event
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: Option<u32>,
    pub athlete: String,
    pub points: Option<f64>,
    pub division: Division,
    /// Aligned with `LeaderboardTable::events`
    pub events: Vec<EventScore>,
}

/// Wide-format leaderboard for one or more divisions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderboardTable {
    pub events: Vec<EventId>,
    pub rows: Vec<LeaderboardRow>,
}

impl LeaderboardTable {
    pub fn new(events: Vec<EventId>) -> Self {
        Self {
            events,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating its event scores to the table's event count
    pub fn push(&mut self, mut row: LeaderboardRow) {
        row.events.resize(self.events.len(), EventScore::absent());
        self.rows.push(row);
    }

    /// Append all rows of another table with the same event columns
    pub fn extend(&mut self, other: LeaderboardTable) {
        for row in other.rows {
            self.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
