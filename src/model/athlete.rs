use crate::error::LeaderboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Competition category a leaderboard page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Division {
    Men,
    Women,
}

impl Division {
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "men" | "man" | "m" | "male" => Some(Division::Men),
            "women" | "woman" | "w" | "female" => Some(Division::Women),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Division::Men => "Men",
            Division::Women => "Women",
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Division {
    type Err = LeaderboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Division::from_label(s).ok_or_else(|| LeaderboardError::InvalidDivision(s.to_string()))
    }
}

/// One athlete row as extracted from a leaderboard page.
///
/// `events[i]` holds the raw score string for event ordinal `i + 1`
/// (`"<rank>: <fragment> | <fragment>"`), or `None` when the page had
/// fewer workout cells than expected. Rank and points are absent when the
/// page shows non-numeric text such as "WD" or "--".
#[derive(Debug, Clone, PartialEq)]
pub struct AthleteRecord {
    pub rank: Option<u32>,
    pub name: String,
    pub division: Division,
    pub points: Option<f64>,
    pub events: Vec<Option<String>>,
}

impl AthleteRecord {
    /// Raw score string for a 1-based event ordinal
    pub fn event(&self, ordinal: u32) -> Option<&str> {
        let idx = (ordinal as usize).checked_sub(1)?;
        self.events.get(idx).and_then(|e| e.as_deref())
    }
}

/// Decomposed per-event score: placement, free-text score and differential.
/// All three are absent when the raw string did not match the score pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventScore {
    pub placement: Option<u32>,
    pub score: Option<String>,
    pub delta: Option<String>,
}

impl EventScore {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn with_placement(placement: u32) -> Self {
        Self {
            placement: Some(placement),
            ..Self::default()
        }
    }

    pub fn is_absent(&self) -> bool {
        self.placement.is_none() && self.score.is_none() && self.delta.is_none()
    }
}
