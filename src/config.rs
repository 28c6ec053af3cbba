//! Configuration structures passed explicitly into extraction and analysis

use std::ops::RangeInclusive;

/// CSS selectors addressing the parts of a leaderboard page
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardSelectors {
    /// One element per athlete
    pub row: String,
    pub overall_rank: String,
    pub name: String,
    pub overall_points: String,
    /// One element per event, in event order
    pub workout_cell: String,
    pub workout_rank: String,
    /// Score fragments within a workout cell, joined with " | "
    pub workout_score: String,
}

impl Default for LeaderboardSelectors {
    fn default() -> Self {
        Self {
            row: ".embedded-leaderboard-item--body".to_string(),
            overall_rank: ".embedded-leaderboard-item__rank--overall".to_string(),
            name: ".embedded-leaderboard-item__name".to_string(),
            overall_points: ".embedded-leaderboard-item__score--overall".to_string(),
            workout_cell: ".embedded-leaderboard-item__cell--workout".to_string(),
            workout_rank: ".embedded-leaderboard-item__rank--workout".to_string(),
            workout_score: ".embedded-leaderboard-item__score--workout span".to_string(),
        }
    }
}

/// Colors and marker shapes assigned to event types for downstream charting
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub palette: Vec<String>,
    pub markers: Vec<String>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let palette = [
            "#AEC6CF", "#FFB347", "#B39EB5", "#FF6961", "#77DD77", "#F49AC2", "#CFCFC4",
            "#FDFD96", "#84B6F4", "#FDDB6D",
        ];
        let markers = ["o", "s", "D", "^", "p"];
        Self {
            palette: palette.iter().map(|c| c.to_string()).collect(),
            markers: markers.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Settings shared by extraction, reshaping and the metric aggregators
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Number of event slots expected per athlete
    pub event_slots: usize,
    /// Placements outside this range are dropped from the long table
    pub placement_range: RangeInclusive<u32>,
    /// Year used to resolve event dates given without one ("November 8")
    pub year: i32,
    pub selectors: LeaderboardSelectors,
    pub style: ChartStyle,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            event_slots: 9,
            placement_range: 1..=20,
            year: 2024,
            selectors: LeaderboardSelectors::default(),
            style: ChartStyle::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_event_slots(mut self, slots: usize) -> Self {
        self.event_slots = slots;
        self
    }

    pub fn with_max_placement(mut self, max: u32) -> Self {
        self.placement_range = 1..=max;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_selectors(mut self, selectors: LeaderboardSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn is_valid_placement(&self, placement: u32) -> bool {
        self.placement_range.contains(&placement)
    }
}
