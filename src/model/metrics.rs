//! Result rows produced by the metric aggregators. Lower placements are better,
//! so lower values are better for every metric here.

use super::athlete::Division;
use super::event::Day;
use serde::Serialize;

/// Sample standard deviation of an athlete's placements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyScore {
    #[serde(rename = "Athlete")]
    pub athlete: String,
    #[serde(rename = "Division")]
    pub division: Division,
    #[serde(rename = "Events")]
    pub events: usize,
    /// Absent with fewer than two valid placements
    #[serde(rename = "Consistency Score")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecializationRow {
    #[serde(rename = "Athlete")]
    pub athlete: String,
    #[serde(rename = "Division")]
    pub division: Division,
    #[serde(rename = "Event Type")]
    pub event_type: String,
    #[serde(rename = "Average Placement")]
    pub mean_placement: f64,
}

/// Standard deviation across event types of per-type mean placements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersatilityScore {
    #[serde(rename = "Athlete")]
    pub athlete: String,
    #[serde(rename = "Division")]
    pub division: Division,
    #[serde(rename = "Event Types")]
    pub event_types: usize,
    #[serde(rename = "Versatility Score")]
    pub score: Option<f64>,
}

/// Overall level (mean of per-type means) next to versatility
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecializationSummary {
    #[serde(rename = "Athlete")]
    pub athlete: String,
    #[serde(rename = "Division")]
    pub division: Division,
    #[serde(rename = "Average Placement")]
    pub mean_of_type_means: f64,
    #[serde(rename = "Versatility Score")]
    pub versatility: Option<f64>,
}

/// Mean placement over the highest-intensity events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClutchScore {
    #[serde(rename = "Athlete")]
    pub athlete: String,
    #[serde(rename = "Division")]
    pub division: Division,
    #[serde(rename = "Events")]
    pub events: usize,
    #[serde(rename = "Clutch Placement")]
    pub mean_placement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    #[serde(rename = "Athlete")]
    pub athlete: String,
    #[serde(rename = "Division")]
    pub division: Division,
    #[serde(rename = "Day")]
    pub day: Day,
    #[serde(rename = "Placement")]
    pub mean_placement: f64,
    /// Difference from the athlete's previous competition day; absent on the first day
    #[serde(rename = "Placement Change")]
    pub change: Option<f64>,
}

/// Sum of day-over-day changes; negative means net improvement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendTotal {
    #[serde(rename = "Athlete")]
    pub athlete: String,
    #[serde(rename = "Division")]
    pub division: Division,
    #[serde(rename = "Days")]
    pub days: usize,
    #[serde(rename = "Total Placement Change")]
    pub total_change: Option<f64>,
}
