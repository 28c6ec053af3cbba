//! Grouped reductions over the long placement table.
//!
//! Athletes are keyed by (name, division) and reported in order of first
//! appearance. Lower placements are better throughout.

pub mod stats;

use crate::model::{
    ClutchScore, ConsistencyScore, Day, Division, EventTable, SpecializationRow,
    SpecializationSummary, TrendRow, TrendTotal, VersatilityScore,
};
use crate::reshape::LongTable;
use stats::{mean, sample_std_dev, Groups};
use std::collections::HashSet;

type AthleteKey = (String, Division);

/// Spread of each athlete's placements across all their valid events
pub fn consistency(long: &LongTable) -> Vec<ConsistencyScore> {
    let mut groups: Groups<AthleteKey> = Groups::new();
    for entry in long.entries() {
        groups.push((entry.athlete.clone(), entry.division), entry.placement as f64);
    }

    groups
        .iter()
        .map(|((athlete, division), placements)| ConsistencyScore {
            athlete: athlete.clone(),
            division: *division,
            events: placements.len(),
            score: sample_std_dev(placements),
        })
        .collect()
}

/// Mean placement per athlete per day, with the change from the previous day.
/// Rows without a known day are ignored.
pub fn daywise_trend(long: &LongTable) -> Vec<TrendRow> {
    let mut groups: Groups<(AthleteKey, Day)> = Groups::new();
    for entry in long.entries() {
        if let Some(day) = entry.day {
            groups.push(
                ((entry.athlete.clone(), entry.division), day),
                entry.placement as f64,
            );
        }
    }

    let mut athletes: Vec<&AthleteKey> = Vec::new();
    for ((athlete, _), _) in groups.iter() {
        if !athletes.contains(&athlete) {
            athletes.push(athlete);
        }
    }

    let mut rows = Vec::new();
    for athlete in athletes {
        let mut days: Vec<(Day, f64)> = groups
            .iter()
            .filter(|(key, _)| &key.0 == athlete)
            .filter_map(|((_, day), placements)| mean(placements).map(|m| (*day, m)))
            .collect();
        days.sort_by_key(|(day, _)| *day);

        let mut previous: Option<f64> = None;
        for (day, mean_placement) in days {
            rows.push(TrendRow {
                athlete: athlete.0.clone(),
                division: athlete.1,
                day,
                mean_placement,
                change: previous.map(|p| mean_placement - p),
            });
            previous = Some(mean_placement);
        }
    }
    rows
}

/// Sum of day-over-day changes per athlete, most improved first.
/// Athletes with a single competition day have no total and sort last.
pub fn total_trend(trend: &[TrendRow]) -> Vec<TrendTotal> {
    let mut totals: Vec<TrendTotal> = Vec::new();
    for row in trend {
        let idx = match totals
            .iter()
            .position(|t| t.athlete == row.athlete && t.division == row.division)
        {
            Some(idx) => idx,
            None => {
                totals.push(TrendTotal {
                    athlete: row.athlete.clone(),
                    division: row.division,
                    days: 0,
                    total_change: None,
                });
                totals.len() - 1
            }
        };
        let total = &mut totals[idx];
        total.days += 1;
        if let Some(change) = row.change {
            total.total_change = Some(total.total_change.unwrap_or(0.0) + change);
        }
    }

    totals.sort_by(|a, b| match (a.total_change, b.total_change) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    totals
}

/// Mean placement per athlete per event type; rows without a type are ignored
pub fn specialization(long: &LongTable) -> Vec<SpecializationRow> {
    let mut groups: Groups<(AthleteKey, String)> = Groups::new();
    for entry in long.entries() {
        if let Some(event_type) = &entry.event_type {
            groups.push(
                ((entry.athlete.clone(), entry.division), event_type.clone()),
                entry.placement as f64,
            );
        }
    }

    groups
        .iter()
        .filter_map(|(((athlete, division), event_type), placements)| {
            Some(SpecializationRow {
                athlete: athlete.clone(),
                division: *division,
                event_type: event_type.clone(),
                mean_placement: mean(placements)?,
            })
        })
        .collect()
}

/// Spread of each athlete's per-type means; lower is more versatile
pub fn versatility(specialization: &[SpecializationRow]) -> Vec<VersatilityScore> {
    let mut groups: Groups<AthleteKey> = Groups::new();
    for row in specialization {
        groups.push((row.athlete.clone(), row.division), row.mean_placement);
    }

    groups
        .iter()
        .map(|((athlete, division), means)| VersatilityScore {
            athlete: athlete.clone(),
            division: *division,
            event_types: means.len(),
            score: sample_std_dev(means),
        })
        .collect()
}

/// Mean of per-type means alongside versatility, one row per athlete
pub fn specialization_summary(
    specialization: &[SpecializationRow],
    versatility: &[VersatilityScore],
) -> Vec<SpecializationSummary> {
    let mut groups: Groups<AthleteKey> = Groups::new();
    for row in specialization {
        groups.push((row.athlete.clone(), row.division), row.mean_placement);
    }

    groups
        .iter()
        .filter_map(|((athlete, division), means)| {
            let versatility = versatility
                .iter()
                .find(|v| &v.athlete == athlete && v.division == *division)
                .and_then(|v| v.score);
            Some(SpecializationSummary {
                athlete: athlete.clone(),
                division: *division,
                mean_of_type_means: mean(means)?,
                versatility,
            })
        })
        .collect()
}

/// Mean placement restricted to the events at the table's highest intensity.
/// Athletes who did not place in any of them are left out.
pub fn clutch(long: &LongTable, events: &EventTable) -> Vec<ClutchScore> {
    let hardest: HashSet<_> = events.max_intensity_events().into_iter().collect();

    let mut groups: Groups<AthleteKey> = Groups::new();
    for entry in long.entries() {
        if hardest.contains(&entry.event_id) {
            groups.push((entry.athlete.clone(), entry.division), entry.placement as f64);
        }
    }

    groups
        .iter()
        .filter_map(|((athlete, division), placements)| {
            Some(ClutchScore {
                athlete: athlete.clone(),
                division: *division,
                events: placements.len(),
                mean_placement: mean(placements)?,
            })
        })
        .collect()
}

/// Every metric computed over one long table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricReport {
    pub consistency: Vec<ConsistencyScore>,
    pub trend: Vec<TrendRow>,
    pub trend_total: Vec<TrendTotal>,
    pub specialization: Vec<SpecializationRow>,
    pub versatility: Vec<VersatilityScore>,
    pub specialization_summary: Vec<SpecializationSummary>,
    pub clutch: Vec<ClutchScore>,
}

impl MetricReport {
    pub fn compute(long: &LongTable, events: &EventTable) -> Self {
        let trend = daywise_trend(long);
        let trend_total = total_trend(&trend);
        let specialization = specialization(long);
        let versatility = versatility(&specialization);
        let specialization_summary = specialization_summary(&specialization, &versatility);

        Self {
            consistency: consistency(long),
            trend,
            trend_total,
            specialization,
            versatility,
            specialization_summary,
            clutch: clutch(long, events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventId, EventMetadata, PlacementEntry};

    fn entry(athlete: &str, event: u32, placement: u32, event_type: &str, day: Day) -> PlacementEntry {
        PlacementEntry {
            athlete: athlete.to_string(),
            division: Division::Women,
            event_id: EventId::new(event),
            event_type: Some(event_type.to_string()),
            intensity_level: None,
            day: Some(day),
            placement,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_consistency_single_event_is_absent() {
        let long = LongTable::from_entries(vec![
            entry("A", 1, 1, "Strength", Day::Friday),
            entry("A", 2, 5, "Endurance", Day::Saturday),
            entry("B", 1, 7, "Strength", Day::Friday),
        ]);
        let scores = consistency(&long);
        assert_eq!(scores.len(), 2);
        assert!(approx(scores[0].score.unwrap(), 8.0_f64.sqrt()));
        assert_eq!(scores[1].athlete, "B");
        assert_eq!(scores[1].events, 1);
        assert_eq!(scores[1].score, None);
    }

    #[test]
    fn test_daywise_trend() {
        let long = LongTable::from_entries(vec![
            // Out of calendar order on purpose
            entry("A", 7, 2, "Strength", Day::Sunday),
            entry("A", 1, 4, "Strength", Day::Friday),
            entry("A", 2, 6, "Strength", Day::Friday),
            entry("A", 4, 9, "Strength", Day::Saturday),
            entry("B", 1, 3, "Strength", Day::Friday),
        ]);
        let trend = daywise_trend(&long);
        let a: Vec<(Day, f64, Option<f64>)> = trend
            .iter()
            .filter(|r| r.athlete == "A")
            .map(|r| (r.day, r.mean_placement, r.change))
            .collect();
        assert_eq!(
            a,
            vec![
                (Day::Friday, 5.0, None),
                (Day::Saturday, 9.0, Some(4.0)),
                (Day::Sunday, 2.0, Some(-7.0)),
            ]
        );

        let totals = total_trend(&trend);
        assert_eq!(totals[0].athlete, "A");
        assert_eq!(totals[0].days, 3);
        assert_eq!(totals[0].total_change, Some(-3.0));
        assert_eq!(totals[1].athlete, "B");
        assert_eq!(totals[1].total_change, None);
    }

    #[test]
    fn test_total_trend_sorted_ascending() {
        let long = LongTable::from_entries(vec![
            entry("Worse", 1, 1, "Strength", Day::Friday),
            entry("Worse", 4, 9, "Strength", Day::Saturday),
            entry("Better", 1, 9, "Strength", Day::Friday),
            entry("Better", 4, 1, "Strength", Day::Saturday),
        ]);
        let totals = total_trend(&daywise_trend(&long));
        let order: Vec<&str> = totals.iter().map(|t| t.athlete.as_str()).collect();
        assert_eq!(order, vec!["Better", "Worse"]);
    }

    #[test]
    fn test_specialization_and_versatility() {
        let mut untyped = entry("A", 9, 20, "Strength", Day::Sunday);
        untyped.event_type = None;
        let long = LongTable::from_entries(vec![
            entry("A", 1, 2, "Strength", Day::Friday),
            entry("A", 3, 4, "Strength", Day::Friday),
            entry("A", 2, 10, "Endurance", Day::Friday),
            untyped,
            entry("B", 1, 5, "Strength", Day::Friday),
        ]);

        let spec = specialization(&long);
        let a: Vec<(&str, f64)> = spec
            .iter()
            .filter(|r| r.athlete == "A")
            .map(|r| (r.event_type.as_str(), r.mean_placement))
            .collect();
        assert_eq!(a, vec![("Strength", 3.0), ("Endurance", 10.0)]);

        let vers = versatility(&spec);
        assert_eq!(vers[0].event_types, 2);
        assert!(approx(vers[0].score.unwrap(), 24.5_f64.sqrt()));
        assert_eq!(vers[1].score, None);

        let summary = specialization_summary(&spec, &vers);
        assert!(approx(summary[0].mean_of_type_means, 6.5));
        assert_eq!(summary[0].versatility, vers[0].score);
        assert_eq!(summary[1].mean_of_type_means, 5.0);
        assert_eq!(summary[1].versatility, None);
    }

    #[test]
    fn test_clutch_uses_observed_max_intensity() {
        // Highest intensity present is 4, not 5
        let events = EventTable::new(vec![
            EventMetadata::new(EventId::new(1), "One", "Strength", 4),
            EventMetadata::new(EventId::new(2), "Two", "Strength", 3),
            EventMetadata::new(EventId::new(3), "Three", "Strength", 4),
        ]);
        let long = LongTable::from_entries(vec![
            entry("A", 1, 2, "Strength", Day::Friday),
            entry("A", 2, 20, "Strength", Day::Friday),
            entry("A", 3, 6, "Strength", Day::Friday),
            entry("B", 2, 1, "Strength", Day::Friday),
        ]);

        let scores = clutch(&long, &events);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].athlete, "A");
        assert_eq!(scores[0].events, 2);
        assert_eq!(scores[0].mean_placement, 4.0);
    }

    #[test]
    fn test_same_name_in_both_divisions_is_two_athletes() {
        let mut men = entry("Sam", 2, 9, "Strength", Day::Friday);
        men.division = Division::Men;
        let long = LongTable::from_entries(vec![entry("Sam", 1, 1, "Strength", Day::Friday), men]);
        let scores = consistency(&long);
        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|s| s.score.is_none()));
    }

    #[test]
    fn test_report_on_empty_table() {
        let report = MetricReport::compute(&LongTable::default(), &EventTable::default());
        assert_eq!(report, MetricReport::default());
    }
}
