use crate::error::{LeaderboardError, Result};
use crate::model::{Division, EventId, EventScore, LeaderboardRow, LeaderboardTable};
use crate::reshape::coerce_placement;
use csv::{ReaderBuilder, StringRecord};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

lazy_static! {
    static ref EVENT_COLUMN: Regex = Regex::new(r"^(E\d+)_(Placement|Score|ScoreDelta)$").unwrap();
}

#[derive(Debug, Default, Clone, Copy)]
struct EventColumns {
    placement: Option<usize>,
    score: Option<usize>,
    delta: Option<usize>,
}

struct ColumnIndices {
    athlete: usize,
    division: usize,
    rank: Option<usize>,
    points: Option<usize>,
    events: Vec<(EventId, EventColumns)>,
}

fn find_columns(headers: &StringRecord) -> Result<ColumnIndices> {
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    let athlete = position("Athlete")
        .ok_or_else(|| LeaderboardError::Table("column 'Athlete' not found".to_string()))?;
    let division = position("Division")
        .ok_or_else(|| LeaderboardError::Table("column 'Division' not found".to_string()))?;

    let mut events: BTreeMap<EventId, EventColumns> = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        let Some(caps) = EVENT_COLUMN.captures(header.trim()) else {
            continue;
        };
        let Some(id) = EventId::parse(&caps[1]) else {
            continue;
        };
        let columns = events.entry(id).or_default();
        match &caps[2] {
            "Placement" => columns.placement = Some(idx),
            "Score" => columns.score = Some(idx),
            _ => columns.delta = Some(idx),
        }
    }

    // Only events with a placement column take part in reshaping
    let events: Vec<(EventId, EventColumns)> = events
        .into_iter()
        .filter(|(_, c)| c.placement.is_some())
        .collect();
    if events.is_empty() {
        return Err(LeaderboardError::Table(
            "no E<n>_Placement columns found".to_string(),
        ));
    }

    Ok(ColumnIndices {
        athlete,
        division,
        rank: position("Rank"),
        points: position("Points"),
        events,
    })
}

fn cell(record: &StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Read a wide leaderboard CSV (`Rank, Athlete, Points, Division, E1_Placement, ...`).
///
/// Rows without an athlete name or with an unknown division are skipped
/// with a warning.
pub fn read_leaderboard_csv(content: &str) -> Result<LeaderboardTable> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());
    let headers = reader.headers()?.clone();
    let cols = find_columns(&headers)?;

    let mut table = LeaderboardTable::new(cols.events.iter().map(|(id, _)| *id).collect());

    for (row_num, result) in reader.records().enumerate() {
        let record = result?;

        let Some(athlete) = cell(&record, Some(cols.athlete)) else {
            log::warn!("Row {}: no athlete name, skipping", row_num + 1);
            continue;
        };
        let division = match cell(&record, Some(cols.division)).and_then(Division::from_label) {
            Some(division) => division,
            None => {
                log::warn!("Row {}: {} has no valid division, skipping", row_num + 1, athlete);
                continue;
            }
        };

        let events = cols
            .events
            .iter()
            .map(|(_, c)| EventScore {
                placement: cell(&record, c.placement).and_then(coerce_placement),
                score: cell(&record, c.score).map(String::from),
                delta: cell(&record, c.delta).map(String::from),
            })
            .collect();

        table.push(LeaderboardRow {
            rank: cell(&record, cols.rank).and_then(coerce_placement),
            athlete: athlete.to_string(),
            points: cell(&record, cols.points).and_then(|p| p.replace(',', "").parse().ok()),
            division,
            events,
        });
    }

    Ok(table)
}

pub fn read_leaderboard_csv_file(path: &Path) -> Result<LeaderboardTable> {
    let content = std::fs::read_to_string(path)?;
    read_leaderboard_csv(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_wide_csv() {
        let csv = "\
Rank,Athlete,Points,Division,E2_Placement,E2_Score,E1_Placement,E1_Score,E1_ScoreDelta,Notes
1,Jane Doe,\"1,050\",Women,5,8:30,1,10:00,0:00,x
2,John Roe,800,Men,7.0,,abc,,,
";
        let table = read_leaderboard_csv(csv).unwrap();
        assert_eq!(table.events, vec![EventId::new(1), EventId::new(2)]);
        assert_eq!(table.len(), 2);

        let jane = &table.rows[0];
        assert_eq!(jane.rank, Some(1));
        assert_eq!(jane.points, Some(1050.0));
        assert_eq!(jane.division, Division::Women);
        assert_eq!(jane.events[0].placement, Some(1));
        assert_eq!(jane.events[0].delta.as_deref(), Some("0:00"));
        assert_eq!(jane.events[1].placement, Some(5));
        assert_eq!(jane.events[1].score.as_deref(), Some("8:30"));
        assert_eq!(jane.events[1].delta, None);

        let john = &table.rows[1];
        assert_eq!(john.events[0].placement, None);
        assert_eq!(john.events[1].placement, Some(7));
    }

    #[test]
    fn test_rows_without_division_are_skipped() {
        let csv = "Athlete,Division,E1_Placement\nA,Women,1\nB,Teams,2\n,Men,3\n";
        let table = read_leaderboard_csv(csv).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].athlete, "A");
    }

    #[test]
    fn test_missing_columns_are_errors() {
        assert!(read_leaderboard_csv("Division,E1_Placement\nMen,1\n").is_err());
        assert!(read_leaderboard_csv("Athlete,Division,E1_Score\nA,Men,10:00\n").is_err());
    }
}
