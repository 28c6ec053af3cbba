//! Leaderboard page extraction: one `AthleteRecord` per leaderboard row

use super::score::{decompose, decompose_record};
use crate::config::{AnalysisConfig, LeaderboardSelectors};
use crate::error::{LeaderboardError, Result};
use crate::model::{AthleteRecord, Division, EventId, LeaderboardTable};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"\d+").unwrap();
    static ref NUMBER: Regex = Regex::new(r"-?\d+(?:\.\d+)?").unwrap();
}

/// Outcome of extracting a single leaderboard row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// Every field and every event slot parsed
    Parsed(AthleteRecord),
    /// Record kept, but some event slots are missing or didn't decompose,
    /// or the overall rank or points text wasn't numeric
    Partial {
        record: AthleteRecord,
        null_events: Vec<EventId>,
        unreadable: Vec<&'static str>,
    },
    /// A required element was missing or unreadable; the row was dropped
    Skipped { index: usize, reason: String },
}

impl RowOutcome {
    pub fn record(&self) -> Option<&AthleteRecord> {
        match self {
            RowOutcome::Parsed(record) | RowOutcome::Partial { record, .. } => Some(record),
            RowOutcome::Skipped { .. } => None,
        }
    }
}

/// Counts of row outcomes for one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    pub parsed: usize,
    pub partial: usize,
    pub skipped: usize,
}

impl ExtractionSummary {
    pub fn total(&self) -> usize {
        self.parsed + self.partial + self.skipped
    }
}

/// All rows extracted from one division's page, in document order
#[derive(Debug, Clone)]
pub struct LeaderboardPage {
    pub division: Division,
    pub event_slots: usize,
    pub outcomes: Vec<RowOutcome>,
}

impl LeaderboardPage {
    pub fn records(&self) -> impl Iterator<Item = &AthleteRecord> {
        self.outcomes.iter().filter_map(|o| o.record())
    }

    pub fn summary(&self) -> ExtractionSummary {
        let mut summary = ExtractionSummary::default();
        for outcome in &self.outcomes {
            match outcome {
                RowOutcome::Parsed(_) => summary.parsed += 1,
                RowOutcome::Partial { .. } => summary.partial += 1,
                RowOutcome::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    /// Wide table with decomposed event scores for every kept record
    pub fn to_table(&self) -> LeaderboardTable {
        let mut table = LeaderboardTable::new(EventId::sequence(self.event_slots));
        for record in self.records() {
            table.push(decompose_record(record));
        }
        table
    }
}

/// Compiled form of `LeaderboardSelectors`
struct CompiledSelectors {
    row: Selector,
    overall_rank: Selector,
    name: Selector,
    overall_points: Selector,
    workout_cell: Selector,
    workout_rank: Selector,
    workout_score: Selector,
}

impl CompiledSelectors {
    fn compile(selectors: &LeaderboardSelectors) -> Result<Self> {
        Ok(Self {
            row: compile_selector(&selectors.row)?,
            overall_rank: compile_selector(&selectors.overall_rank)?,
            name: compile_selector(&selectors.name)?,
            overall_points: compile_selector(&selectors.overall_points)?,
            workout_cell: compile_selector(&selectors.workout_cell)?,
            workout_rank: compile_selector(&selectors.workout_rank)?,
            workout_score: compile_selector(&selectors.workout_score)?,
        })
    }
}

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| LeaderboardError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

/// Read a leaderboard HTML file and extract its rows
pub fn read_leaderboard_file(
    path: &Path,
    division: Division,
    config: &AnalysisConfig,
) -> Result<LeaderboardPage> {
    let html = std::fs::read_to_string(path)?;
    extract_leaderboard(&html, division, config)
}

/// Extract rows from leaderboard HTML text
pub fn extract_leaderboard(
    html: &str,
    division: Division,
    config: &AnalysisConfig,
) -> Result<LeaderboardPage> {
    let document = Html::parse_document(html);
    let outcomes = extract_rows(&document, division, &config.selectors, config.event_slots)?;
    Ok(LeaderboardPage {
        division,
        event_slots: config.event_slots,
        outcomes,
    })
}

/// Extract one outcome per row element of a parsed document.
///
/// A row missing a required element is skipped and logged; extraction
/// carries on with the next row.
pub fn extract_rows(
    document: &Html,
    division: Division,
    selectors: &LeaderboardSelectors,
    event_slots: usize,
) -> Result<Vec<RowOutcome>> {
    let selectors = CompiledSelectors::compile(selectors)?;
    let mut outcomes = Vec::new();

    for (index, row) in document.select(&selectors.row).enumerate() {
        let outcome = match parse_row(row, &selectors, division, event_slots) {
            Ok(record) => {
                let null_events = null_event_slots(&record);
                let unreadable = unreadable_fields(&record);
                if null_events.is_empty() && unreadable.is_empty() {
                    RowOutcome::Parsed(record)
                } else {
                    if !null_events.is_empty() {
                        log::warn!(
                            "{} row {}: {} has no usable score for {}",
                            division,
                            index,
                            record.name,
                            join_ids(&null_events)
                        );
                    }
                    RowOutcome::Partial {
                        record,
                        null_events,
                        unreadable,
                    }
                }
            }
            Err(reason) => {
                log::error!("Error parsing {} athlete row {}: {}", division, index, reason);
                RowOutcome::Skipped { index, reason }
            }
        };
        outcomes.push(outcome);
    }

    log::debug!("{}: extracted {} leaderboard rows", division, outcomes.len());
    Ok(outcomes)
}

fn parse_row(
    row: ElementRef,
    selectors: &CompiledSelectors,
    division: Division,
    event_slots: usize,
) -> std::result::Result<AthleteRecord, String> {
    let rank_text = select_text(row, &selectors.overall_rank)
        .ok_or_else(|| "missing overall rank".to_string())?;

    let name = select_text(row, &selectors.name)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| "missing athlete name".to_string())?;

    let points_text = select_text(row, &selectors.overall_points)
        .ok_or_else(|| "missing overall points".to_string())?;

    // Present but non-numeric ("WD", "--") keeps the row with the value absent
    let rank = parse_integer(&rank_text);
    if rank.is_none() {
        log::warn!("{}: {} has unreadable overall rank '{}'", division, name, rank_text);
    }
    let points = parse_number(&points_text);
    if points.is_none() {
        log::warn!("{}: {} has unreadable overall points '{}'", division, name, points_text);
    }

    let cells: Vec<ElementRef> = row.select(&selectors.workout_cell).collect();
    if cells.len() > event_slots {
        log::warn!(
            "{}: {} has {} workout cells, keeping the first {}",
            division,
            name,
            cells.len(),
            event_slots
        );
    }

    let mut events = Vec::with_capacity(event_slots);
    for (slot, cell) in cells.into_iter().take(event_slots).enumerate() {
        let event_rank = select_text(cell, &selectors.workout_rank)
            .ok_or_else(|| format!("missing workout rank for E{}", slot + 1))?;
        let fragments: Vec<String> = cell
            .select(&selectors.workout_score)
            .map(element_text)
            .collect();
        events.push(Some(format!("{}: {}", event_rank, fragments.join(" | "))));
    }
    events.resize(event_slots, None);

    Ok(AthleteRecord {
        rank,
        name,
        division,
        points,
        events,
    })
}

/// Event slots that are empty or whose score string doesn't decompose
fn null_event_slots(record: &AthleteRecord) -> Vec<EventId> {
    record
        .events
        .iter()
        .enumerate()
        .filter(|(_, raw)| match raw {
            Some(raw) => decompose(raw).is_absent(),
            None => true,
        })
        .map(|(i, _)| EventId::new(i as u32 + 1))
        .collect()
}

/// Overall fields present on the page but not numeric
fn unreadable_fields(record: &AthleteRecord) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if record.rank.is_none() {
        fields.push("overall rank");
    }
    if record.points.is_none() {
        fields.push("overall points");
    }
    fields
}

fn select_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn parse_integer(text: &str) -> Option<u32> {
    INTEGER.find(text)?.as_str().parse().ok()
}

fn parse_number(text: &str) -> Option<f64> {
    let cleaned = text.replace(',', "");
    NUMBER.find(&cleaned)?.as_str().parse().ok()
}

fn join_ids(ids: &[EventId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(rank: &str, fragments: &[&str]) -> String {
        let spans: String = fragments
            .iter()
            .map(|f| format!("<span>{}</span>", f))
            .collect();
        format!(
            r#"<div class="embedded-leaderboard-item__cell--workout">
                 <span class="embedded-leaderboard-item__rank--workout">{}</span>
                 <div class="embedded-leaderboard-item__score--workout">{}</div>
               </div>"#,
            rank, spans
        )
    }

    fn athlete_row(rank: &str, name: &str, points: &str, workouts: &[String]) -> String {
        format!(
            r#"<div class="embedded-leaderboard-item--body">
                 <span class="embedded-leaderboard-item__rank--overall"> {} </span>
                 <span class="embedded-leaderboard-item__name">{}</span>
                 <span class="embedded-leaderboard-item__score--overall">{}</span>
                 {}
               </div>"#,
            rank,
            name,
            points,
            workouts.concat()
        )
    }

    fn page(rows: &[String]) -> String {
        format!("<html><body>{}</body></html>", rows.concat())
    }

    fn config(slots: usize) -> AnalysisConfig {
        AnalysisConfig::default().with_event_slots(slots)
    }

    #[test]
    fn test_extract_full_row() {
        let html = page(&[athlete_row(
            "1",
            "Jane Doe",
            "1,050",
            &[
                workout("1", &["10:00", "(0:00)"]),
                workout("5", &["8:30", "(+1:15)"]),
            ],
        )]);
        let page = extract_leaderboard(&html, Division::Women, &config(2)).unwrap();
        assert_eq!(page.summary(), ExtractionSummary { parsed: 1, partial: 0, skipped: 0 });

        let record = page.records().next().unwrap();
        assert_eq!(record.rank, Some(1));
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.points, Some(1050.0));
        assert_eq!(record.division, Division::Women);
        assert_eq!(record.event(1), Some("1: 10:00 | (0:00)"));
        assert_eq!(record.event(2), Some("5: 8:30 | (+1:15)"));
    }

    #[test]
    fn test_missing_name_skips_row_and_continues() {
        let broken = r#"<div class="embedded-leaderboard-item--body">
                          <span class="embedded-leaderboard-item__rank--overall">1</span>
                          <span class="embedded-leaderboard-item__score--overall">900</span>
                        </div>"#
            .to_string();
        let html = page(&[
            broken,
            athlete_row("2", "John Roe", "800", &[workout("3", &["5:00", "(+0:10)"])]),
        ]);
        let page = extract_leaderboard(&html, Division::Men, &config(1)).unwrap();

        assert_eq!(page.summary(), ExtractionSummary { parsed: 1, partial: 0, skipped: 1 });
        match &page.outcomes[0] {
            RowOutcome::Skipped { index, reason } => {
                assert_eq!(*index, 0);
                assert!(reason.contains("name"));
            }
            other => panic!("expected skipped row, got {:?}", other),
        }
        assert_eq!(page.records().next().unwrap().name, "John Roe");
    }

    #[test]
    fn test_missing_workout_rank_skips_row() {
        let cell = r#"<div class="embedded-leaderboard-item__cell--workout">
                        <div class="embedded-leaderboard-item__score--workout"><span>5:00</span></div>
                      </div>"#
            .to_string();
        let html = page(&[athlete_row("4", "No Rank", "100", &[cell])]);
        let page = extract_leaderboard(&html, Division::Men, &config(1)).unwrap();
        assert_eq!(page.summary().skipped, 1);
    }

    #[test]
    fn test_fewer_cells_leaves_slots_absent() {
        let html = page(&[athlete_row(
            "3",
            "Short Row",
            "400",
            &[workout("2", &["9:00", "(+0:05)"])],
        )]);
        let page = extract_leaderboard(&html, Division::Women, &config(3)).unwrap();

        match &page.outcomes[0] {
            RowOutcome::Partial {
                record,
                null_events,
                unreadable,
            } => {
                assert!(unreadable.is_empty());
                assert_eq!(record.events.len(), 3);
                assert_eq!(record.event(2), None);
                assert_eq!(null_events, &vec![EventId::new(2), EventId::new(3)]);
            }
            other => panic!("expected partial row, got {:?}", other),
        }

        let table = page.to_table();
        assert_eq!(table.events, EventId::sequence(3));
        assert_eq!(table.rows[0].events[0].placement, Some(2));
        assert!(table.rows[0].events[1].is_absent());
    }

    #[test]
    fn test_non_numeric_rank_and_points_keep_row() {
        let html = page(&[athlete_row(
            "WD",
            "Withdrawn",
            "--",
            &[workout("3", &["10:00", "(0:00)"])],
        )]);
        let page = extract_leaderboard(&html, Division::Women, &config(1)).unwrap();
        assert_eq!(page.summary(), ExtractionSummary { parsed: 0, partial: 1, skipped: 0 });

        match &page.outcomes[0] {
            RowOutcome::Partial {
                record,
                null_events,
                unreadable,
            } => {
                assert_eq!(record.rank, None);
                assert_eq!(record.points, None);
                assert!(null_events.is_empty());
                assert_eq!(unreadable, &vec!["overall rank", "overall points"]);
            }
            other => panic!("expected partial row, got {:?}", other),
        }

        let table = page.to_table();
        assert_eq!(table.rows[0].rank, None);
        assert_eq!(table.rows[0].events[0].placement, Some(3));
    }

    #[test]
    fn test_malformed_score_is_partial() {
        let html = page(&[athlete_row("7", "Capped", "300", &[workout("12", &["CAP"])])]);
        let page = extract_leaderboard(&html, Division::Men, &config(1)).unwrap();
        assert_eq!(page.summary().partial, 1);
        assert!(page.to_table().rows[0].events[0].is_absent());
    }

    #[test]
    fn test_invalid_selector_is_error() {
        let selectors = LeaderboardSelectors {
            row: "div[[".to_string(),
            ..LeaderboardSelectors::default()
        };
        let config = AnalysisConfig::default().with_selectors(selectors);
        let err = extract_leaderboard("<html></html>", Division::Men, &config).unwrap_err();
        assert!(matches!(err, LeaderboardError::Selector { .. }));
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_integer("T-3"), Some(3));
        assert_eq!(parse_integer("--"), None);
        assert_eq!(parse_number("1,234.5 pts"), Some(1234.5));
        assert_eq!(parse_number("n/a"), None);
    }
}
