//! Pipeline functions for programmatic use by the CLI and tests.
//!
//! Each stage returns structured data and the list of files it wrote, leaving
//! progress output to the caller.

use crate::config::{AnalysisConfig, ChartStyle};
use crate::error::Result;
use crate::events::{
    event_report, event_type_distribution, read_events_file, rogue_invitational_2024,
};
use crate::html::{read_leaderboard_file, ExtractionSummary, LeaderboardPage};
use crate::metrics::MetricReport;
use crate::model::{Division, EventId, EventTable, LeaderboardTable};
use crate::reshape::LongTable;
use crate::table::{ensure_dir, write_leaderboard_file, write_rows_file, CsvRow};
use crate::xlsx::write_metrics_to_xlsx;
use std::path::{Path, PathBuf};

// ============================================================================
// Leaderboard extraction
// ============================================================================

/// Extraction counts for one division's page
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionSummary {
    pub division: Division,
    pub path: PathBuf,
    pub summary: ExtractionSummary,
}

/// Combined wide table of every processed division
#[derive(Debug, Clone)]
pub struct ProcessedLeaderboard {
    pub table: LeaderboardTable,
    pub divisions: Vec<DivisionSummary>,
}

/// Parse each division's leaderboard HTML in turn and concatenate the wide
/// tables in input order.
///
/// Failing to read a file is fatal; malformed rows are only counted.
pub fn process_divisions(
    inputs: &[(PathBuf, Division)],
    config: &AnalysisConfig,
) -> Result<ProcessedLeaderboard> {
    let mut table = LeaderboardTable::new(EventId::sequence(config.event_slots));
    let mut divisions = Vec::with_capacity(inputs.len());

    for (path, division) in inputs {
        let page: LeaderboardPage = read_leaderboard_file(path, *division, config)?;
        let summary = page.summary();
        log::debug!(
            "{}: {} parsed, {} partial, {} skipped",
            division,
            summary.parsed,
            summary.partial,
            summary.skipped
        );
        table.extend(page.to_table());
        divisions.push(DivisionSummary {
            division: *division,
            path: path.clone(),
            summary,
        });
    }

    Ok(ProcessedLeaderboard { table, divisions })
}

/// Extract every division and write the combined wide CSV
pub fn write_combined_leaderboard(
    inputs: &[(PathBuf, Division)],
    config: &AnalysisConfig,
    output: &Path,
) -> Result<ProcessedLeaderboard> {
    let processed = process_divisions(inputs, config)?;
    write_leaderboard_file(&processed.table, output)?;
    Ok(processed)
}

// ============================================================================
// Event metadata
// ============================================================================

/// Load event metadata from a JSON or CSV file, or fall back to the builtin
/// 2024 Rogue Invitational table.
pub fn load_events(path: Option<&Path>, year: i32) -> Result<EventTable> {
    match path {
        Some(path) => read_events_file(path, year),
        None => Ok(rogue_invitational_2024()),
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// A CSV or workbook written by a pipeline stage
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// Data rows written; `None` for workbooks
    pub rows: Option<usize>,
}

/// Where the analysis stage writes its results
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutput {
    /// Directory receiving one CSV per metric (created if absent)
    pub output_dir: PathBuf,
    /// Optional workbook with one sheet per metric
    pub xlsx: Option<PathBuf>,
    /// Restrict the analysis to one division
    pub division: Option<Division>,
}

impl AnalysisOutput {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            xlsx: None,
            division: None,
        }
    }

    pub fn with_xlsx(mut self, path: impl Into<PathBuf>) -> Self {
        self.xlsx = Some(path.into());
        self
    }

    pub fn with_division(mut self, division: Division) -> Self {
        self.division = Some(division);
        self
    }
}

/// Result of the analysis stage
#[derive(Debug, Clone)]
pub struct Analysis {
    pub long: LongTable,
    pub report: MetricReport,
    pub files: Vec<WrittenFile>,
}

/// Build the long table and every metric without writing anything
pub fn compute_analysis(
    table: &LeaderboardTable,
    events: &EventTable,
    config: &AnalysisConfig,
    division: Option<Division>,
) -> (LongTable, MetricReport) {
    let long = LongTable::build(table, events, config);
    let long = match division {
        Some(division) => long.for_division(division),
        None => long,
    };
    let report = MetricReport::compute(&long, events);
    (long, report)
}

/// Compute the long table and metrics, then write one CSV per metric
pub fn analyze(
    table: &LeaderboardTable,
    events: &EventTable,
    config: &AnalysisConfig,
    output: &AnalysisOutput,
) -> Result<Analysis> {
    let (long, report) = compute_analysis(table, events, config, output.division);

    ensure_dir(&output.output_dir)?;
    let dir = output.output_dir.as_path();
    let files = vec![
        write_csv(dir, "long.csv", long.entries())?,
        write_csv(dir, "consistency.csv", &report.consistency)?,
        write_csv(dir, "trend.csv", &report.trend)?,
        write_csv(dir, "trend_total.csv", &report.trend_total)?,
        write_csv(dir, "specialization.csv", &report.specialization)?,
        write_csv(dir, "versatility.csv", &report.versatility)?,
        write_csv(dir, "specialization_summary.csv", &report.specialization_summary)?,
        write_csv(dir, "clutch.csv", &report.clutch)?,
    ];

    let mut analysis = Analysis { long, report, files };

    if let Some(path) = &output.xlsx {
        write_metrics_to_xlsx(&analysis.long, &analysis.report, path)?;
        analysis.files.push(WrittenFile {
            path: path.clone(),
            rows: None,
        });
    }

    Ok(analysis)
}

/// Write the event-centric report and the per-day event type distribution
pub fn write_event_report(
    events: &EventTable,
    style: &ChartStyle,
    output_dir: &Path,
) -> Result<Vec<WrittenFile>> {
    ensure_dir(output_dir)?;
    Ok(vec![
        write_csv(output_dir, "event_report.csv", &event_report(events, style))?,
        write_csv(
            output_dir,
            "event_type_distribution.csv",
            &event_type_distribution(events),
        )?,
    ])
}

fn write_csv<T: CsvRow>(dir: &Path, name: &str, rows: &[T]) -> Result<WrittenFile> {
    let path = dir.join(name);
    let rows = write_rows_file(rows, &path)?;
    Ok(WrittenFile {
        path,
        rows: Some(rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, EventMetadata, EventScore, LeaderboardRow};

    fn table() -> LeaderboardTable {
        let mut table = LeaderboardTable::new(EventId::sequence(2));
        for (name, division, first, second) in [
            ("Ann", Division::Women, 1, 5),
            ("Bob", Division::Men, 3, 25),
        ] {
            table.push(LeaderboardRow {
                rank: Some(1),
                athlete: name.to_string(),
                points: Some(100.0),
                division,
                events: vec![
                    EventScore::with_placement(first),
                    EventScore::with_placement(second),
                ],
            });
        }
        table
    }

    fn events() -> EventTable {
        EventTable::new(vec![
            EventMetadata::new(EventId::new(1), "Lift", "Strength", 3).with_day(Day::Friday),
            EventMetadata::new(EventId::new(2), "Row", "Endurance", 5).with_day(Day::Saturday),
        ])
    }

    #[test]
    fn test_compute_analysis_filters_placements() {
        let (long, report) =
            compute_analysis(&table(), &events(), &AnalysisConfig::default(), None);
        // Bob's 25th place falls outside 1..=20
        assert_eq!(long.len(), 3);
        assert_eq!(report.consistency.len(), 2);
    }

    #[test]
    fn test_compute_analysis_for_division() {
        let (long, report) = compute_analysis(
            &table(),
            &events(),
            &AnalysisConfig::default(),
            Some(Division::Women),
        );
        assert_eq!(long.len(), 2);
        assert!(report.consistency.iter().all(|c| c.division == Division::Women));
    }

    #[test]
    fn test_load_builtin_events() {
        let events = load_events(None, 2024).unwrap();
        assert_eq!(events.len(), 9);
    }

    #[test]
    fn test_analyze_writes_every_metric() {
        let dir = tempfile::tempdir().unwrap();
        let output = AnalysisOutput::new(dir.path().join("metrics"))
            .with_xlsx(dir.path().join("metrics.xlsx"));
        let analysis =
            analyze(&table(), &events(), &AnalysisConfig::default(), &output).unwrap();

        assert_eq!(analysis.files.len(), 9);
        for file in &analysis.files {
            assert!(file.path.exists(), "missing {}", file.path.display());
        }
        assert_eq!(analysis.files[0].rows, Some(3));
    }

    #[test]
    fn test_write_event_report() {
        let dir = tempfile::tempdir().unwrap();
        let files =
            write_event_report(&events(), &ChartStyle::default(), dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].rows, Some(2));
        assert_eq!(files[1].rows, Some(2));
    }
}
