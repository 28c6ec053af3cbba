use rogue_leaderboard::pipeline::{self, AnalysisOutput};
use rogue_leaderboard::table::read_leaderboard_csv_file;
use rogue_leaderboard::{
    AnalysisConfig, Day, Division, EventId, EventScore, LeaderboardRow, LeaderboardTable,
};
use std::path::Path;

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

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let athlete = format!(
        r#"<div class="embedded-leaderboard-item--body">
             <span class="embedded-leaderboard-item__rank--overall">1</span>
             <span class="embedded-leaderboard-item__name">Jane Doe</span>
             <span class="embedded-leaderboard-item__score--overall">150</span>
             {}{}
           </div>"#,
        workout("1", &["10:00", "(0:00)"]),
        workout("5", &["8:30", "(+1:15)"])
    );
    // No overall rank: skipped
    let broken = r#"<div class="embedded-leaderboard-item--body">
             <span class="embedded-leaderboard-item__name">Nobody</span>
           </div>"#;

    let path = dir.join("women.html");
    std::fs::write(
        &path,
        format!("<html><body>{}{}</body></html>", athlete, broken),
    )
    .unwrap();
    path
}

fn write_events(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("events.json");
    std::fs::write(
        &path,
        r#"{
            "E1": {"Event Name": "Lift", "Day": "Friday", "Intensity Level": 3, "Event Type": "Strength"},
            "E2": {"Event Name": "Row", "Day": "Saturday", "Intensity Level": 4, "Event Type": "Endurance"}
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn test_html_to_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let html = write_fixture(dir.path());
    let events_path = write_events(dir.path());
    let config = AnalysisConfig::default().with_event_slots(2);

    let wide = dir.path().join("out").join("leaderboard.csv");
    let processed = pipeline::write_combined_leaderboard(
        &[(html, Division::Women)],
        &config,
        &wide,
    )
    .unwrap();
    assert_eq!(processed.divisions.len(), 1);
    assert_eq!(processed.divisions[0].summary.parsed, 1);
    assert_eq!(processed.divisions[0].summary.skipped, 1);

    let table = read_leaderboard_csv_file(&wide).unwrap();
    assert_eq!(table, processed.table);
    assert_eq!(table.rows[0].events[1].score.as_deref(), Some("8:30"));
    assert_eq!(table.rows[0].events[1].delta.as_deref(), Some("+1:15"));

    let events = pipeline::load_events(Some(&events_path), config.year).unwrap();
    let output = AnalysisOutput::new(dir.path().join("metrics"))
        .with_xlsx(dir.path().join("metrics.xlsx"));
    let analysis = pipeline::analyze(&table, &events, &config, &output).unwrap();

    let long: Vec<_> = analysis
        .long
        .entries()
        .iter()
        .map(|e| (e.event_id, e.placement, e.event_type.as_deref(), e.day))
        .collect();
    assert_eq!(
        long,
        vec![
            (EventId::new(1), 1, Some("Strength"), Some(Day::Friday)),
            (EventId::new(2), 5, Some("Endurance"), Some(Day::Saturday)),
        ]
    );

    let consistency = analysis.report.consistency[0].score.unwrap();
    assert!((consistency - 8.0_f64.sqrt()).abs() < 1e-9);

    assert_eq!(analysis.report.trend[1].change, Some(4.0));
    assert_eq!(analysis.report.trend_total[0].total_change, Some(4.0));

    // Max intensity in this table is 4, so only E2 counts as clutch
    assert_eq!(analysis.report.clutch[0].mean_placement, 5.0);

    for file in &analysis.files {
        assert!(file.path.exists(), "missing {}", file.path.display());
    }
    let long_csv = std::fs::read_to_string(dir.path().join("metrics").join("long.csv")).unwrap();
    assert_eq!(long_csv.lines().count(), 3);
}

#[test]
fn test_event_report_from_builtin_table() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnalysisConfig::default();
    let events = pipeline::load_events(None, config.year).unwrap();

    let files = pipeline::write_event_report(&events, &config.style, dir.path()).unwrap();
    assert_eq!(files[0].rows, Some(9));

    let report = std::fs::read_to_string(&files[0].path).unwrap();
    assert!(report.lines().next().unwrap().contains("Fatigue Index"));
}

#[test]
fn test_metric_files_keep_headers_when_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = LeaderboardTable::new(EventId::sequence(9));
    table.push(LeaderboardRow {
        rank: Some(40),
        athlete: "Out Of Range".to_string(),
        points: Some(10.0),
        division: Division::Men,
        events: vec![EventScore::with_placement(25)],
    });

    let config = AnalysisConfig::default();
    let events = pipeline::load_events(None, config.year).unwrap();
    let output = AnalysisOutput::new(dir.path());
    let analysis = pipeline::analyze(&table, &events, &config, &output).unwrap();

    assert!(analysis.long.is_empty());
    for file in &analysis.files {
        assert_eq!(file.rows, Some(0));
        let text = std::fs::read_to_string(&file.path).unwrap();
        assert_eq!(text.lines().count(), 1, "{}", file.path.display());
        assert!(text.starts_with("Athlete,Division,"), "{}", file.path.display());
    }
}
