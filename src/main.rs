use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use rogue_leaderboard::html::{self, RowOutcome};
use rogue_leaderboard::pipeline::{self, AnalysisOutput, ProcessedLeaderboard, WrittenFile};
use rogue_leaderboard::table;
use rogue_leaderboard::{AnalysisConfig, Division, LeaderboardTable};

#[derive(Parser)]
#[command(name = "rogue-leaderboard")]
#[command(about = "Extract and analyze Rogue Invitational leaderboards", long_about = None)]
struct Cli {
    /// Competition year used to resolve event dates given without one
    #[arg(long, global = true, default_value_t = 2024)]
    year: i32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ExtractArgs {
    /// Number of events per athlete
    #[arg(long, default_value_t = 9)]
    event_slots: usize,
}

#[derive(Args)]
struct AnalysisArgs {
    /// Event metadata file (JSON or CSV); the builtin 2024 table when omitted
    #[arg(long)]
    events: Option<PathBuf>,

    /// Directory for the metric CSV files
    #[arg(short = 'd', long, default_value = "metrics")]
    output_dir: PathBuf,

    /// Also write all metrics to an Excel workbook
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Only analyze one division (Men or Women)
    #[arg(long, value_parser = parse_division)]
    division: Option<Division>,

    /// Largest placement kept in the analysis
    #[arg(long, default_value_t = 20)]
    max_placement: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract leaderboard HTML pages into one wide CSV table
    Leaderboard {
        /// Division pages, as DIVISION=FILE (e.g. Women=women.html)
        #[arg(required = true, value_parser = parse_division_input)]
        inputs: Vec<(PathBuf, Division)>,

        /// Output CSV file
        #[arg(short, long, default_value = "leaderboard.csv")]
        output: PathBuf,

        #[command(flatten)]
        extraction: ExtractArgs,
    },

    /// Convert event metadata (JSON, CSV or the builtin table) to CSV
    Events {
        /// Event metadata file; the builtin 2024 table when omitted
        input: Option<PathBuf>,

        /// Output CSV file
        #[arg(short, long, default_value = "events.csv")]
        output: PathBuf,
    },

    /// Compute athlete metrics from a wide leaderboard CSV
    Analyze {
        /// Wide leaderboard CSV written by the leaderboard command
        input: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Write the event-centric report and event type distribution
    EventReport {
        /// Event metadata file; the builtin 2024 table when omitted
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output directory
        #[arg(short = 'd', long, default_value = "events")]
        output_dir: PathBuf,
    },

    /// Extract leaderboard pages and analyze them in one go
    Run {
        /// Division pages, as DIVISION=FILE (e.g. Women=women.html)
        #[arg(required = true, value_parser = parse_division_input)]
        inputs: Vec<(PathBuf, Division)>,

        /// Also keep the combined wide CSV
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        extraction: ExtractArgs,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Parse a leaderboard page and report each row's outcome
    Validate {
        /// Leaderboard HTML file
        input: PathBuf,

        /// Division the page belongs to
        #[arg(long, value_parser = parse_division)]
        division: Division,

        #[command(flatten)]
        extraction: ExtractArgs,
    },
}

fn parse_division(s: &str) -> std::result::Result<Division, String> {
    s.parse::<Division>().map_err(|e| e.to_string())
}

fn parse_division_input(s: &str) -> std::result::Result<(PathBuf, Division), String> {
    let (division, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected DIVISION=FILE, got '{}'", s))?;
    Ok((PathBuf::from(path), parse_division(division)?))
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AnalysisConfig::default().with_year(cli.year);

    match cli.command {
        Commands::Leaderboard {
            inputs,
            output,
            extraction,
        } => {
            let config = config.with_event_slots(extraction.event_slots);
            leaderboard(&inputs, &output, &config)?;
        }
        Commands::Events { input, output } => {
            convert_events(input.as_deref(), &output, cli.year)?;
        }
        Commands::Analyze { input, analysis } => {
            let table = read_wide_table(&input)?;
            analyze(&table, &analysis, config)?;
        }
        Commands::EventReport { events, output_dir } => {
            event_report(events.as_deref(), &output_dir, &config)?;
        }
        Commands::Run {
            inputs,
            output,
            extraction,
            analysis,
        } => {
            let config = config.with_event_slots(extraction.event_slots);
            let processed = extract(&inputs, &config)?;
            if let Some(output) = output {
                write_wide_table(&processed.table, &output)?;
            }
            analyze(&processed.table, &analysis, config)?;
        }
        Commands::Validate {
            input,
            division,
            extraction,
        } => {
            let config = config.with_event_slots(extraction.event_slots);
            validate(&input, division, &config)?;
        }
    }

    Ok(())
}

fn leaderboard(inputs: &[(PathBuf, Division)], output: &Path, config: &AnalysisConfig) -> Result<()> {
    let processed = extract(inputs, config)?;
    write_wide_table(&processed.table, output)?;
    println!("Done!");
    Ok(())
}

fn extract(inputs: &[(PathBuf, Division)], config: &AnalysisConfig) -> Result<ProcessedLeaderboard> {
    for (path, division) in inputs {
        println!("Processing division: {} ({})", division, path.display());
    }
    let processed =
        pipeline::process_divisions(inputs, config).context("Failed to read leaderboard HTML")?;

    for division in &processed.divisions {
        let summary = division.summary;
        println!(
            "  {}: {} athletes ({} complete, {} partial, {} skipped)",
            division.division,
            summary.parsed + summary.partial,
            summary.parsed,
            summary.partial,
            summary.skipped
        );
    }
    Ok(processed)
}

fn write_wide_table(table: &LeaderboardTable, output: &Path) -> Result<()> {
    println!("Writing leaderboard CSV: {}", output.display());
    table::write_leaderboard_file(table, output).context("Failed to write leaderboard CSV")?;
    println!("Wrote {} rows to {}", table.len(), output.display());
    Ok(())
}

fn read_wide_table(input: &Path) -> Result<LeaderboardTable> {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if ext != "csv" {
        anyhow::bail!("Unsupported input format: {}", ext);
    }

    println!("Reading leaderboard CSV: {}", input.display());
    let table = table::read_leaderboard_csv_file(input).context("Failed to read leaderboard CSV")?;
    println!("Found {} athletes across {} events", table.len(), table.events.len());
    Ok(table)
}

fn load_events(path: Option<&Path>, year: i32) -> Result<rogue_leaderboard::EventTable> {
    match path {
        Some(path) => println!("Reading event metadata: {}", path.display()),
        None => println!("Using builtin 2024 Rogue Invitational events"),
    }
    let events = pipeline::load_events(path, year).context("Failed to read event metadata")?;
    println!("Found {} events", events.len());
    Ok(events)
}

fn convert_events(input: Option<&Path>, output: &Path, year: i32) -> Result<()> {
    let events = load_events(input, year)?;
    println!("Writing events CSV: {}", output.display());
    table::write_events_file(&events, output).context("Failed to write events CSV")?;
    println!("Done!");
    Ok(())
}

fn analyze(table: &LeaderboardTable, args: &AnalysisArgs, config: AnalysisConfig) -> Result<()> {
    let config = config.with_max_placement(args.max_placement);
    let events = load_events(args.events.as_deref(), config.year)?;

    let mut output = AnalysisOutput::new(&args.output_dir);
    if let Some(xlsx) = &args.xlsx {
        output = output.with_xlsx(xlsx);
    }
    if let Some(division) = args.division {
        println!("Restricting analysis to division: {}", division);
        output = output.with_division(division);
    }

    let analysis = pipeline::analyze(table, &events, &config, &output)
        .context("Failed to write metrics")?;
    println!(
        "Kept {} placements for {} athletes",
        analysis.long.len(),
        analysis.long.athletes().len()
    );
    print_written(&analysis.files);

    println!("Done!");
    Ok(())
}

fn event_report(events_path: Option<&Path>, output_dir: &Path, config: &AnalysisConfig) -> Result<()> {
    let events = load_events(events_path, config.year)?;

    for style in rogue_leaderboard::events::style_mapping(&events, &config.style) {
        println!(
            "  {}: color {}, marker {}",
            style.event_type,
            style.color.as_deref().unwrap_or("-"),
            style.marker.as_deref().unwrap_or("-")
        );
    }

    let files = pipeline::write_event_report(&events, &config.style, output_dir)
        .context("Failed to write event report")?;
    print_written(&files);

    println!("Done!");
    Ok(())
}

fn print_written(files: &[WrittenFile]) {
    for file in files {
        match file.rows {
            Some(rows) => println!("Wrote {} rows to {}", rows, file.path.display()),
            None => println!("Wrote {}", file.path.display()),
        }
    }
}

fn validate(input: &Path, division: Division, config: &AnalysisConfig) -> Result<()> {
    let page = html::read_leaderboard_file(input, division, config)
        .context("Failed to read leaderboard HTML")?;
    let summary = page.summary();

    println!("Leaderboard page: {} ({})", input.display(), division);
    println!("  {} rows", summary.total());
    println!("  {} complete", summary.parsed);
    println!("  {} partial", summary.partial);
    println!("  {} skipped", summary.skipped);

    let issues: Vec<String> = page
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            RowOutcome::Parsed(_) => None,
            RowOutcome::Partial {
                record,
                null_events,
                unreadable,
            } => {
                let mut problems: Vec<String> =
                    unreadable.iter().map(|field| format!("unreadable {}", field)).collect();
                if !null_events.is_empty() {
                    let ids: Vec<String> = null_events.iter().map(|id| id.to_string()).collect();
                    problems.push(format!("no usable score for {}", ids.join(", ")));
                }
                Some(format!("{}: {}", record.name, problems.join("; ")))
            }
            RowOutcome::Skipped { index, reason } => Some(format!("Row {}: {}", index, reason)),
        })
        .collect();

    if issues.is_empty() {
        println!("  No issues found");
    } else {
        println!("  Issues found:");
        for issue in issues {
            println!("    - {}", issue);
        }
    }

    Ok(())
}
