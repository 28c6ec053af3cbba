use crate::error::Result;
use crate::metrics::MetricReport;
use crate::reshape::LongTable;
use crate::table::ensure_parent_dir;
use rust_xlsxwriter::{ConditionalFormat3ColorScale, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn text(s: impl ToString) -> Self {
        Cell::Text(s.to_string())
    }

    fn number(v: impl Into<f64>) -> Self {
        Cell::Number(v.into())
    }

    fn optional(v: Option<f64>) -> Self {
        v.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

/// One worksheet's worth of tabular data
struct Sheet {
    name: &'static str,
    columns: Vec<(&'static str, f64)>,
    rows: Vec<Vec<Cell>>,
    /// Placement-like columns colored green (low) to red (high)
    placement_columns: Vec<u16>,
}

/// Write the long table and every metric to one workbook, a sheet each
pub fn write_metrics_to_xlsx(long: &LongTable, report: &MetricReport, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut workbook = Workbook::new();

    for sheet in build_sheets(long, report) {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, &sheet)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn build_sheets(long: &LongTable, report: &MetricReport) -> Vec<Sheet> {
    vec![
        Sheet {
            name: "Placements",
            columns: vec![
                ("Athlete", 24.0),
                ("Division", 10.0),
                ("Event", 8.0),
                ("Event Type", 28.0),
                ("Intensity", 10.0),
                ("Day", 10.0),
                ("Placement", 10.0),
            ],
            rows: long
                .entries()
                .iter()
                .map(|e| {
                    vec![
                        Cell::text(&e.athlete),
                        Cell::text(e.division),
                        Cell::text(e.event_id),
                        e.event_type.as_ref().map(Cell::text).unwrap_or(Cell::Empty),
                        Cell::optional(e.intensity_level.map(f64::from)),
                        e.day.map(Cell::text).unwrap_or(Cell::Empty),
                        Cell::number(e.placement),
                    ]
                })
                .collect(),
            placement_columns: vec![6],
        },
        Sheet {
            name: "Consistency",
            columns: vec![
                ("Athlete", 24.0),
                ("Division", 10.0),
                ("Events", 8.0),
                ("Consistency", 12.0),
            ],
            rows: report
                .consistency
                .iter()
                .map(|c| {
                    vec![
                        Cell::text(&c.athlete),
                        Cell::text(c.division),
                        Cell::number(c.events as u32),
                        Cell::optional(c.score),
                    ]
                })
                .collect(),
            placement_columns: vec![3],
        },
        Sheet {
            name: "Trend",
            columns: vec![
                ("Athlete", 24.0),
                ("Division", 10.0),
                ("Day", 10.0),
                ("Mean Placement", 14.0),
                ("Change", 10.0),
            ],
            rows: report
                .trend
                .iter()
                .map(|t| {
                    vec![
                        Cell::text(&t.athlete),
                        Cell::text(t.division),
                        Cell::text(t.day),
                        Cell::number(t.mean_placement),
                        Cell::optional(t.change),
                    ]
                })
                .collect(),
            placement_columns: vec![3],
        },
        Sheet {
            name: "Trend Total",
            columns: vec![
                ("Athlete", 24.0),
                ("Division", 10.0),
                ("Days", 8.0),
                ("Total Change", 12.0),
            ],
            rows: report
                .trend_total
                .iter()
                .map(|t| {
                    vec![
                        Cell::text(&t.athlete),
                        Cell::text(t.division),
                        Cell::number(t.days as u32),
                        Cell::optional(t.total_change),
                    ]
                })
                .collect(),
            placement_columns: vec![3],
        },
        Sheet {
            name: "Specialization",
            columns: vec![
                ("Athlete", 24.0),
                ("Division", 10.0),
                ("Event Type", 28.0),
                ("Mean Placement", 14.0),
            ],
            rows: report
                .specialization
                .iter()
                .map(|s| {
                    vec![
                        Cell::text(&s.athlete),
                        Cell::text(s.division),
                        Cell::text(&s.event_type),
                        Cell::number(s.mean_placement),
                    ]
                })
                .collect(),
            placement_columns: vec![3],
        },
        Sheet {
            name: "Versatility",
            columns: vec![
                ("Athlete", 24.0),
                ("Division", 10.0),
                ("Event Types", 12.0),
                ("Versatility", 12.0),
            ],
            rows: report
                .versatility
                .iter()
                .map(|v| {
                    vec![
                        Cell::text(&v.athlete),
                        Cell::text(v.division),
                        Cell::number(v.event_types as u32),
                        Cell::optional(v.score),
                    ]
                })
                .collect(),
            placement_columns: vec![3],
        },
        Sheet {
            name: "Specialization Summary",
            columns: vec![
                ("Athlete", 24.0),
                ("Division", 10.0),
                ("Mean Placement", 14.0),
                ("Versatility", 12.0),
            ],
            rows: report
                .specialization_summary
                .iter()
                .map(|s| {
                    vec![
                        Cell::text(&s.athlete),
                        Cell::text(s.division),
                        Cell::number(s.mean_of_type_means),
                        Cell::optional(s.versatility),
                    ]
                })
                .collect(),
            placement_columns: vec![2, 3],
        },
        Sheet {
            name: "Clutch",
            columns: vec![
                ("Athlete", 24.0),
                ("Division", 10.0),
                ("Events", 8.0),
                ("Clutch Placement", 16.0),
            ],
            rows: report
                .clutch
                .iter()
                .map(|c| {
                    vec![
                        Cell::text(&c.athlete),
                        Cell::text(c.division),
                        Cell::number(c.events as u32),
                        Cell::number(c.mean_placement),
                    ]
                })
                .collect(),
            placement_columns: vec![3],
        },
    ]
}

fn write_sheet(sheet: &mut Worksheet, data: &Sheet) -> Result<()> {
    sheet.set_name(data.name)?;

    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin);
    let left_format = Format::new().set_align(FormatAlign::Left);
    let number_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_num_format("0.00");

    for (col, (header, width)) in data.columns.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (row_idx, cells) in data.rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string_with_format(row, col, text, &left_format)?;
                }
                Cell::Number(value) => {
                    sheet.write_number_with_format(row, col, *value, &number_format)?;
                }
                Cell::Empty => {}
            }
        }
    }

    if !data.rows.is_empty() {
        let last_row = data.rows.len() as u32;
        let last_col = (data.columns.len() - 1) as u16;
        sheet.set_freeze_panes(1, 0)?;
        sheet.autofilter(0, 0, last_row, last_col)?;

        let placement_scale = ConditionalFormat3ColorScale::new()
            .set_minimum_color("63BE7B") // Green
            .set_midpoint_color("FFEB84") // Yellow
            .set_maximum_color("F8696B"); // Red

        for &col in &data.placement_columns {
            sheet.add_conditional_format(1, col, last_row, col, &placement_scale)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, Division, EventId, EventTable, PlacementEntry};

    #[test]
    fn test_sheets_cover_every_metric() {
        let long = LongTable::from_entries(vec![PlacementEntry {
            athlete: "A".to_string(),
            division: Division::Men,
            event_id: EventId::new(1),
            event_type: Some("Strength".to_string()),
            intensity_level: Some(5),
            day: Some(Day::Friday),
            placement: 3,
        }]);
        let report = MetricReport::compute(&long, &EventTable::default());
        let sheets = build_sheets(&long, &report);

        let names: Vec<&str> = sheets.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "Placements",
                "Consistency",
                "Trend",
                "Trend Total",
                "Specialization",
                "Versatility",
                "Specialization Summary",
                "Clutch",
            ]
        );
        assert_eq!(sheets[0].rows.len(), 1);
        assert_eq!(sheets[5].rows.len(), report.versatility.len());
        assert_eq!(sheets[6].rows.len(), report.specialization_summary.len());
        assert_eq!(sheets[6].rows.len(), 1);
        for sheet in &sheets {
            for row in &sheet.rows {
                assert_eq!(row.len(), sheet.columns.len());
            }
        }
    }

    #[test]
    fn test_write_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("metrics.xlsx");
        write_metrics_to_xlsx(&LongTable::default(), &MetricReport::default(), &path).unwrap();
        assert!(path.exists());
    }
}
