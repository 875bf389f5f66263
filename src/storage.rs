use crate::models::{DetailRecord, SummaryRow};
use crate::table::{Table, Value};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Reads a CSV into a Table. Unlike the outputs, inputs are required: a
/// missing or unreadable file aborts the run before anything is written.
pub fn read_table(path: &Path) -> Result<Table> {
    let file =
        File::open(path).with_context(|| format!("Failed to read {}", path.display()))?;
    file.lock_shared()?;
    let mut reader = ReaderBuilder::new().from_reader(&file);
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to parse {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut table = Table::new(headers);
    for result in reader.records() {
        let record = result.with_context(|| format!("Failed to parse {}", path.display()))?;
        table.push_row(record.iter().map(Value::from_cell).collect());
    }
    file.unlock()?;
    Ok(table)
}

/// Writes the summary table. The header is the union of area columns across
/// all rows in first-encounter order; a vendor that never touched an area
/// gets a blank cell there.
pub fn write_summary(path: &Path, summaries: &[SummaryRow]) -> Result<()> {
    let mut area_columns: Vec<&str> = Vec::new();
    for summary in summaries {
        for (area, _) in &summary.area_pcts {
            if !area_columns.iter().any(|known| known == area) {
                area_columns.push(area);
            }
        }
    }

    let file = open_for_write(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(&file);

    let mut header = vec!["Vendor".to_string(), "Total Score (%)".to_string()];
    header.extend(area_columns.iter().map(|area| format!("{area} (%)")));
    writer.write_record(&header)?;

    for summary in summaries {
        let mut record = vec![summary.vendor.clone(), fmt_pct(summary.total_pct)];
        for area in &area_columns {
            let cell = summary.area_pct(area).map(fmt_pct).unwrap_or_default();
            record.push(cell);
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    file.unlock()?;
    Ok(())
}

pub fn write_detailed(path: &Path, details: &[DetailRecord]) -> Result<()> {
    let file = open_for_write(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(&file);
    // Written explicitly so an all-skipped run still yields a header row.
    writer.write_record([
        "Vendor",
        "Business Area",
        "Function",
        "Requirement",
        "Response",
        "Weighted Score",
        "Meets Criteria",
    ])?;
    for detail in details {
        writer.serialize(CsvDetail::from(detail))?;
    }
    writer.flush()?;
    file.unlock()?;
    Ok(())
}

/// Percentages in both output files use the same two-decimal rendering.
fn fmt_pct(value: f64) -> String {
    format!("{value:.2}")
}

fn open_for_write(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.lock_exclusive()?;
    file.set_len(0)?;
    Ok(file)
}

#[derive(serde::Serialize)]
struct CsvDetail {
    vendor: String,
    area: String,
    function: String,
    requirement: String,
    response: String,
    weighted_score: String,
    meets: &'static str,
}

impl From<&DetailRecord> for CsvDetail {
    fn from(detail: &DetailRecord) -> Self {
        CsvDetail {
            vendor: detail.vendor.clone(),
            area: detail.area.clone(),
            function: detail.function.clone(),
            requirement: detail.requirement.clone(),
            response: detail.response.clone(),
            weighted_score: fmt_pct(detail.score_pct),
            meets: detail.meets_label(),
        }
    }
}
