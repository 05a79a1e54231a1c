use anyhow::Result;
use api::RouteRow;
use serde::Serialize;

use crate::time::fmt_clock;

/// The current result set as CSV, one line per row in server order. Flags
/// stay as their wire integers; times become clock strings.
pub fn rows_to_csv(rows: &[RouteRow]) -> Result<String> {
    let mut out = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut out);
        for row in rows {
            writer.serialize(ExportRow {
                route: row.route_id.0.clone(),
                branch: row.branch_label().to_string(),
                reduced: row.reduced as u8,
                holiday: row.holiday as u8,
                saturday: row.saturday as u8,
                sunday: row.sunday as u8,
                weekday: row.weekday as u8,
                first_run: fmt_clock(row.first_run_seconds),
                last_run: fmt_clock(row.last_run_seconds),
                total_trips: row.total_trips,
                most_frequent_minutes: row.most_frequent_minutes,
                least_frequent_minutes: row.least_frequent_minutes,
            })?;
        }
        writer.flush()?;
    }
    let out = String::from_utf8(out)?;
    Ok(out)
}

#[derive(Serialize)]
struct ExportRow {
    route: String,
    branch: String,
    reduced: u8,
    holiday: u8,
    saturday: u8,
    sunday: u8,
    weekday: u8,
    first_run: String,
    last_run: String,
    total_trips: Option<usize>,
    most_frequent_minutes: Option<f64>,
    least_frequent_minutes: Option<f64>,
}
