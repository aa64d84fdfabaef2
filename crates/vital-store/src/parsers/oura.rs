//! Oura export: sleep and readiness land in separate per-day CSVs and are
//! joined on the calendar date.

use std::path::Path;

use vital_core::errors::VitalResult;
use vital_core::fsx;
use vital_core::models::{ActivityRecord, TrackerKind};

use super::{merge_by_date, parse_date, ActivityParser, CsvTable};

const SECONDS_PER_HOUR: f64 = 3600.0;

pub struct OuraParser;

impl ActivityParser for OuraParser {
    fn tracker(&self) -> TrackerKind {
        TrackerKind::Oura
    }

    fn parse(&self, dir: &Path) -> VitalResult<Vec<ActivityRecord>> {
        let mut records = Vec::new();
        records.extend(parse_sleep(&dir.join("oura_sleep.csv"))?);
        records.extend(parse_readiness(&dir.join("oura_readiness.csv"))?);
        Ok(merge_by_date(records))
    }
}

fn parse_sleep(path: &Path) -> VitalResult<Vec<ActivityRecord>> {
    let Some(table) = read_table(path)? else {
        return Ok(Vec::new());
    };
    let date_col = table.column(&["date", "day"]);
    let duration_col = table.column(&["total sleep duration", "total_sleep_duration"]);
    let hrv_col = table.column(&["average hrv", "average_hrv"]);
    let rhr_col = table.column(&[
        "lowest resting heart rate",
        "lowest_heart_rate",
        "resting heart rate",
    ]);
    let score_col = table.column(&["sleep score", "score"]);

    let mut records = Vec::new();
    for row in &table.rows {
        let Some(date) = date_col.and_then(|i| row.get(i)).and_then(|c| parse_date(c)) else {
            continue;
        };
        let mut record = ActivityRecord::for_date(date);
        // Oura reports sleep duration in seconds.
        record.sleep_hours = table.value(row, duration_col).map(|s| s / SECONDS_PER_HOUR);
        record.hrv = table.value(row, hrv_col);
        record.resting_hr = table.value(row, rhr_col);
        record.sleep_score = table.value(row, score_col);
        records.push(record);
    }
    Ok(records)
}

fn parse_readiness(path: &Path) -> VitalResult<Vec<ActivityRecord>> {
    let Some(table) = read_table(path)? else {
        return Ok(Vec::new());
    };
    let date_col = table.column(&["date", "day"]);
    let score_col = table.column(&["readiness score", "score"]);

    let mut records = Vec::new();
    for row in &table.rows {
        let Some(date) = date_col.and_then(|i| row.get(i)).and_then(|c| parse_date(c)) else {
            continue;
        };
        let mut record = ActivityRecord::for_date(date);
        record.recovery = table.value(row, score_col);
        records.push(record);
    }
    Ok(records)
}

fn read_table(path: &Path) -> VitalResult<Option<CsvTable>> {
    if !fsx::exists(path) {
        return Ok(None);
    }
    let text = fsx::read_to_string(path)?;
    Ok(CsvTable::parse(&text))
}
