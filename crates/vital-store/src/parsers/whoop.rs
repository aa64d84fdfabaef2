//! Whoop export: `physiological_cycles.csv` carries one row per daily
//! cycle with recovery, HRV, resting HR, strain, and sleep duration.

use std::path::Path;

use vital_core::errors::VitalResult;
use vital_core::fsx;
use vital_core::models::{ActivityRecord, TrackerKind};

use super::{merge_by_date, parse_date, ActivityParser, CsvTable};

const CYCLES_FILE: &str = "physiological_cycles.csv";

pub struct WhoopParser;

impl ActivityParser for WhoopParser {
    fn tracker(&self) -> TrackerKind {
        TrackerKind::Whoop
    }

    fn parse(&self, dir: &Path) -> VitalResult<Vec<ActivityRecord>> {
        let path = dir.join(CYCLES_FILE);
        if !fsx::exists(&path) {
            return Ok(Vec::new());
        }
        let text = fsx::read_to_string(&path)?;
        let Some(table) = CsvTable::parse(&text) else {
            return Ok(Vec::new());
        };

        let date_col = table.column(&["cycle start time", "cycle start"]);
        let hrv_col = table.column(&["heart rate variability (ms)", "hrv"]);
        let rhr_col = table.column(&["resting heart rate (bpm)", "resting heart rate"]);
        let recovery_col = table.column(&["recovery score %", "recovery score"]);
        let strain_col = table.column(&["day strain", "strain"]);
        let sleep_min_col = table.column(&["asleep duration (min)", "asleep duration"]);
        let sleep_score_col = table.column(&["sleep performance %", "sleep performance"]);

        let mut records = Vec::new();
        for row in &table.rows {
            let Some(date) = date_col.and_then(|i| row.get(i)).and_then(|c| parse_date(c))
            else {
                continue;
            };
            let mut record = ActivityRecord::for_date(date);
            record.hrv = table.value(row, hrv_col);
            record.resting_hr = table.value(row, rhr_col);
            record.recovery = table.value(row, recovery_col);
            record.strain = table.value(row, strain_col);
            record.sleep_hours = table.value(row, sleep_min_col).map(|m| m / 60.0);
            record.sleep_score = table.value(row, sleep_score_col);
            records.push(record);
        }
        Ok(merge_by_date(records))
    }
}
