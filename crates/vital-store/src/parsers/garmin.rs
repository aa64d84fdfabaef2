//! Garmin Connect export: wellness CSVs scattered under `DI_CONNECT`.
//! Column names vary by export vintage, so every CSV in the tree is
//! probed with a loose alias table.

use std::path::Path;

use vital_core::errors::VitalResult;
use vital_core::fsx;
use vital_core::models::{ActivityRecord, TrackerKind};

use super::{csv_files, merge_by_date, parse_date, ActivityParser, CsvTable};

pub struct GarminParser;

impl ActivityParser for GarminParser {
    fn tracker(&self) -> TrackerKind {
        TrackerKind::Garmin
    }

    fn parse(&self, dir: &Path) -> VitalResult<Vec<ActivityRecord>> {
        let mut records = Vec::new();
        for path in csv_files(dir) {
            let text = fsx::read_to_string(&path)?;
            let Some(table) = CsvTable::parse(&text) else {
                continue;
            };
            let Some(date_col) = table.column(&["calendar date", "calendardate", "date"]) else {
                continue;
            };

            let hrv_col = table.column(&["hrv", "heart rate variability"]);
            let rhr_col = table.column(&["resting heart rate", "restingheartrate", "rhr"]);
            let sleep_sec_col = table.column(&["sleep seconds", "sleepdurationinseconds"]);
            let sleep_hr_col = table.column(&["sleep hours", "hours of sleep"]);
            let steps_col = table.column(&["total steps", "totalsteps", "steps"]);

            for row in &table.rows {
                let Some(date) = row.get(date_col).and_then(|c| parse_date(c)) else {
                    continue;
                };
                let mut record = ActivityRecord::for_date(date);
                record.hrv = table.value(row, hrv_col);
                record.resting_hr = table.value(row, rhr_col);
                record.sleep_hours = table
                    .value(row, sleep_sec_col)
                    .map(|s| s / 3600.0)
                    .or_else(|| table.value(row, sleep_hr_col));
                record.steps = table.value(row, steps_col);
                records.push(record);
            }
        }
        Ok(merge_by_date(records))
    }
}
