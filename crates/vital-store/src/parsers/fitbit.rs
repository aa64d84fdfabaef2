//! Fitbit Takeout export: per-metric CSVs under "Physical Activity" and
//! "Sleep". Probed the same loose way as Garmin.

use std::path::Path;

use vital_core::errors::VitalResult;
use vital_core::fsx;
use vital_core::models::{ActivityRecord, TrackerKind};

use super::{csv_files, merge_by_date, parse_date, ActivityParser, CsvTable};

const MINUTES_PER_HOUR: f64 = 60.0;

pub struct FitbitParser;

impl ActivityParser for FitbitParser {
    fn tracker(&self) -> TrackerKind {
        TrackerKind::Fitbit
    }

    fn parse(&self, dir: &Path) -> VitalResult<Vec<ActivityRecord>> {
        let mut records = Vec::new();
        for path in csv_files(dir) {
            let text = fsx::read_to_string(&path)?;
            let Some(table) = CsvTable::parse(&text) else {
                continue;
            };
            let Some(date_col) = table.column(&["date", "timestamp", "sleep_start"]) else {
                continue;
            };

            let hrv_col = table.column(&["daily_rmssd", "rmssd"]);
            let rhr_col = table.column(&["resting heart rate", "resting_heart_rate"]);
            let sleep_min_col = table.column(&["minutes asleep", "minutesasleep"]);
            let sleep_score_col = table.column(&["overall_score", "sleep score"]);
            let steps_col = table.column(&["steps", "step count"]);

            for row in &table.rows {
                let Some(date) = row.get(date_col).and_then(|c| parse_date(c)) else {
                    continue;
                };
                let mut record = ActivityRecord::for_date(date);
                record.hrv = table.value(row, hrv_col);
                record.resting_hr = table.value(row, rhr_col);
                record.sleep_hours = table.value(row, sleep_min_col).map(|m| m / MINUTES_PER_HOUR);
                record.sleep_score = table.value(row, sleep_score_col);
                record.steps = table.value(row, steps_col);
                records.push(record);
            }
        }
        Ok(merge_by_date(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_metric_files_merge_into_daily_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("sleep_score.csv"),
            "timestamp,overall_score\n2025-02-14T08:01:00Z,81\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("steps.csv"),
            "date,steps\n2025-02-14,9500\n",
        )
        .unwrap();

        let records = FitbitParser.parse(dir.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sleep_score, Some(81.0));
        assert_eq!(records[0].steps, Some(9500.0));
    }
}
