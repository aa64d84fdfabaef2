//! Vendor activity parsers.
//!
//! Each vendor export is a folder of CSV files with its own column names
//! and units; parsers normalize them into daily `ActivityRecord`s. Parse
//! errors degrade to "no data for that file", never a hard failure.

mod fitbit;
mod garmin;
mod oura;
mod whoop;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use vital_core::errors::VitalResult;
use vital_core::fsx;
use vital_core::models::{ActivityRecord, TrackerKind};

pub use fitbit::FitbitParser;
pub use garmin::GarminParser;
pub use oura::OuraParser;
pub use whoop::WhoopParser;

/// Turns one vendor's export directory into normalized daily records.
pub trait ActivityParser: Send + Sync {
    fn tracker(&self) -> TrackerKind;

    /// Parse the export rooted at `dir`. Returns records oldest first.
    fn parse(&self, dir: &Path) -> VitalResult<Vec<ActivityRecord>>;
}

/// One parser per supported vendor.
pub fn default_parsers() -> Vec<Box<dyn ActivityParser>> {
    vec![
        Box::new(WhoopParser),
        Box::new(OuraParser),
        Box::new(GarminParser),
        Box::new(FitbitParser),
    ]
}

/// Minimal CSV reader: quote-aware field splitting, lowercased headers.
/// Vendor exports are machine-written, so this covers what they emit.
pub(crate) struct CsvTable {
    headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn parse(text: &str) -> Option<Self> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let headers = split_line(lines.next()?)
            .into_iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .collect();
        let rows = lines.map(split_line).collect();
        Some(Self { headers, rows })
    }

    /// Index of the first header matching any alias, exact match before
    /// substring match so short aliases don't shadow longer headers.
    pub fn column(&self, aliases: &[&str]) -> Option<usize> {
        for alias in aliases {
            if let Some(i) = self.headers.iter().position(|h| h == alias) {
                return Some(i);
            }
        }
        for alias in aliases {
            if let Some(i) = self.headers.iter().position(|h| h.contains(alias)) {
                return Some(i);
            }
        }
        None
    }

    pub fn value(&self, row: &[String], column: Option<usize>) -> Option<f64> {
        row.get(column?)?.trim().parse::<f64>().ok()
    }
}

fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parse a vendor date cell. Timestamps are truncated to their date part.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    if let Ok(date) = head.parse::<NaiveDate>() {
        return Some(date);
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

/// All CSV files under a directory, recursively, sorted for determinism.
pub(crate) fn csv_files(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    collect_csvs(dir, &mut out);
    out.sort();
    out
}

fn collect_csvs(dir: &Path, out: &mut Vec<PathBuf>) {
    for path in fsx::or_default(fsx::read_dir(dir)) {
        if fsx::is_dir(&path) {
            collect_csvs(&path, out);
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        {
            out.push(path.clone());
        }
    }
}

/// Collapse per-file records into one record per calendar day, oldest
/// first. First defined value per field wins.
pub(crate) fn merge_by_date(records: Vec<ActivityRecord>) -> Vec<ActivityRecord> {
    let mut by_date: BTreeMap<NaiveDate, ActivityRecord> = BTreeMap::new();
    for record in records {
        let merged = by_date
            .entry(record.date)
            .or_insert_with(|| ActivityRecord::for_date(record.date));
        merged.hrv = merged.hrv.or(record.hrv);
        merged.resting_hr = merged.resting_hr.or(record.resting_hr);
        merged.sleep_hours = merged.sleep_hours.or(record.sleep_hours);
        merged.sleep_score = merged.sleep_score.or(record.sleep_score);
        merged.recovery = merged.recovery.or(record.recovery);
        merged.strain = merged.strain.or(record.strain);
        merged.steps = merged.steps.or(record.steps);
    }
    by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let table = CsvTable::parse("name,note\nalpha,\"one, two\"\n").unwrap();
        assert_eq!(table.rows[0][1], "one, two");
    }

    #[test]
    fn column_prefers_exact_header_match() {
        let table = CsvTable::parse("sleep score,score\n80,75\n").unwrap();
        assert_eq!(table.column(&["score"]), Some(1));
        assert_eq!(table.column(&["sleep score"]), Some(0));
    }

    #[test]
    fn timestamps_truncate_to_dates() {
        assert_eq!(
            parse_date("2025-02-14 06:30:00"),
            NaiveDate::from_ymd_opt(2025, 2, 14)
        );
        assert_eq!(
            parse_date("02/14/2025"),
            NaiveDate::from_ymd_opt(2025, 2, 14)
        );
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn merge_by_date_fills_across_sources() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 14).unwrap();
        let mut sleep = ActivityRecord::for_date(date);
        sleep.sleep_hours = Some(7.5);
        let mut readiness = ActivityRecord::for_date(date);
        readiness.recovery = Some(82.0);
        readiness.sleep_hours = Some(6.0); // loses to the first record

        let merged = merge_by_date(vec![sleep, readiness]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].sleep_hours, Some(7.5));
        assert_eq!(merged[0].recovery, Some(82.0));
    }
}
