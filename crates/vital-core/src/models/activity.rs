use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of wearable data from a single source.
///
/// Vendor parsers normalize their exports into this shape; the pipeline
/// never sees vendor-specific formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub date: NaiveDate,
    /// Heart-rate variability (ms).
    pub hrv: Option<f64>,
    /// Resting heart rate (bpm).
    pub resting_hr: Option<f64>,
    pub sleep_hours: Option<f64>,
    /// Vendor sleep score (0-100).
    pub sleep_score: Option<f64>,
    /// Recovery percentage (0-100).
    pub recovery: Option<f64>,
    /// Vendor strain/load score.
    pub strain: Option<f64>,
    pub steps: Option<f64>,
}

impl ActivityRecord {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            hrv: None,
            resting_hr: None,
            sleep_hours: None,
            sleep_score: None,
            recovery: None,
            strain: None,
            steps: None,
        }
    }
}
