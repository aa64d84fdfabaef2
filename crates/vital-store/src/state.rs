use vital_core::models::{
    ActivityRecord, Biomarker, BloodworkSnapshot, BodyCompSnapshot, DerivedAgeResult, HealthEvent,
    TrackerKind,
};
use vital_ingest::ScanStats;

/// The fully loaded, immutable result of one load cycle.
///
/// Handed out behind an `Arc`; nothing mutates it after the pipeline
/// finishes.
#[derive(Debug, Clone, Default)]
pub struct HealthState {
    pub bloodwork: BloodworkSnapshot,
    pub body_comp: BodyCompSnapshot,
    /// Daily records from the active tracker, oldest first.
    pub activity: Vec<ActivityRecord>,
    pub tracker: Option<TrackerKind>,
    /// Measured markers followed by calculated ones.
    pub biomarkers: Vec<Biomarker>,
    pub pheno_age: Option<DerivedAgeResult>,
    pub chronological_age: Option<f64>,
    /// Severity-tagged event stream, newest first.
    pub events: Vec<HealthEvent>,
    pub scan_stats: ScanStats,
}
