//! Classifier result types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use vital_core::models::RawDocument;

use super::trackers::TrackerSelection;

/// Statistics for one discovery pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    /// Documents discovered and hashed.
    pub files_found: usize,
    /// Files skipped (unsupported extension, oversized, unreadable).
    pub files_skipped: usize,
    /// Whether the organized per-domain layout was detected.
    pub organized_layout: bool,
    #[serde(skip)]
    pub duration: Duration,
}

/// Result of a discovery pass: tagged documents plus the single active
/// tracker (if any folder-based wearable export matched).
#[derive(Debug, Clone, Default)]
pub struct ClassifiedFiles {
    pub documents: Vec<RawDocument>,
    pub active_tracker: Option<TrackerSelection>,
    pub stats: ScanStats,
}
