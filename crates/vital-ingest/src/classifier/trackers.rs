//! Wearable tracker detection from folder-based exports.
//!
//! A fixed ordered list of vendor folder signatures is probed; the first
//! signature with any matching marker wins, and exactly one tracker is
//! active per load. Probe errors count as "not found".

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use vital_core::fsx;
use vital_core::models::TrackerKind;

/// The tracker chosen for this load, with the directory its export lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSelection {
    pub kind: TrackerKind,
    pub dir: PathBuf,
}

/// A vendor signature: relative markers (file or folder names) whose
/// presence under the activity root identifies the export.
struct TrackerSignature {
    kind: TrackerKind,
    markers: &'static [&'static str],
}

/// Probe order is fixed; more distinctive exports come first.
const SIGNATURES: &[TrackerSignature] = &[
    TrackerSignature {
        kind: TrackerKind::Whoop,
        markers: &["whoop", "physiological_cycles.csv", "sleeps.csv"],
    },
    TrackerSignature {
        kind: TrackerKind::Oura,
        markers: &["oura", "oura_sleep.csv", "oura_readiness.csv"],
    },
    TrackerSignature {
        kind: TrackerKind::Garmin,
        markers: &["garmin", "DI_CONNECT"],
    },
    TrackerSignature {
        kind: TrackerKind::Fitbit,
        markers: &["fitbit", "Physical Activity"],
    },
];

/// Probe the activity root for a vendor export. First signature hit wins.
pub fn probe_tracker(activity_root: &Path) -> Option<TrackerSelection> {
    if !fsx::is_dir(activity_root) {
        return None;
    }
    for signature in SIGNATURES {
        for marker in signature.markers {
            let candidate = activity_root.join(marker);
            if fsx::exists(&candidate) {
                let dir = if fsx::is_dir(&candidate) {
                    candidate
                } else {
                    activity_root.to_path_buf()
                };
                return Some(TrackerSelection {
                    kind: signature.kind,
                    dir,
                });
            }
        }
    }
    None
}
