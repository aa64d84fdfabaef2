//! File classifier: discovers source documents and tags them by domain.
//!
//! Prefers an explicit organized layout (one subtree per domain) and falls
//! back to filename-keyword heuristics for flat legacy directories. Every
//! filesystem probe degrades to "not found" — a permission error anywhere
//! yields an empty result, never a propagated error.

mod scan;
mod trackers;
mod types;

pub use scan::Classifier;
pub use trackers::{probe_tracker, TrackerSelection};
pub use types::{ClassifiedFiles, ScanStats};
