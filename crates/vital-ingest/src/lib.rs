//! # vital-ingest
//!
//! Document discovery and extraction for the Vital pipeline:
//! - `classifier` — filesystem scan, domain tagging, tracker detection
//! - `manifest` / `cache` — content-addressed extraction cache
//! - `extract` — two-stage (primary AI + deterministic fallback) extraction

pub mod cache;
pub mod classifier;
pub mod extract;
pub mod hash;
pub mod manifest;

pub use classifier::{ClassifiedFiles, Classifier, ScanStats, TrackerSelection};
pub use extract::{
    Extraction, ExtractionOutcome, HttpExtractor, Orchestrator, PlainTextSource,
    StructuredExtractor, TextSource,
};
pub use manifest::{Manifest, ManifestEntry};
