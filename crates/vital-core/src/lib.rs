//! # vital-core
//!
//! Foundation crate for the Vital health pipeline.
//! Defines all models, errors, config, constants, and the safe-fs layer.
//! Every other crate in the workspace depends on this.

pub mod cancel;
pub mod config;
pub mod constants;
pub mod errors;
pub mod fsx;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use cancel::CancellationToken;
pub use config::VitalConfig;
pub use errors::{VitalError, VitalResult};
pub use models::{
    ActivityRecord, Biomarker, BloodworkSnapshot, BodyCompSnapshot, Confidence, DerivedAgeResult,
    DocumentDomain, EventDomain, HealthEvent, LabFlag, Provenance, RawDocument, Severity,
};
