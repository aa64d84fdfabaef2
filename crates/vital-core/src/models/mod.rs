//! Data model for the Vital pipeline.
//!
//! One file per concern, plain serde structs throughout. Snapshots carry the
//! non-destructive merge semantics; everything downstream of the extraction
//! layer treats these as the single source of truth.

mod activity;
mod age;
mod biomarker;
mod bloodwork;
mod body_comp;
mod confidence;
mod document;
mod event;

pub use activity::ActivityRecord;
pub use age::DerivedAgeResult;
pub use biomarker::{Biomarker, BiomarkerStatus, LabFlag, MarkerEntry, Provenance, ReferenceRange};
pub use bloodwork::BloodworkSnapshot;
pub use body_comp::{BodyCompSnapshot, Sex};
pub use confidence::Confidence;
pub use document::{DocumentDomain, RawDocument, TrackerKind};
pub use event::{EventDomain, EventFilter, HealthEvent, Severity};
