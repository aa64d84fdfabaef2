//! # vital-metrics
//!
//! Pure calculations over a bloodwork snapshot: formulaic derived
//! biomarkers and the PhenoAge biological-age estimate. No I/O anywhere in
//! this crate.

mod derived;
mod phenoage;

pub use derived::calculate_derived;
pub use phenoage::{calculate_pheno_age, PhenoAgeInputs};
