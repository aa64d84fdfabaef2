//! Bloodwork snapshot: fixed schema of well-known numeric fields plus an
//! ordered list of extra markers.
//!
//! The fixed fields are the ones downstream calculations read (PhenoAge
//! panel, lipid/metabolic ratios); everything else a lab reports lands in
//! `markers`. Merge semantics are the pipeline's core invariant: a defined
//! value is never overwritten by an absence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::canonical_id;
use crate::models::biomarker::{Biomarker, MarkerEntry};

macro_rules! known_fields {
    ($( ($field:ident, $id:literal, $name:literal, $unit:literal) ),* $(,)?) => {
        /// Sparse bloodwork snapshot. All fields optional; absent means
        /// "never observed", not zero.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct BloodworkSnapshot {
            /// Collection date of the most recently merged panel.
            pub collected_at: Option<NaiveDate>,
            $( pub $field: Option<f64>, )*
            /// Markers outside the fixed schema, in arrival order.
            pub markers: Vec<MarkerEntry>,
        }

        impl BloodworkSnapshot {
            /// Canonical ids of the fixed schema, in declaration order.
            pub const KNOWN_IDS: &'static [&'static str] = &[ $( $id ),* ];

            /// Merge `other` into `self`: other's defined values win, self's
            /// values survive wherever other is undefined. Extra markers
            /// dedupe by canonical id, first occurrence wins.
            pub fn merge_from(&mut self, other: &BloodworkSnapshot) {
                if other.collected_at.is_some() {
                    self.collected_at = other.collected_at;
                }
                $( if other.$field.is_some() { self.$field = other.$field; } )*
                for marker in &other.markers {
                    self.push_marker(marker.clone());
                }
            }

            /// Number of defined values (fixed fields + extra markers).
            pub fn defined_count(&self) -> usize {
                let mut count = self.markers.len();
                $( if self.$field.is_some() { count += 1; } )*
                count
            }

            /// Set a fixed field by canonical id. Returns false when the id
            /// is outside the fixed schema.
            pub fn set_known(&mut self, id: &str, value: f64) -> bool {
                match id {
                    $( $id => { self.$field = Some(value); true } )*
                    _ => false,
                }
            }

            /// Read a fixed field by canonical id.
            pub fn get_known(&self, id: &str) -> Option<f64> {
                match id {
                    $( $id => self.$field, )*
                    _ => None,
                }
            }

            /// Add a marker, normalizing its id. Ids matching a fixed field
            /// route there (unless the field is already defined); other ids
            /// append to `markers` unless already present.
            pub fn push_marker(&mut self, mut marker: MarkerEntry) {
                marker.id = canonical_id(&marker.id);
                if Self::KNOWN_IDS.contains(&marker.id.as_str()) {
                    if self.get_known(&marker.id).is_none() {
                        self.set_known(&marker.id, marker.value);
                    }
                    return;
                }
                if self.markers.iter().any(|m| m.id == marker.id) {
                    return;
                }
                self.markers.push(marker);
            }

            /// Build from a loosely-typed JSON object. Only declared field
            /// names are accepted; non-numeric values for numeric fields are
            /// dropped. Extra markers arrive under a `markers` array.
            pub fn from_json(value: &serde_json::Value) -> Self {
                let mut snap = Self::default();
                $(
                    if let Some(v) = value.get($id).and_then(|v| v.as_f64()) {
                        snap.$field = Some(v);
                    }
                )*
                if let Some(date) = value
                    .get("collected_at")
                    .and_then(|v| v.as_str())
                    .and_then(|s| s.parse::<NaiveDate>().ok())
                {
                    snap.collected_at = Some(date);
                }
                if let Some(extras) = value.get("markers").and_then(|v| v.as_array()) {
                    for extra in extras {
                        if let Ok(marker) =
                            serde_json::from_value::<MarkerEntry>(extra.clone())
                        {
                            snap.push_marker(marker);
                        }
                    }
                }
                snap
            }

            /// All measured biomarkers for display: fixed fields first (in
            /// declaration order), then extra markers in arrival order.
            pub fn measured_biomarkers(&self) -> Vec<Biomarker> {
                let mut out = Vec::new();
                $(
                    if let Some(v) = self.$field {
                        out.push(Biomarker::measured($id, $name, v, $unit));
                    }
                )*
                for marker in &self.markers {
                    out.push(marker.to_biomarker());
                }
                out
            }
        }
    };
}

known_fields![
    (albumin, "albumin", "Albumin", "g/dL"),
    (creatinine, "creatinine", "Creatinine", "mg/dL"),
    (glucose, "glucose", "Glucose", "mg/dL"),
    (crp, "crp", "C-Reactive Protein", "mg/L"),
    (lymphocyte_percent, "lymphocyte_percent", "Lymphocytes", "%"),
    (lymphocytes, "lymphocytes", "Lymphocytes (Absolute)", "cells/uL"),
    (neutrophils, "neutrophils", "Neutrophils (Absolute)", "cells/uL"),
    (mcv, "mcv", "Mean Corpuscular Volume", "fL"),
    (rdw, "rdw", "Red Cell Distribution Width", "%"),
    (
        alkaline_phosphatase,
        "alkaline_phosphatase",
        "Alkaline Phosphatase",
        "U/L"
    ),
    (wbc, "wbc", "White Blood Cells", "10^3/uL"),
    (rbc, "rbc", "Red Blood Cells", "10^6/uL"),
    (hemoglobin, "hemoglobin", "Hemoglobin", "g/dL"),
    (hematocrit, "hematocrit", "Hematocrit", "%"),
    (platelets, "platelets", "Platelets", "10^3/uL"),
    (
        total_cholesterol,
        "total_cholesterol",
        "Total Cholesterol",
        "mg/dL"
    ),
    (ldl, "ldl", "LDL Cholesterol", "mg/dL"),
    (hdl, "hdl", "HDL Cholesterol", "mg/dL"),
    (triglycerides, "triglycerides", "Triglycerides", "mg/dL"),
    (hba1c, "hba1c", "Hemoglobin A1c", "%"),
    (insulin, "insulin", "Insulin", "uIU/mL"),
    (vitamin_d, "vitamin_d", "Vitamin D, 25-OH", "ng/mL"),
    (tsh, "tsh", "TSH", "uIU/mL"),
    (ferritin, "ferritin", "Ferritin", "ng/mL"),
    (bun, "bun", "Blood Urea Nitrogen", "mg/dL"),
    (testosterone, "testosterone", "Testosterone, Total", "ng/dL"),
];
