//! Formulaic derived biomarkers.
//!
//! Each is computed only when every input is defined; a missing input
//! silently skips the marker. All results carry `Provenance::Calculated`.

use vital_core::models::{Biomarker, BloodworkSnapshot};

/// HOMA-IR denominator for mg/dL glucose and uIU/mL insulin.
const HOMA_IR_DENOMINATOR: f64 = 405.0;

/// Compute all derivable ratio/index biomarkers from raw values.
pub fn calculate_derived(snapshot: &BloodworkSnapshot) -> Vec<Biomarker> {
    let mut out = Vec::new();

    if let (Some(total), Some(hdl)) = (snapshot.total_cholesterol, snapshot.hdl) {
        if hdl > 0.0 {
            out.push(Biomarker::calculated(
                "total_hdl_ratio",
                "Total Cholesterol / HDL Ratio",
                round2(total / hdl),
                "ratio",
            ));
            out.push(Biomarker::calculated(
                "non_hdl_cholesterol",
                "Non-HDL Cholesterol",
                round2(total - hdl),
                "mg/dL",
            ));
        }
    }

    if let (Some(ldl), Some(hdl)) = (snapshot.ldl, snapshot.hdl) {
        if hdl > 0.0 {
            out.push(Biomarker::calculated(
                "ldl_hdl_ratio",
                "LDL / HDL Ratio",
                round2(ldl / hdl),
                "ratio",
            ));
        }
    }

    if let (Some(trig), Some(hdl)) = (snapshot.triglycerides, snapshot.hdl) {
        if hdl > 0.0 {
            out.push(Biomarker::calculated(
                "triglyceride_hdl_ratio",
                "Triglyceride / HDL Ratio",
                round2(trig / hdl),
                "ratio",
            ));
        }
    }

    if let (Some(total), Some(hdl), Some(ldl)) =
        (snapshot.total_cholesterol, snapshot.hdl, snapshot.ldl)
    {
        out.push(Biomarker::calculated(
            "remnant_cholesterol",
            "Remnant Cholesterol",
            round2(total - hdl - ldl),
            "mg/dL",
        ));
    }

    if let (Some(glucose), Some(insulin)) = (snapshot.glucose, snapshot.insulin) {
        out.push(Biomarker::calculated(
            "homa_ir",
            "HOMA-IR",
            round2(glucose * insulin / HOMA_IR_DENOMINATOR),
            "index",
        ));
    }

    if let (Some(neutrophils), Some(lymphocytes)) = (snapshot.neutrophils, snapshot.lymphocytes) {
        if lymphocytes > 0.0 {
            out.push(Biomarker::calculated(
                "nlr",
                "Neutrophil / Lymphocyte Ratio",
                round2(neutrophils / lymphocytes),
                "ratio",
            ));
        }
    }

    if let (Some(bun), Some(creatinine)) = (snapshot.bun, snapshot.creatinine) {
        if creatinine > 0.0 {
            out.push(Biomarker::calculated(
                "bun_creatinine_ratio",
                "BUN / Creatinine Ratio",
                round2(bun / creatinine),
                "ratio",
            ));
        }
    }

    out
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
