//! Canonical marker id normalization.
//!
//! Labs report the same quantity under many names ("LDL-C", "LDL
//! Cholesterol", "ldl cholesterol calc"). Everything funnels through
//! `canonical_id` before a value enters a snapshot, so dedup and lookups
//! operate on one id per quantity.

/// Alias → canonical id table. Keys are already slug-normalized
/// (lowercase, `[ _-]` collapsed to `_`).
const ALIASES: &[(&str, &str)] = &[
    ("ldl_c", "ldl"),
    ("ldl_cholesterol", "ldl"),
    ("ldl_cholesterol_calc", "ldl"),
    ("hdl_c", "hdl"),
    ("hdl_cholesterol", "hdl"),
    ("cholesterol", "total_cholesterol"),
    ("cholesterol_total", "total_cholesterol"),
    ("total_chol", "total_cholesterol"),
    ("trig", "triglycerides"),
    ("triglyceride", "triglycerides"),
    ("c_reactive_protein", "crp"),
    ("hs_crp", "crp"),
    ("high_sensitivity_crp", "crp"),
    ("alp", "alkaline_phosphatase"),
    ("alk_phos", "alkaline_phosphatase"),
    ("white_blood_cells", "wbc"),
    ("white_blood_cell_count", "wbc"),
    ("red_blood_cells", "rbc"),
    ("red_blood_cell_count", "rbc"),
    ("mean_corpuscular_volume", "mcv"),
    ("red_cell_distribution_width", "rdw"),
    ("rdw_cv", "rdw"),
    ("fasting_glucose", "glucose"),
    ("glucose_fasting", "glucose"),
    ("hemoglobin_a1c", "hba1c"),
    ("a1c", "hba1c"),
    ("hgb_a1c", "hba1c"),
    ("vitamin_d_25_oh", "vitamin_d"),
    ("25_oh_vitamin_d", "vitamin_d"),
    ("lymphs", "lymphocytes"),
    ("absolute_lymphocytes", "lymphocytes"),
    ("lymphocytes_absolute", "lymphocytes"),
    ("lymphocyte_pct", "lymphocyte_percent"),
    ("lymphs_percent", "lymphocyte_percent"),
    ("lymphocytes_percent", "lymphocyte_percent"),
    ("absolute_neutrophils", "neutrophils"),
    ("neutrophils_absolute", "neutrophils"),
    ("blood_urea_nitrogen", "bun"),
    ("urea_nitrogen", "bun"),
    ("thyroid_stimulating_hormone", "tsh"),
    ("hgb", "hemoglobin"),
    ("hct", "hematocrit"),
    ("platelet_count", "platelets"),
];

/// Normalize a raw marker name to its canonical id.
///
/// Lowercases, collapses separators to `_`, strips surrounding noise, then
/// applies the alias table. Unknown names pass through slug-normalized.
pub fn canonical_id(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut last_sep = true;
    for ch in raw.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_sep = false;
        } else if !last_sep {
            slug.push('_');
            last_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }

    for (alias, canonical) in ALIASES {
        if slug == *alias {
            return (*canonical).to_string();
        }
    }
    slug
}
