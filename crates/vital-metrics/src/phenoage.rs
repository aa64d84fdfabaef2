//! PhenoAge biological-age estimate (Levine 2018).
//!
//! ```text
//! xb  = intercept + Σ weight_i · marker_i + weight_age · age
//! m   = 1 − exp(−exp(xb) · (exp(120γ) − 1) / γ)        (120-month mortality)
//! age = 141.50225 + ln(−0.00553 · ln(1 − m)) / 0.090165
//! ```
//!
//! Units as labs report them: albumin g/dL, creatinine mg/dL, glucose mg/dL
//! (converted to mmol/L here), CRP mg/L (ln, floored), lymphocytes %, MCV fL,
//! RDW %, ALP U/L, WBC 10^3/uL. The result is clamped to [0, 150] and
//! rounded to one decimal. All nine markers are required; a missing one
//! short-circuits to `None` before any arithmetic.

use vital_core::models::{BloodworkSnapshot, DerivedAgeResult};

const INTERCEPT: f64 = -19.9067;
const W_ALBUMIN: f64 = -0.0336;
const W_CREATININE: f64 = 0.0095;
const W_GLUCOSE: f64 = 0.1953;
const W_LN_CRP: f64 = 0.0954;
const W_LYMPH_PCT: f64 = -0.0120;
const W_MCV: f64 = 0.0268;
const W_RDW: f64 = 0.3306;
const W_ALP: f64 = 0.00188;
const W_WBC: f64 = 0.0554;
const W_AGE: f64 = 0.0804;

/// Gompertz shape parameter for the 120-month mortality conversion.
const GAMMA: f64 = 0.0077;
/// mg/dL → mmol/L for glucose.
const GLUCOSE_MGDL_PER_MMOL: f64 = 18.02;
/// CRP floor so ln(CRP) is defined at CRP = 0.
const CRP_FLOOR: f64 = 0.01;
/// Mortality risk is clamped strictly below 1 so ln(1 − m) stays finite.
const MAX_MORTALITY: f64 = 1.0 - 1e-10;

/// The nine required inputs, gathered from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhenoAgeInputs {
    pub albumin: f64,
    pub creatinine: f64,
    pub glucose: f64,
    pub crp: f64,
    pub lymphocyte_percent: f64,
    pub mcv: f64,
    pub rdw: f64,
    pub alkaline_phosphatase: f64,
    pub wbc: f64,
}

impl PhenoAgeInputs {
    /// Gather inputs from a snapshot. Lymphocyte percentage falls back to
    /// derivation from absolute count and WBC when absent:
    /// `% = lymphocytes / (wbc × 1000) × 100`.
    pub fn from_snapshot(snapshot: &BloodworkSnapshot) -> Option<Self> {
        let wbc = snapshot.wbc?;
        let lymphocyte_percent = snapshot.lymphocyte_percent.or_else(|| {
            let absolute = snapshot.lymphocytes?;
            if wbc <= 0.0 {
                return None;
            }
            Some(absolute / (wbc * 1000.0) * 100.0)
        })?;
        Some(Self {
            albumin: snapshot.albumin?,
            creatinine: snapshot.creatinine?,
            glucose: snapshot.glucose?,
            crp: snapshot.crp?,
            lymphocyte_percent,
            mcv: snapshot.mcv?,
            rdw: snapshot.rdw?,
            alkaline_phosphatase: snapshot.alkaline_phosphatase?,
            wbc,
        })
    }
}

/// Compute PhenoAge and its delta against chronological age.
///
/// Returns `None` when any required biomarker is missing. Never panics and
/// never returns a non-finite value: CRP is floored before the log, the
/// mortality risk is clamped below 1, and the final age is clamped to
/// [0, 150].
pub fn calculate_pheno_age(
    snapshot: &BloodworkSnapshot,
    chronological_age: f64,
) -> Option<DerivedAgeResult> {
    let inputs = PhenoAgeInputs::from_snapshot(snapshot)?;

    let glucose_mmol = inputs.glucose / GLUCOSE_MGDL_PER_MMOL;
    let ln_crp = inputs.crp.max(CRP_FLOOR).ln();

    let xb = INTERCEPT
        + W_ALBUMIN * inputs.albumin
        + W_CREATININE * inputs.creatinine
        + W_GLUCOSE * glucose_mmol
        + W_LN_CRP * ln_crp
        + W_LYMPH_PCT * inputs.lymphocyte_percent
        + W_MCV * inputs.mcv
        + W_RDW * inputs.rdw
        + W_ALP * inputs.alkaline_phosphatase
        + W_WBC * inputs.wbc
        + W_AGE * chronological_age;

    let mortality = 1.0 - (-xb.exp() * ((120.0 * GAMMA).exp() - 1.0) / GAMMA).exp();
    let mortality = mortality.clamp(0.0, MAX_MORTALITY);

    let pheno_age = 141.50225 + (-0.00553 * (1.0 - mortality).ln()).ln() / 0.090165;
    let pheno_age = round1(pheno_age.clamp(0.0, 150.0));
    let delta = round1(pheno_age - chronological_age);

    Some(DerivedAgeResult { pheno_age, delta })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
