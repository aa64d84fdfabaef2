use serde::{Deserialize, Serialize};

/// Biological-age estimate derived from the PhenoAge panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedAgeResult {
    /// PhenoAge in years, clamped to [0, 150], one decimal.
    pub pheno_age: f64,
    /// pheno_age − chronological age, one decimal. Negative is younger.
    pub delta: f64,
}
