use serde::{Deserialize, Serialize};

/// Where a biomarker value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Measured,
    Calculated,
}

/// Lab-reported flag for a result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabFlag {
    Normal,
    High,
    Low,
}

/// Reference range for a biomarker. Either bound may be open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

/// Status of a value relative to its flag/reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiomarkerStatus {
    Normal,
    Borderline,
    OutOfRange,
}

/// A single measured or calculated physiological value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biomarker {
    /// Canonical id (see `constants::canonical_id`).
    pub id: String,
    /// Human display name.
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub reference: Option<ReferenceRange>,
    pub flag: Option<LabFlag>,
    pub category: Option<String>,
    pub provenance: Provenance,
}

impl Biomarker {
    /// Construct a measured biomarker with no range/flag metadata.
    pub fn measured(id: &str, name: &str, value: f64, unit: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            value,
            unit: unit.to_string(),
            reference: None,
            flag: None,
            category: None,
            provenance: Provenance::Measured,
        }
    }

    /// Construct a calculated (derived) biomarker.
    pub fn calculated(id: &str, name: &str, value: f64, unit: &str) -> Self {
        Self {
            provenance: Provenance::Calculated,
            ..Self::measured(id, name, value, unit)
        }
    }

    /// Status relative to the lab flag or reference range.
    ///
    /// A High/Low lab flag is authoritative. Otherwise the reference range
    /// decides: outside either bound is out-of-range, within the 10% band
    /// inside an edge is borderline. No flag and no range means normal.
    pub fn status(&self) -> BiomarkerStatus {
        match self.flag {
            Some(LabFlag::High) | Some(LabFlag::Low) => return BiomarkerStatus::OutOfRange,
            Some(LabFlag::Normal) => return BiomarkerStatus::Normal,
            None => {}
        }

        let Some(range) = self.reference else {
            return BiomarkerStatus::Normal;
        };

        let band = match (range.low, range.high) {
            (Some(lo), Some(hi)) => (hi - lo).abs() * 0.1,
            (Some(bound), None) | (None, Some(bound)) => bound.abs() * 0.1,
            (None, None) => return BiomarkerStatus::Normal,
        };

        if let Some(lo) = range.low {
            if self.value < lo {
                return BiomarkerStatus::OutOfRange;
            }
            if self.value < lo + band {
                return BiomarkerStatus::Borderline;
            }
        }
        if let Some(hi) = range.high {
            if self.value > hi {
                return BiomarkerStatus::OutOfRange;
            }
            if self.value > hi - band {
                return BiomarkerStatus::Borderline;
            }
        }
        BiomarkerStatus::Normal
    }
}

/// A marker outside the fixed snapshot schema: an ordered (id, value, unit,
/// metadata) entry preserving whatever the extractor reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub reference: Option<ReferenceRange>,
    #[serde(default)]
    pub flag: Option<LabFlag>,
    #[serde(default)]
    pub category: Option<String>,
}

impl MarkerEntry {
    pub fn to_biomarker(&self) -> Biomarker {
        Biomarker {
            id: self.id.clone(),
            name: self.name.clone(),
            value: self.value,
            unit: self.unit.clone(),
            reference: self.reference,
            flag: self.flag,
            category: self.category.clone(),
            provenance: Provenance::Measured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_with_range(value: f64, low: f64, high: f64) -> Biomarker {
        let mut m = Biomarker::measured("glucose", "Glucose", value, "mg/dL");
        m.reference = Some(ReferenceRange {
            low: Some(low),
            high: Some(high),
        });
        m
    }

    #[test]
    fn flag_overrides_range() {
        let mut m = marker_with_range(90.0, 70.0, 100.0);
        m.flag = Some(LabFlag::High);
        assert_eq!(m.status(), BiomarkerStatus::OutOfRange);
    }

    #[test]
    fn range_edges_classify() {
        // Range 70..100, band = 3.0.
        assert_eq!(
            marker_with_range(85.0, 70.0, 100.0).status(),
            BiomarkerStatus::Normal
        );
        assert_eq!(
            marker_with_range(98.5, 70.0, 100.0).status(),
            BiomarkerStatus::Borderline
        );
        assert_eq!(
            marker_with_range(104.0, 70.0, 100.0).status(),
            BiomarkerStatus::OutOfRange
        );
        assert_eq!(
            marker_with_range(71.0, 70.0, 100.0).status(),
            BiomarkerStatus::Borderline
        );
    }

    #[test]
    fn no_metadata_means_normal() {
        let m = Biomarker::measured("ferritin", "Ferritin", 80.0, "ng/mL");
        assert_eq!(m.status(), BiomarkerStatus::Normal);
    }
}
