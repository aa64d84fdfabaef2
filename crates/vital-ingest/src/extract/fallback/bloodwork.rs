//! Fallback pattern rules for lab-report text.

use chrono::NaiveDate;

use vital_core::models::BloodworkSnapshot;

use super::{apply_rules, marker_pattern, PatternRule};

// Each pattern captures the numeric value in group 1. The gap between the
// marker name and its value excludes digits and newlines so a rule never
// reads past the result line.

marker_pattern!(
    RE_ALBUMIN,
    r"(?i)\balbumin\b[^0-9/\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_CREATININE,
    r"(?i)\bcreatinine\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_GLUCOSE,
    r"(?i)\bglucose\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_CRP,
    r"(?i)\b(?:hs[ -]?crp|c[ -]?reactive protein|crp)\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
// Percent form first ("Lymphocytes 30 %" / "Lymphocyte % 30").
marker_pattern!(
    RE_LYMPH_PCT_TRAILING,
    r"(?i)\blymph(?:ocyte)?s?\b[^0-9%\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)\s*%"
);
marker_pattern!(
    RE_LYMPH_PCT_LABEL,
    r"(?i)\blymph(?:ocyte)?s?\s*(?:%|percent)[^0-9\r\n]{0,12}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_LYMPH_ABS,
    r"(?i)\b(?:absolute\s+lymphocytes?|lymph(?:ocyte)?s?\s*\(?absolute\)?)\b[^0-9\r\n]{0,12}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(RE_MCV, r"(?i)\bmcv\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)");
marker_pattern!(
    RE_RDW,
    r"(?i)\brdw(?:[ -]?cv)?\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_ALP,
    r"(?i)\b(?:alkaline phosphatase|alk\.?\s?phos\.?|alp)\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_WBC,
    r"(?i)\b(?:wbc|white blood cells?)\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_TOTAL_CHOL,
    r"(?i)\b(?:total cholesterol|cholesterol,?\s*total)\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_LDL,
    r"(?i)\bldl(?:[ -]?c| cholesterol)?\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_HDL,
    r"(?i)\bhdl(?:[ -]?c| cholesterol)?\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_TRIGLYCERIDES,
    r"(?i)\btriglycerides?\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_HBA1C,
    r"(?i)\b(?:hemoglobin a1c|hba1c|a1c)\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
// Letter-free gap keeps "Hemoglobin A1c" from matching as plain hemoglobin.
marker_pattern!(
    RE_HEMOGLOBIN,
    r"(?i)\bhemoglobin\b[^0-9A-Za-z\r\n]{0,12}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_FERRITIN,
    r"(?i)\bferritin\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_VITAMIN_D,
    r"(?i)\b(?:vitamin d,?\s*25[ -]?oh|25[ -]?oh vitamin d|vitamin d)\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_COLLECTED_US,
    r"(?i)(?:collection date|date collected|collected)[^0-9\r\n]{0,10}([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})"
);
marker_pattern!(
    RE_COLLECTED_ISO,
    r"(?i)(?:collection date|date collected|collected)[^0-9\r\n]{0,10}([0-9]{4}-[0-9]{2}-[0-9]{2})"
);

/// Rule order: the PhenoAge panel first, then the common panels. Within a
/// field, the first matching rule wins.
fn rules() -> Vec<PatternRule> {
    vec![
        PatternRule { key: "albumin", regex: &RE_ALBUMIN },
        PatternRule { key: "creatinine", regex: &RE_CREATININE },
        PatternRule { key: "glucose", regex: &RE_GLUCOSE },
        PatternRule { key: "crp", regex: &RE_CRP },
        PatternRule { key: "lymphocyte_percent", regex: &RE_LYMPH_PCT_TRAILING },
        PatternRule { key: "lymphocyte_percent", regex: &RE_LYMPH_PCT_LABEL },
        PatternRule { key: "lymphocytes", regex: &RE_LYMPH_ABS },
        PatternRule { key: "mcv", regex: &RE_MCV },
        PatternRule { key: "rdw", regex: &RE_RDW },
        PatternRule { key: "alkaline_phosphatase", regex: &RE_ALP },
        PatternRule { key: "wbc", regex: &RE_WBC },
        PatternRule { key: "total_cholesterol", regex: &RE_TOTAL_CHOL },
        PatternRule { key: "ldl", regex: &RE_LDL },
        PatternRule { key: "hdl", regex: &RE_HDL },
        PatternRule { key: "triglycerides", regex: &RE_TRIGLYCERIDES },
        PatternRule { key: "hba1c", regex: &RE_HBA1C },
        PatternRule { key: "hemoglobin", regex: &RE_HEMOGLOBIN },
        PatternRule { key: "ferritin", regex: &RE_FERRITIN },
        PatternRule { key: "vitamin_d", regex: &RE_VITAMIN_D },
    ]
}

/// Run the bloodwork rule set over raw report text.
pub fn extract_bloodwork(text: &str) -> BloodworkSnapshot {
    let mut snapshot = BloodworkSnapshot::default();
    apply_rules(&rules(), text, &mut |key, value| {
        if snapshot.get_known(key).is_some() {
            return false;
        }
        snapshot.set_known(key, value)
    });

    snapshot.collected_at = RE_COLLECTED_US
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|c| NaiveDate::parse_from_str(c.get(1)?.as_str(), "%m/%d/%Y").ok())
        .or_else(|| {
            RE_COLLECTED_ISO
                .as_ref()
                .and_then(|re| re.captures(text))
                .and_then(|c| c.get(1)?.as_str().parse::<NaiveDate>().ok())
        });

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Collection Date: 01/15/2025
Albumin, Serum 4.5 g/dL (3.8-4.9)
Creatinine 0.9 mg/dL
Glucose, Fasting 85 mg/dL
hs-CRP 0.5 mg/L
Lymphocytes 30 %
MCV 88 fL
RDW 12.5 %
Alkaline Phosphatase 50 U/L
WBC 5.5 10^3/uL
";

    #[test]
    fn extracts_the_phenoage_panel() {
        let snap = extract_bloodwork(REPORT);
        assert_eq!(snap.albumin, Some(4.5));
        assert_eq!(snap.creatinine, Some(0.9));
        assert_eq!(snap.glucose, Some(85.0));
        assert_eq!(snap.crp, Some(0.5));
        assert_eq!(snap.lymphocyte_percent, Some(30.0));
        assert_eq!(snap.mcv, Some(88.0));
        assert_eq!(snap.rdw, Some(12.5));
        assert_eq!(snap.alkaline_phosphatase, Some(50.0));
        assert_eq!(snap.wbc, Some(5.5));
        assert_eq!(
            snap.collected_at,
            Some(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
        );
    }

    #[test]
    fn albumin_globulin_ratio_does_not_match_albumin() {
        let snap = extract_bloodwork("Albumin/Globulin Ratio 1.8");
        assert_eq!(snap.albumin, None);
    }

    #[test]
    fn hemoglobin_a1c_does_not_match_hemoglobin() {
        let snap = extract_bloodwork("Hemoglobin A1c 5.4 %\nHemoglobin 14.7 g/dL");
        assert_eq!(snap.hba1c, Some(5.4));
        assert_eq!(snap.hemoglobin, Some(14.7));
    }

    #[test]
    fn first_match_wins_per_field() {
        let snap = extract_bloodwork("Glucose 85 mg/dL\nGlucose 99 mg/dL");
        assert_eq!(snap.glucose, Some(85.0));
    }

    #[test]
    fn empty_text_yields_empty_snapshot() {
        assert_eq!(extract_bloodwork("").defined_count(), 0);
    }
}
