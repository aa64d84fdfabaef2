//! Fallback pattern rules for DEXA-scan text.
//!
//! Scan reports are line-oriented, so the ambiguous metrics ("Fat Mass" vs
//! "Visceral Fat Mass") anchor to line starts.

use chrono::NaiveDate;

use vital_core::models::BodyCompSnapshot;

use super::{apply_rules, marker_pattern, PatternRule};

marker_pattern!(
    RE_BODY_FAT,
    r"(?i)\b(?:total body fat|body fat)\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_VISCERAL_FAT,
    r"(?i)\bvisceral (?:adipose tissue|fat)(?:\s+mass)?\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_FAT_MASS,
    r"(?im)^\s*(?:total\s+)?fat\s+mass\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_LEAN_MASS,
    r"(?i)\b(?:total\s+)?lean\s+(?:body\s+)?mass\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_TOTAL_MASS,
    r"(?im)^\s*total\s+(?:body\s+)?mass\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_BMD,
    r"(?i)\b(?:bone mineral density|bmd)\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_TSCORE,
    r"(?i)\bt[ -]?score\b[^0-9\-\r\n]{0,15}(-?[0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(
    RE_ZSCORE,
    r"(?i)\bz[ -]?score\b[^0-9\-\r\n]{0,15}(-?[0-9]+(?:\.[0-9]+)?)"
);
marker_pattern!(RE_BMI, r"(?i)\bbmi\b[^0-9\r\n]{0,20}([0-9]+(?:\.[0-9]+)?)");
marker_pattern!(
    RE_SCAN_DATE_US,
    r"(?i)(?:scan date|exam date|measured)[^0-9\r\n]{0,10}([0-9]{1,2}/[0-9]{1,2}/[0-9]{4})"
);
marker_pattern!(
    RE_SCAN_DATE_ISO,
    r"(?i)(?:scan date|exam date|measured)[^0-9\r\n]{0,10}([0-9]{4}-[0-9]{2}-[0-9]{2})"
);

/// Visceral fat before fat mass so the more specific line claims its value.
fn rules() -> Vec<PatternRule> {
    vec![
        PatternRule { key: "body_fat_percent", regex: &RE_BODY_FAT },
        PatternRule { key: "visceral_fat_lbs", regex: &RE_VISCERAL_FAT },
        PatternRule { key: "fat_mass_lbs", regex: &RE_FAT_MASS },
        PatternRule { key: "lean_mass_lbs", regex: &RE_LEAN_MASS },
        PatternRule { key: "total_mass_lbs", regex: &RE_TOTAL_MASS },
        PatternRule { key: "bone_density", regex: &RE_BMD },
        PatternRule { key: "bone_tscore", regex: &RE_TSCORE },
        PatternRule { key: "bone_zscore", regex: &RE_ZSCORE },
        PatternRule { key: "bmi", regex: &RE_BMI },
    ]
}

/// Run the DEXA rule set over raw scan text.
pub fn extract_dexa(text: &str) -> BodyCompSnapshot {
    let mut snapshot = BodyCompSnapshot::default();
    apply_rules(&rules(), text, &mut |key, value| {
        if snapshot.get_known(key).is_some() {
            return false;
        }
        snapshot.set_known(key, value)
    });

    snapshot.scan_date = RE_SCAN_DATE_US
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|c| NaiveDate::parse_from_str(c.get(1)?.as_str(), "%m/%d/%Y").ok())
        .or_else(|| {
            RE_SCAN_DATE_ISO
                .as_ref()
                .and_then(|re| re.captures(text))
                .and_then(|c| c.get(1)?.as_str().parse::<NaiveDate>().ok())
        });

    snapshot
}
