//! Fixed severity thresholds.
//!
//! Biomarker severity comes from the lab flag / reference range (see
//! `Biomarker::status`); everything here covers the domains where labs
//! provide no range: body composition, daily activity, and the
//! longevity delta.

use vital_core::models::{ActivityRecord, Severity};

/// Which side of a threshold is the risky one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsRisk,
    LowerIsRisk,
}

/// One body-composition metric with warning/critical cutoffs.
#[derive(Debug, Clone, Copy)]
pub struct BodyCompRule {
    /// Canonical id within `BodyCompSnapshot::KNOWN_IDS`.
    pub metric: &'static str,
    pub warning: f64,
    pub critical: f64,
    pub direction: Direction,
}

const BODY_COMP_RULES: &[BodyCompRule] = &[
    BodyCompRule {
        metric: "body_fat_percent",
        warning: 20.0,
        critical: 25.0,
        direction: Direction::HigherIsRisk,
    },
    BodyCompRule {
        metric: "lean_mass_lbs",
        warning: 120.0,
        critical: 100.0,
        direction: Direction::LowerIsRisk,
    },
    BodyCompRule {
        metric: "bone_tscore",
        warning: -1.0,
        critical: -2.5,
        direction: Direction::LowerIsRisk,
    },
    BodyCompRule {
        metric: "visceral_fat_lbs",
        warning: 2.0,
        critical: 3.5,
        direction: Direction::HigherIsRisk,
    },
];

/// The tracked body-composition metrics, in emission order.
pub fn body_comp_rules() -> &'static [BodyCompRule] {
    BODY_COMP_RULES
}

/// Classify a value against a rule. Crossing the warning cutoff in the
/// risky direction is Warning, crossing the critical cutoff is Critical.
pub fn classify_threshold(rule: &BodyCompRule, value: f64) -> Severity {
    match rule.direction {
        Direction::HigherIsRisk => {
            if value >= rule.critical {
                Severity::Critical
            } else if value >= rule.warning {
                Severity::Warning
            } else {
                Severity::Info
            }
        }
        Direction::LowerIsRisk => {
            if value <= rule.critical {
                Severity::Critical
            } else if value <= rule.warning {
                Severity::Warning
            } else {
                Severity::Info
            }
        }
    }
}

const HRV_CRITICAL_MS: f64 = 25.0;
const HRV_WARNING_MS: f64 = 35.0;
const SLEEP_CRITICAL_HOURS: f64 = 5.0;
const SLEEP_WARNING_HOURS: f64 = 6.0;
const RECOVERY_CRITICAL_PCT: f64 = 40.0;
const RECOVERY_WARNING_PCT: f64 = 60.0;

/// Severity of one day of wearable data. The worst signal wins; a day
/// with no signals at all is Info.
pub fn activity_severity(record: &ActivityRecord) -> Severity {
    let critical = record.hrv.is_some_and(|v| v < HRV_CRITICAL_MS)
        || record.sleep_hours.is_some_and(|v| v < SLEEP_CRITICAL_HOURS)
        || record.recovery.is_some_and(|v| v < RECOVERY_CRITICAL_PCT);
    if critical {
        return Severity::Critical;
    }
    let warning = record.hrv.is_some_and(|v| v < HRV_WARNING_MS)
        || record.sleep_hours.is_some_and(|v| v < SLEEP_WARNING_HOURS)
        || record.recovery.is_some_and(|v| v < RECOVERY_WARNING_PCT);
    if warning {
        Severity::Warning
    } else {
        Severity::Info
    }
}

const DELTA_CRITICAL_YEARS: f64 = 5.0;
const DELTA_WARNING_YEARS: f64 = 2.0;

/// Severity of the PhenoAge delta. Only aging faster than chronological
/// age escalates; a negative delta is good news.
pub fn longevity_severity(delta: f64) -> Severity {
    if delta > DELTA_CRITICAL_YEARS {
        Severity::Critical
    } else if delta > DELTA_WARNING_YEARS {
        Severity::Warning
    } else {
        Severity::Info
    }
}
