//! Event stream assembly.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use vital_core::models::{
    ActivityRecord, Biomarker, BiomarkerStatus, BodyCompSnapshot, Confidence, DerivedAgeResult,
    EventDomain, HealthEvent, Provenance, Severity,
};

use crate::rules;

/// Confidence attached to values that came out of a formula rather than
/// a lab report.
const CALCULATED_CONFIDENCE: f64 = 0.9;

/// Everything the builder reads. All borrowed; the builder is pure.
#[derive(Debug, Default)]
pub struct EventBuilderInput<'a> {
    pub biomarkers: &'a [Biomarker],
    /// Collection date of the bloodwork panel, when known.
    pub collected_at: Option<NaiveDate>,
    pub body_comp: Option<&'a BodyCompSnapshot>,
    pub activity: &'a [ActivityRecord],
    /// Tracker vendor name for the activity source label.
    pub tracker: Option<&'a str>,
    pub pheno_age: Option<DerivedAgeResult>,
    /// How many of the most recent daily records become events.
    pub activity_window_days: usize,
}

/// Build the full event stream, newest first.
///
/// Deterministic for a given input and `now`: ids, order, and content
/// are all reproducible. When no domain yields anything, a single
/// system-domain warning is emitted so consumers can tell "empty data
/// root" from "pipeline never ran".
pub fn build_events(input: &EventBuilderInput<'_>, now: DateTime<Utc>) -> Vec<HealthEvent> {
    let mut events = Vec::new();

    biomarker_events(input, now, &mut events);
    if let Some(body_comp) = input.body_comp {
        body_comp_events(body_comp, now, &mut events);
    }
    activity_events(input, &mut events);
    longevity_events(input, now, &mut events);

    if events.is_empty() {
        events.push(no_data_event(now));
    }

    events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
    events
}

fn biomarker_events(
    input: &EventBuilderInput<'_>,
    now: DateTime<Utc>,
    events: &mut Vec<HealthEvent>,
) {
    let occurred_at = input.collected_at.map(midnight_utc).unwrap_or(now);
    for (index, marker) in input.biomarkers.iter().enumerate() {
        let (severity, status_word) = match marker.status() {
            BiomarkerStatus::Normal => (Severity::Info, "normal"),
            BiomarkerStatus::Borderline => (Severity::Warning, "borderline"),
            BiomarkerStatus::OutOfRange => (Severity::Critical, "out of range"),
        };
        let confidence = match marker.provenance {
            Provenance::Measured => Confidence::default(),
            Provenance::Calculated => Confidence::new(CALCULATED_CONFIDENCE),
        };
        events.push(HealthEvent {
            id: HealthEvent::compose_id(EventDomain::Biomarker, &marker.id, index, occurred_at),
            domain: EventDomain::Biomarker,
            severity,
            source: "lab".to_string(),
            metric: marker.id.clone(),
            summary: format!(
                "{} {} {} ({status_word})",
                marker.name, marker.value, marker.unit
            ),
            value: Some(marker.value),
            unit: Some(marker.unit.clone()),
            occurred_at,
            recorded_at: now,
            confidence,
            metadata: None,
        });
    }
}

fn body_comp_events(
    snapshot: &BodyCompSnapshot,
    now: DateTime<Utc>,
    events: &mut Vec<HealthEvent>,
) {
    let occurred_at = snapshot.scan_date.map(midnight_utc).unwrap_or(now);
    for (index, rule) in rules::body_comp_rules().iter().enumerate() {
        let Some(value) = snapshot.get_known(rule.metric) else {
            continue;
        };
        let (name, unit) = BodyCompSnapshot::describe(rule.metric).unwrap_or((rule.metric, ""));
        let severity = rules::classify_threshold(rule, value);
        let summary = match severity {
            Severity::Info => format!("{name} {value} {unit}"),
            Severity::Warning => {
                format!("{name} {value} {unit} past warning threshold {}", rule.warning)
            }
            Severity::Critical => {
                format!("{name} {value} {unit} past critical threshold {}", rule.critical)
            }
        };
        events.push(HealthEvent {
            id: HealthEvent::compose_id(EventDomain::BodyComp, rule.metric, index, occurred_at),
            domain: EventDomain::BodyComp,
            severity,
            source: "dexa".to_string(),
            metric: rule.metric.to_string(),
            summary,
            value: Some(value),
            unit: Some(unit.to_string()),
            occurred_at,
            recorded_at: now,
            confidence: Confidence::default(),
            metadata: None,
        });
    }
}

fn activity_events(input: &EventBuilderInput<'_>, events: &mut Vec<HealthEvent>) {
    let source = input.tracker.unwrap_or("tracker").to_string();

    let mut recent: Vec<&ActivityRecord> = input.activity.iter().collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(input.activity_window_days);

    for (index, record) in recent.iter().enumerate() {
        let occurred_at = midnight_utc(record.date);
        let severity = rules::activity_severity(record);

        let mut parts = Vec::new();
        if let Some(hrv) = record.hrv {
            parts.push(format!("HRV {hrv} ms"));
        }
        if let Some(sleep) = record.sleep_hours {
            parts.push(format!("sleep {sleep} h"));
        }
        if let Some(recovery) = record.recovery {
            parts.push(format!("recovery {recovery}%"));
        }
        let summary = if parts.is_empty() {
            format!("{} reported no signals for {}", source, record.date)
        } else {
            parts.join(", ")
        };

        events.push(HealthEvent {
            id: HealthEvent::compose_id(EventDomain::Activity, "daily_vitals", index, occurred_at),
            domain: EventDomain::Activity,
            severity,
            source: source.clone(),
            metric: "daily_vitals".to_string(),
            summary,
            value: record.hrv,
            unit: record.hrv.map(|_| "ms".to_string()),
            occurred_at,
            recorded_at: occurred_at,
            confidence: Confidence::default(),
            metadata: serde_json::to_value(record).ok(),
        });
    }
}

fn longevity_events(
    input: &EventBuilderInput<'_>,
    now: DateTime<Utc>,
    events: &mut Vec<HealthEvent>,
) {
    let Some(result) = input.pheno_age else {
        return;
    };
    let occurred_at = input.collected_at.map(midnight_utc).unwrap_or(now);
    let direction = if result.delta <= 0.0 { "younger" } else { "older" };
    events.push(HealthEvent {
        id: HealthEvent::compose_id(EventDomain::Longevity, "pheno_age", 0, occurred_at),
        domain: EventDomain::Longevity,
        severity: rules::longevity_severity(result.delta),
        source: "phenoage".to_string(),
        metric: "pheno_age".to_string(),
        summary: format!(
            "PhenoAge {} years ({:.1} years {direction} than chronological)",
            result.pheno_age,
            result.delta.abs()
        ),
        value: Some(result.pheno_age),
        unit: Some("years".to_string()),
        occurred_at,
        recorded_at: now,
        confidence: Confidence::new(CALCULATED_CONFIDENCE),
        metadata: None,
    });
}

fn no_data_event(now: DateTime<Utc>) -> HealthEvent {
    HealthEvent {
        id: HealthEvent::compose_id(EventDomain::System, "no_data", 0, now),
        domain: EventDomain::System,
        severity: Severity::Warning,
        source: "system".to_string(),
        metric: "no_data".to_string(),
        summary: "No health data found in the data root".to_string(),
        value: None,
        unit: None,
        occurred_at: now,
        recorded_at: now,
        confidence: Confidence::default(),
        metadata: None,
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vital_core::models::{LabFlag, ReferenceRange};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_input_yields_single_system_warning() {
        let events = build_events(&EventBuilderInput::default(), at(2025, 3, 1));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].domain, EventDomain::System);
        assert_eq!(events[0].severity, Severity::Warning);
        assert_eq!(events[0].metric, "no_data");
    }

    #[test]
    fn flagged_biomarker_becomes_critical_event() {
        let mut glucose = Biomarker::measured("glucose", "Glucose", 130.0, "mg/dL");
        glucose.flag = Some(LabFlag::High);
        let markers = vec![glucose];
        let input = EventBuilderInput {
            biomarkers: &markers,
            collected_at: Some(day(2025, 2, 10)),
            ..Default::default()
        };

        let events = build_events(&input, at(2025, 3, 1));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].severity, Severity::Critical);
        assert_eq!(events[0].id, "biomarker:glucose:0:2025-02-10T00:00:00Z");
        assert!(events[0].summary.contains("out of range"));
    }

    #[test]
    fn borderline_biomarker_becomes_warning() {
        let mut ldl = Biomarker::measured("ldl", "LDL Cholesterol", 99.0, "mg/dL");
        ldl.reference = Some(ReferenceRange {
            low: Some(0.0),
            high: Some(100.0),
        });
        let markers = vec![ldl];
        let input = EventBuilderInput {
            biomarkers: &markers,
            ..Default::default()
        };
        let events = build_events(&input, at(2025, 3, 1));
        assert_eq!(events[0].severity, Severity::Warning);
    }

    #[test]
    fn high_body_fat_crosses_critical_threshold() {
        let snapshot = BodyCompSnapshot {
            scan_date: Some(day(2025, 1, 20)),
            body_fat_percent: Some(26.0),
            lean_mass_lbs: Some(150.0),
            ..Default::default()
        };
        let input = EventBuilderInput {
            body_comp: Some(&snapshot),
            ..Default::default()
        };

        let events = build_events(&input, at(2025, 3, 1));
        let fat = events.iter().find(|e| e.metric == "body_fat_percent").unwrap();
        assert_eq!(fat.severity, Severity::Critical);
        let lean = events.iter().find(|e| e.metric == "lean_mass_lbs").unwrap();
        assert_eq!(lean.severity, Severity::Info);
    }

    #[test]
    fn activity_respects_window_and_ordering() {
        let records: Vec<ActivityRecord> = (1..=20)
            .map(|d| {
                let mut r = ActivityRecord::for_date(day(2025, 2, d));
                r.hrv = Some(50.0);
                r
            })
            .collect();
        let input = EventBuilderInput {
            activity: &records,
            tracker: Some("whoop"),
            activity_window_days: 14,
            ..Default::default()
        };

        let events = build_events(&input, at(2025, 3, 1));
        assert_eq!(events.len(), 14);
        // Newest first, and the oldest six days dropped.
        assert_eq!(events[0].occurred_at, midnight_utc(day(2025, 2, 20)));
        assert_eq!(events[13].occurred_at, midnight_utc(day(2025, 2, 7)));
        assert!(events.iter().all(|e| e.source == "whoop"));
    }

    #[test]
    fn low_recovery_day_is_critical() {
        let mut record = ActivityRecord::for_date(day(2025, 2, 15));
        record.recovery = Some(30.0);
        let records = vec![record];
        let input = EventBuilderInput {
            activity: &records,
            activity_window_days: 14,
            ..Default::default()
        };
        let events = build_events(&input, at(2025, 3, 1));
        assert_eq!(events[0].severity, Severity::Critical);
    }

    #[test]
    fn accelerated_aging_escalates() {
        let input = EventBuilderInput {
            pheno_age: Some(DerivedAgeResult {
                pheno_age: 42.3,
                delta: 6.3,
            }),
            ..Default::default()
        };
        let events = build_events(&input, at(2025, 3, 1));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].domain, EventDomain::Longevity);
        assert_eq!(events[0].severity, Severity::Critical);
        assert!(events[0].summary.contains("older"));
    }

    #[test]
    fn stream_is_sorted_newest_first() {
        let mut record = ActivityRecord::for_date(day(2025, 2, 25));
        record.hrv = Some(55.0);
        let records = vec![record];
        let markers = vec![Biomarker::measured("glucose", "Glucose", 85.0, "mg/dL")];
        let input = EventBuilderInput {
            biomarkers: &markers,
            collected_at: Some(day(2025, 2, 10)),
            activity: &records,
            activity_window_days: 14,
            ..Default::default()
        };

        let events = build_events(&input, at(2025, 3, 1));
        let times: Vec<_> = events.iter().map(|e| e.occurred_at).collect();
        let mut sorted = times.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(times, sorted);
        assert_eq!(events[0].domain, EventDomain::Activity);
    }
}
