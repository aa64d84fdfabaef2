use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::confidence::Confidence;

/// Domain of a canonical health event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventDomain {
    Biomarker,
    BodyComp,
    Activity,
    Longevity,
    System,
}

impl fmt::Display for EventDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Biomarker => "biomarker",
            Self::BodyComp => "body_comp",
            Self::Activity => "activity",
            Self::Longevity => "longevity",
            Self::System => "system",
        };
        f.write_str(s)
    }
}

/// Alerting severity, ordered by urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// A normalized, severity-tagged record of one observation, independent of
/// its source format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEvent {
    /// Stable composite key: `{domain}:{metric}:{index}:{occurred_at}`.
    /// Rerunning on unchanged input yields identical ids, so downstream
    /// dispatch (webhooks) can dedupe.
    pub id: String,
    pub domain: EventDomain,
    pub severity: Severity,
    /// Source label (lab name, scanner, tracker vendor, or "system").
    pub source: String,
    /// Canonical metric id.
    pub metric: String,
    /// Human-readable one-line summary.
    pub summary: String,
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub recorded_at: DateTime<Utc>,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl HealthEvent {
    /// Build the deterministic composite id.
    pub fn compose_id(
        domain: EventDomain,
        metric: &str,
        index: usize,
        occurred_at: DateTime<Utc>,
    ) -> String {
        format!(
            "{domain}:{metric}:{index}:{}",
            occurred_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        )
    }
}

/// Filter for the event read surface. Empty filter returns everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub domains: Option<Vec<EventDomain>>,
    pub severities: Option<Vec<Severity>>,
    pub limit: Option<usize>,
}

impl EventFilter {
    pub fn matches(&self, event: &HealthEvent) -> bool {
        if let Some(domains) = &self.domains {
            if !domains.contains(&event.domain) {
                return false;
            }
        }
        if let Some(severities) = &self.severities {
            if !severities.contains(&event.severity) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn composite_id_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let a = HealthEvent::compose_id(EventDomain::Biomarker, "glucose", 2, at);
        let b = HealthEvent::compose_id(EventDomain::Biomarker, "glucose", 2, at);
        assert_eq!(a, b);
        assert_eq!(a, "biomarker:glucose:2:2025-03-01T08:00:00Z");
    }

    #[test]
    fn severity_orders_by_urgency() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
