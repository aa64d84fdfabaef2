//! One load cycle: discovery, per-domain extraction (cache, primary,
//! fallback), metric derivation, event building, cache persistence.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use vital_core::cancel::CancellationToken;
use vital_core::config::VitalConfig;
use vital_core::models::{
    BloodworkSnapshot, BodyCompSnapshot, DocumentDomain, RawDocument, TrackerKind,
};
use vital_events::{build_events, EventBuilderInput};
use vital_ingest::cache::{self, DomainPayload};
use vital_ingest::hash::hash_bytes;
use vital_ingest::{
    Classifier, ExtractionOutcome, Manifest, Orchestrator, StructuredExtractor, TextSource,
};
use vital_metrics::{calculate_derived, calculate_pheno_age};

use crate::parsers::ActivityParser;
use crate::state::HealthState;

const MANIFEST_FILE: &str = "manifest.json";
const BLOODWORK_PAYLOAD: &str = "bloodwork.json";
const DEXA_PAYLOAD: &str = "dexa.json";
const DAYS_PER_YEAR: f64 = 365.25;

pub(crate) struct PipelineDeps<'a> {
    pub config: &'a VitalConfig,
    pub text_source: &'a dyn TextSource,
    pub extractor: Arc<dyn StructuredExtractor>,
    pub parsers: &'a [Box<dyn ActivityParser>],
    pub cancel: &'a CancellationToken,
}

/// Run a full load cycle. Infallible by design: every failure degrades to
/// an absence and the worst case is an empty state with a no-data event.
pub(crate) async fn run(deps: PipelineDeps<'_>, now: DateTime<Utc>) -> HealthState {
    let config = deps.config;
    let classified = Classifier::new(&config.data_root, config.max_file_size).classify();

    let manifest_path = config.cache_dir.join(MANIFEST_FILE);
    let mut manifest = Manifest::load(&manifest_path);

    let orchestrator = Orchestrator::new(
        deps.extractor,
        Duration::from_millis(config.extractor.timeout_ms),
        config.extractor.min_fields,
    );

    let blood_docs: Vec<&RawDocument> = docs_for(&classified.documents, DocumentDomain::Bloodwork);
    let dexa_docs: Vec<&RawDocument> = docs_for(&classified.documents, DocumentDomain::Dexa);

    let bloodwork = load_bloodwork(
        &blood_docs,
        config,
        &mut manifest,
        deps.text_source,
        &orchestrator,
        deps.cancel,
        now,
    )
    .await;
    let mut body_comp = load_dexa(
        &dexa_docs,
        config,
        &mut manifest,
        deps.text_source,
        &orchestrator,
        deps.cancel,
        now,
    )
    .await;
    if body_comp.sex.is_none() {
        body_comp.sex = config.sex;
    }

    let (activity, tracker) = load_activity(&classified, deps.parsers);

    let chronological_age = config
        .birth_date
        .map(|birth| (now.date_naive() - birth).num_days() as f64 / DAYS_PER_YEAR);
    let pheno_age =
        chronological_age.and_then(|age| calculate_pheno_age(&bloodwork, age));

    let mut biomarkers = bloodwork.measured_biomarkers();
    biomarkers.extend(calculate_derived(&bloodwork));

    let events = build_events(
        &EventBuilderInput {
            biomarkers: &biomarkers,
            collected_at: bloodwork.collected_at,
            body_comp: Some(&body_comp),
            activity: &activity,
            tracker: tracker.map(TrackerKind::name),
            pheno_age,
            activity_window_days: config.activity_window_days,
        },
        now,
    );

    if let Err(e) = manifest.save(&manifest_path) {
        warn!(error = %e, "failed to persist manifest");
    }

    debug!(
        biomarkers = biomarkers.len(),
        activity_days = activity.len(),
        events = events.len(),
        pheno_age = pheno_age.map(|r| r.pheno_age),
        "load cycle complete"
    );

    HealthState {
        bloodwork,
        body_comp,
        activity,
        tracker,
        biomarkers,
        pheno_age,
        chronological_age,
        events,
        scan_stats: classified.stats,
    }
}

fn docs_for(documents: &[RawDocument], domain: DocumentDomain) -> Vec<&RawDocument> {
    documents.iter().filter(|d| d.domain == domain).collect()
}

/// Stamp for a whole domain: a hash over its sorted (path, hash) pairs, so
/// adding, removing, or editing any document invalidates the payload.
fn domain_stamp(docs: &[&RawDocument]) -> String {
    let mut joined = String::new();
    for doc in docs {
        joined.push_str(&doc.relative_path);
        joined.push('\0');
        joined.push_str(&doc.hash);
        joined.push('\n');
    }
    hash_bytes(joined.as_bytes())
}

async fn load_bloodwork(
    docs: &[&RawDocument],
    config: &VitalConfig,
    manifest: &mut Manifest,
    text_source: &dyn TextSource,
    orchestrator: &Orchestrator,
    cancel: &CancellationToken,
    now: DateTime<Utc>,
) -> BloodworkSnapshot {
    let payload_path = config.cache_dir.join(BLOODWORK_PAYLOAD);
    let stamp = domain_stamp(docs);

    let all_current = docs
        .iter()
        .all(|d| !manifest.needs_extraction(&d.relative_path, &d.hash));
    if all_current {
        if let Some(snapshot) = cache::load_payload::<BloodworkSnapshot>(&payload_path, &stamp) {
            debug!(docs = docs.len(), "bloodwork cache hit");
            return snapshot;
        }
    }

    let mut merged = BloodworkSnapshot::default();
    for doc in docs {
        let Some(text) = document_text(doc, text_source) else {
            manifest.update_entry(&doc.relative_path, &doc.hash, doc.domain, now);
            continue;
        };
        let extraction = orchestrator.extract_bloodwork(&text, cancel).await;
        if extraction.outcome == ExtractionOutcome::Failed {
            warn!(path = %doc.relative_path, "no bloodwork fields extracted");
        }
        merged.merge_from(&extraction.snapshot);
        manifest.update_entry(&doc.relative_path, &doc.hash, doc.domain, now);
    }

    persist_payload(&payload_path, &stamp, &merged, merged.defined_count(), now);
    merged
}

async fn load_dexa(
    docs: &[&RawDocument],
    config: &VitalConfig,
    manifest: &mut Manifest,
    text_source: &dyn TextSource,
    orchestrator: &Orchestrator,
    cancel: &CancellationToken,
    now: DateTime<Utc>,
) -> BodyCompSnapshot {
    let payload_path = config.cache_dir.join(DEXA_PAYLOAD);
    let stamp = domain_stamp(docs);

    let all_current = docs
        .iter()
        .all(|d| !manifest.needs_extraction(&d.relative_path, &d.hash));
    if all_current {
        if let Some(snapshot) = cache::load_payload::<BodyCompSnapshot>(&payload_path, &stamp) {
            debug!(docs = docs.len(), "dexa cache hit");
            return snapshot;
        }
    }

    let mut merged = BodyCompSnapshot::default();
    for doc in docs {
        let Some(text) = document_text(doc, text_source) else {
            manifest.update_entry(&doc.relative_path, &doc.hash, doc.domain, now);
            continue;
        };
        let extraction = orchestrator.extract_dexa(&text, cancel).await;
        if extraction.outcome == ExtractionOutcome::Failed {
            warn!(path = %doc.relative_path, "no body-composition fields extracted");
        }
        merged.merge_from(&extraction.snapshot);
        manifest.update_entry(&doc.relative_path, &doc.hash, doc.domain, now);
    }

    persist_payload(&payload_path, &stamp, &merged, merged.defined_count(), now);
    merged
}

/// Raw text for a document, or `None` when unreadable or empty (opaque
/// binary formats without a converter fall out here).
fn document_text(doc: &RawDocument, text_source: &dyn TextSource) -> Option<String> {
    match text_source.extract_text(&doc.path) {
        Ok(text) if text.trim().is_empty() => {
            debug!(path = %doc.relative_path, "no text available, skipping");
            None
        }
        Ok(text) => Some(text),
        Err(e) => {
            warn!(path = %doc.relative_path, error = %e, "text extraction failed");
            None
        }
    }
}

/// Persist a domain payload. Empty extractions are not cached so the next
/// load retries them.
fn persist_payload<T: serde::Serialize>(
    path: &std::path::Path,
    stamp: &str,
    data: &T,
    defined: usize,
    now: DateTime<Utc>,
) {
    if defined == 0 {
        return;
    }
    if let Err(e) = cache::save_payload(path, &DomainPayload::new(stamp, data, now)) {
        warn!(path = %path.display(), error = %e, "failed to persist cache payload");
    }
}

fn load_activity(
    classified: &vital_ingest::ClassifiedFiles,
    parsers: &[Box<dyn ActivityParser>],
) -> (Vec<vital_core::models::ActivityRecord>, Option<TrackerKind>) {
    let Some(selection) = &classified.active_tracker else {
        return (Vec::new(), None);
    };
    let Some(parser) = parsers.iter().find(|p| p.tracker() == selection.kind) else {
        warn!(tracker = selection.kind.name(), "no parser registered for tracker");
        return (Vec::new(), Some(selection.kind));
    };
    match parser.parse(&selection.dir) {
        Ok(records) => {
            debug!(
                tracker = selection.kind.name(),
                days = records.len(),
                "activity export parsed"
            );
            (records, Some(selection.kind))
        }
        Err(e) => {
            warn!(tracker = selection.kind.name(), error = %e, "activity parse failed");
            (Vec::new(), Some(selection.kind))
        }
    }
}
