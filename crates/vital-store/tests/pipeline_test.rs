//! End-to-end load cycles over a temp data root, with the primary
//! extractor mocked out so the deterministic fallback carries extraction.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tempfile::TempDir;

use vital_core::config::VitalConfig;
use vital_core::errors::IngestError;
use vital_core::models::{DocumentDomain, EventDomain, EventFilter, Severity, TrackerKind};
use vital_ingest::{PlainTextSource, StructuredExtractor};
use vital_store::{default_parsers, HealthStore};

const LAB_REPORT: &str = "\
Collection Date: 01/15/2025
Albumin, Serum 4.5 g/dL
Creatinine 0.9 mg/dL
Glucose, Fasting 85 mg/dL
hs-CRP 0.5 mg/L
Lymphocytes 30 %
MCV 88 fL
RDW 12.5 %
Alkaline Phosphatase 50 U/L
WBC 5.5 10^3/uL
Total Cholesterol 180 mg/dL
HDL Cholesterol 60 mg/dL
Triglycerides 90 mg/dL
";

const DEXA_REPORT: &str = "\
Scan Date: 02/10/2025
Total Body Fat: 18.2 %
Lean Mass: 142.6 lbs
Bone Mineral Density: 1.18 g/cm2
T-Score: -0.8
";

const WHOOP_CYCLES: &str = "\
Cycle start time,Recovery score %,Resting heart rate (bpm),Heart rate variability (ms),Day Strain,Asleep duration (min)
2025-02-14 06:30:00,82,48,65,12.4,450
2025-02-15 06:10:00,55,52,38,9.1,360
";

/// Always fails, so the orchestrator falls back to pattern extraction.
/// Counts calls to observe caching and single-flight behavior.
struct CountingExtractor {
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

#[async_trait]
impl StructuredExtractor for CountingExtractor {
    fn name(&self) -> &str {
        "counting-mock"
    }

    async fn extract(&self, _domain: DocumentDomain, _text: &str) -> Result<Value, IngestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Err(IngestError::Extractor {
            reason: "mock is offline".to_string(),
        })
    }
}

fn fixture_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir(root.path().join("bloodwork")).unwrap();
    fs::write(root.path().join("bloodwork/labs-2025.txt"), LAB_REPORT).unwrap();
    fs::create_dir(root.path().join("dexa")).unwrap();
    fs::write(root.path().join("dexa/scan-2025.txt"), DEXA_REPORT).unwrap();
    fs::create_dir(root.path().join("activity")).unwrap();
    fs::write(
        root.path().join("activity/physiological_cycles.csv"),
        WHOOP_CYCLES,
    )
    .unwrap();
    root
}

fn config_for(data_root: &Path, cache_dir: &Path) -> VitalConfig {
    let mut config = VitalConfig::default();
    config.data_root = data_root.to_path_buf();
    config.cache_dir = cache_dir.to_path_buf();
    config.birth_date = Some(chrono::NaiveDate::from_ymd_opt(1990, 3, 1).unwrap());
    config.extractor.timeout_ms = 1_000;
    config
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("vital_store=debug,vital_ingest=debug")
        .with_test_writer()
        .try_init();
}

fn store_with(config: VitalConfig, calls: Arc<AtomicUsize>, delay: Duration) -> HealthStore {
    init_tracing();
    HealthStore::with_components(
        config,
        Box::new(PlainTextSource),
        Arc::new(CountingExtractor { calls, delay }),
        default_parsers(),
    )
}

#[tokio::test]
async fn full_load_through_fallback_extraction() {
    let root = fixture_root();
    let cache = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let store = store_with(
        config_for(root.path(), cache.path()),
        Arc::clone(&calls),
        Duration::ZERO,
    );

    let biomarkers = store.biomarkers().await;
    let glucose = biomarkers.iter().find(|b| b.id == "glucose").unwrap();
    assert_eq!(glucose.value, 85.0);
    // Derived ratios ride along with measured markers.
    assert!(biomarkers.iter().any(|b| b.id == "total_hdl_ratio"));

    let body_comp = store.body_comp().await;
    assert_eq!(body_comp.lean_mass_lbs, Some(142.6));

    let activity = store.activity().await;
    assert_eq!(activity.len(), 2);
    assert_eq!(activity[0].hrv, Some(65.0));

    assert!(store.chronological_age().await.is_some());
    assert!(store.pheno_age().await.is_some());

    let whoop_events = store
        .health_events(&EventFilter {
            domains: Some(vec![EventDomain::Activity]),
            ..Default::default()
        })
        .await;
    assert_eq!(whoop_events.len(), 2);
    assert!(whoop_events.iter().all(|e| e.source == TrackerKind::Whoop.name()));

    // One primary attempt per extractable document.
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    assert!(cache.path().join("manifest.json").exists());
    assert!(cache.path().join("bloodwork.json").exists());
    assert!(cache.path().join("dexa.json").exists());
}

#[tokio::test]
async fn second_store_reuses_cache_without_extraction() {
    let root = fixture_root();
    let cache = tempfile::tempdir().unwrap();

    let first_calls = Arc::new(AtomicUsize::new(0));
    let first = store_with(
        config_for(root.path(), cache.path()),
        Arc::clone(&first_calls),
        Duration::ZERO,
    );
    first.init().await;
    assert_eq!(first_calls.load(Ordering::SeqCst), 2);

    let second_calls = Arc::new(AtomicUsize::new(0));
    let second = store_with(
        config_for(root.path(), cache.path()),
        Arc::clone(&second_calls),
        Duration::ZERO,
    );
    let biomarkers = second.biomarkers().await;
    assert!(biomarkers.iter().any(|b| b.id == "glucose"));
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn edited_document_invalidates_cache() {
    let root = fixture_root();
    let cache = tempfile::tempdir().unwrap();

    store_with(
        config_for(root.path(), cache.path()),
        Arc::new(AtomicUsize::new(0)),
        Duration::ZERO,
    )
    .init()
    .await;

    // Any byte change re-extracts the domain.
    fs::write(
        root.path().join("bloodwork/labs-2025.txt"),
        LAB_REPORT.replace("85 mg/dL", "99 mg/dL"),
    )
    .unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let store = store_with(
        config_for(root.path(), cache.path()),
        Arc::clone(&calls),
        Duration::ZERO,
    );
    let biomarkers = store.biomarkers().await;
    let glucose = biomarkers.iter().find(|b| b.id == "glucose").unwrap();
    assert_eq!(glucose.value, 99.0);
    // Only the bloodwork document was re-extracted.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_root_yields_single_no_data_event() {
    let root = tempfile::tempdir().unwrap();
    let cache = tempfile::tempdir().unwrap();
    let store = store_with(
        config_for(root.path(), cache.path()),
        Arc::new(AtomicUsize::new(0)),
        Duration::ZERO,
    );

    let events = store.health_events(&EventFilter::default()).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].domain, EventDomain::System);
    assert_eq!(events[0].severity, Severity::Warning);
    assert_eq!(events[0].metric, "no_data");
}

#[tokio::test]
async fn concurrent_readers_share_one_load() {
    let root = fixture_root();
    let cache = tempfile::tempdir().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let store = Arc::new(store_with(
        config_for(root.path(), cache.path()),
        Arc::clone(&calls),
        Duration::from_millis(50),
    ));

    assert!(!store.is_loaded());
    let (a, b, c) = tokio::join!(store.biomarkers(), store.pheno_age(), store.activity());
    assert!(!a.is_empty());
    assert!(b.is_some());
    assert!(!c.is_empty());
    assert!(store.is_loaded());

    // One load cycle total: one primary attempt per document, not per reader.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn filter_applies_domain_and_limit() {
    let root = fixture_root();
    let cache = tempfile::tempdir().unwrap();
    let store = store_with(
        config_for(root.path(), cache.path()),
        Arc::new(AtomicUsize::new(0)),
        Duration::ZERO,
    );

    let limited = store
        .health_events(&EventFilter {
            domains: Some(vec![EventDomain::Biomarker]),
            severities: None,
            limit: Some(3),
        })
        .await;
    assert_eq!(limited.len(), 3);
    assert!(limited.iter().all(|e| e.domain == EventDomain::Biomarker));
}

#[tokio::test]
async fn cancelled_store_still_loads_via_fallback() {
    let root = fixture_root();
    let cache = tempfile::tempdir().unwrap();
    let store = store_with(
        config_for(root.path(), cache.path()),
        Arc::new(AtomicUsize::new(0)),
        Duration::from_secs(3600),
    );

    store.cancel();
    let biomarkers = store.biomarkers().await;
    assert!(biomarkers.iter().any(|b| b.id == "glucose"));
}
