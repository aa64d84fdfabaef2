//! The `HealthStore` facade.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::OnceCell;

use vital_core::cancel::CancellationToken;
use vital_core::config::VitalConfig;
use vital_core::models::{
    ActivityRecord, Biomarker, BodyCompSnapshot, DerivedAgeResult, EventFilter, HealthEvent,
};
use vital_ingest::{HttpExtractor, PlainTextSource, StructuredExtractor, TextSource};

use crate::parsers::{default_parsers, ActivityParser};
use crate::pipeline::{self, PipelineDeps};
use crate::state::HealthState;

/// Lazily loaded, single-flight health store.
///
/// The first call to any read method triggers one load cycle; concurrent
/// callers await that same cycle rather than starting their own. The
/// loaded state is immutable for the store's lifetime — a fresh look at
/// the data root means a fresh store.
pub struct HealthStore {
    config: VitalConfig,
    text_source: Box<dyn TextSource>,
    extractor: Arc<dyn StructuredExtractor>,
    parsers: Vec<Box<dyn ActivityParser>>,
    cancel: CancellationToken,
    state: OnceCell<Arc<HealthState>>,
}

impl HealthStore {
    /// Production wiring: plain-text source, HTTP primary extractor, all
    /// vendor parsers.
    pub fn new(config: VitalConfig) -> Self {
        let extractor: Arc<dyn StructuredExtractor> =
            Arc::new(HttpExtractor::from_config(&config.extractor));
        Self::with_components(config, Box::new(PlainTextSource), extractor, default_parsers())
    }

    /// Custom wiring, used by hosts with their own converters and by tests.
    pub fn with_components(
        config: VitalConfig,
        text_source: Box<dyn TextSource>,
        extractor: Arc<dyn StructuredExtractor>,
        parsers: Vec<Box<dyn ActivityParser>>,
    ) -> Self {
        Self {
            config,
            text_source,
            extractor,
            parsers,
            cancel: CancellationToken::new(),
            state: OnceCell::new(),
        }
    }

    /// The loaded state, running the load cycle on first call.
    pub async fn state(&self) -> Arc<HealthState> {
        self.state
            .get_or_init(|| async {
                let deps = PipelineDeps {
                    config: &self.config,
                    text_source: self.text_source.as_ref(),
                    extractor: Arc::clone(&self.extractor),
                    parsers: &self.parsers,
                    cancel: &self.cancel,
                };
                Arc::new(pipeline::run(deps, Utc::now()).await)
            })
            .await
            .clone()
    }

    /// Eagerly run the load cycle.
    pub async fn init(&self) {
        let _ = self.state().await;
    }

    pub fn is_loaded(&self) -> bool {
        self.state.initialized()
    }

    /// Request cooperative cancellation of in-flight primary extraction.
    /// The load still completes via fallback extraction.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Measured and calculated biomarkers.
    pub async fn biomarkers(&self) -> Vec<Biomarker> {
        self.state().await.biomarkers.clone()
    }

    pub async fn body_comp(&self) -> BodyCompSnapshot {
        self.state().await.body_comp.clone()
    }

    /// Daily activity records from the active tracker, oldest first.
    pub async fn activity(&self) -> Vec<ActivityRecord> {
        self.state().await.activity.clone()
    }

    pub async fn pheno_age(&self) -> Option<DerivedAgeResult> {
        self.state().await.pheno_age
    }

    pub async fn chronological_age(&self) -> Option<f64> {
        self.state().await.chronological_age
    }

    /// Filtered view of the event stream, newest first. The limit applies
    /// after domain/severity filtering.
    pub async fn health_events(&self, filter: &EventFilter) -> Vec<HealthEvent> {
        let state = self.state().await;
        let limit = filter.limit.unwrap_or(usize::MAX);
        state
            .events
            .iter()
            .filter(|e| filter.matches(e))
            .take(limit)
            .cloned()
            .collect()
    }
}
