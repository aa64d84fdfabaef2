//! Extraction orchestrator: primary call, sufficiency gate, fallback merge.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::warn;

use vital_core::cancel::CancellationToken;
use vital_core::errors::IngestError;
use vital_core::models::{BloodworkSnapshot, BodyCompSnapshot, DocumentDomain};

use super::fallback;
use super::primary::StructuredExtractor;

/// How the cancellation token is polled while the primary call runs.
const CANCEL_POLL: Duration = Duration::from_millis(50);

/// Which stage produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Primary extractor succeeded and met the sufficiency threshold.
    Primary,
    /// Fallback rules ran (primary failed, timed out, was cancelled, or was
    /// insufficient) and something was extracted.
    Fallback,
    /// Nothing could be extracted; the snapshot is empty.
    Failed,
}

/// Tagged extraction result.
#[derive(Debug, Clone)]
pub struct Extraction<T> {
    pub outcome: ExtractionOutcome,
    pub snapshot: T,
}

/// Runs the two-stage extraction per document.
pub struct Orchestrator {
    extractor: Arc<dyn StructuredExtractor>,
    timeout: Duration,
    min_fields: usize,
}

impl Orchestrator {
    pub fn new(extractor: Arc<dyn StructuredExtractor>, timeout: Duration, min_fields: usize) -> Self {
        Self {
            extractor,
            timeout,
            min_fields,
        }
    }

    /// Extract a bloodwork snapshot from report text.
    pub async fn extract_bloodwork(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Extraction<BloodworkSnapshot> {
        match self.run_primary(DocumentDomain::Bloodwork, text, cancel).await {
            Ok(value) => {
                let primary = BloodworkSnapshot::from_json(&value);
                if primary.defined_count() >= self.min_fields {
                    return Extraction {
                        outcome: ExtractionOutcome::Primary,
                        snapshot: primary,
                    };
                }
                warn!(
                    found = primary.defined_count(),
                    required = self.min_fields,
                    "primary bloodwork extraction insufficient, engaging fallback"
                );
                let mut merged = primary;
                merged.merge_from(&fallback::extract_bloodwork(text));
                finish(merged, |s| s.defined_count())
            }
            Err(e) => {
                warn!(error = %e, "primary bloodwork extraction failed, engaging fallback");
                finish(fallback::extract_bloodwork(text), |s| s.defined_count())
            }
        }
    }

    /// Extract a body-composition snapshot from scan text.
    pub async fn extract_dexa(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Extraction<BodyCompSnapshot> {
        match self.run_primary(DocumentDomain::Dexa, text, cancel).await {
            Ok(value) => {
                let primary = BodyCompSnapshot::from_json(&value);
                if primary.defined_count() >= self.min_fields {
                    return Extraction {
                        outcome: ExtractionOutcome::Primary,
                        snapshot: primary,
                    };
                }
                warn!(
                    found = primary.defined_count(),
                    required = self.min_fields,
                    "primary dexa extraction insufficient, engaging fallback"
                );
                let mut merged = primary;
                merged.merge_from(&fallback::extract_dexa(text));
                finish(merged, |s| s.defined_count())
            }
            Err(e) => {
                warn!(error = %e, "primary dexa extraction failed, engaging fallback");
                finish(fallback::extract_dexa(text), |s| s.defined_count())
            }
        }
    }

    /// Run the primary extractor bounded by the timeout and the cooperative
    /// cancellation token.
    async fn run_primary(
        &self,
        domain: DocumentDomain,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<serde_json::Value, IngestError> {
        let fut = self.extractor.extract(domain, text);
        tokio::pin!(fut);
        let deadline = time::sleep(self.timeout);
        tokio::pin!(deadline);
        let mut cancel_poll = time::interval(CANCEL_POLL);

        loop {
            tokio::select! {
                result = &mut fut => return result,
                _ = &mut deadline => {
                    return Err(IngestError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    });
                }
                _ = cancel_poll.tick() => {
                    if cancel.is_cancelled() {
                        return Err(IngestError::Cancelled);
                    }
                }
            }
        }
    }
}

/// Tag a fallback result: empty means total unavailability, which degrades
/// to an empty snapshot rather than an error.
fn finish<T>(snapshot: T, count: impl Fn(&T) -> usize) -> Extraction<T> {
    let outcome = if count(&snapshot) == 0 {
        ExtractionOutcome::Failed
    } else {
        ExtractionOutcome::Fallback
    };
    Extraction { outcome, snapshot }
}
