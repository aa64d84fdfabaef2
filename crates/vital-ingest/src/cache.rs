//! Per-domain cache payloads, stamped with the source hash that produced
//! them.
//!
//! A payload is trusted only when its stamp matches the manifest's current
//! hash for the source path. Anything else — missing file, corrupt JSON,
//! stale stamp — is a cache miss, never an error.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vital_core::errors::VitalResult;
use vital_core::fsx;

/// A cached extraction result for one domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainPayload<T> {
    /// Content hash of the source document this payload was extracted from.
    pub source_hash: String,
    pub extracted_at: DateTime<Utc>,
    pub data: T,
}

impl<T> DomainPayload<T> {
    pub fn new(source_hash: impl Into<String>, data: T, now: DateTime<Utc>) -> Self {
        Self {
            source_hash: source_hash.into(),
            extracted_at: now,
            data,
        }
    }
}

/// Load a payload, trusting it only when its stamp matches `expected_hash`.
pub fn load_payload<T: DeserializeOwned>(path: &Path, expected_hash: &str) -> Option<T> {
    let text = fsx::read_to_string(path).ok()?;
    let payload: DomainPayload<T> = match serde_json::from_str(&text) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "corrupt cache payload treated as miss");
            return None;
        }
    };
    if payload.source_hash != expected_hash {
        debug!(path = %path.display(), "cache payload stamp mismatch, miss");
        return None;
    }
    Some(payload.data)
}

/// Persist a payload. Called once per load cycle per domain.
pub fn save_payload<T: Serialize>(path: &Path, payload: &DomainPayload<T>) -> VitalResult<()> {
    let json = serde_json::to_vec_pretty(payload)?;
    fsx::write(path, &json)?;
    Ok(())
}
