//! Content-addressable extraction manifest.
//!
//! Maps relative document path → {hash, domain, lastExtractedAt}. A
//! document needs extraction iff it has no entry or its stored hash differs
//! from the current content hash. The manifest is conservative: any byte
//! change invalidates, and a missing or corrupted manifest file is an empty
//! manifest, never an error.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use vital_core::errors::VitalResult;
use vital_core::fsx;
use vital_core::models::DocumentDomain;

const MANIFEST_VERSION: u32 = 1;

/// One processed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub hash: String,
    pub domain: DocumentDomain,
    pub last_extracted_at: DateTime<Utc>,
}

/// Persisted index of processed files. One entry per relative path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub entries: BTreeMap<String, ManifestEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

impl Manifest {
    /// Load from disk. Missing or malformed files yield an empty manifest.
    pub fn load(path: &Path) -> Self {
        let Ok(text) = fsx::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(&text) {
            Ok(manifest) if manifest.version == MANIFEST_VERSION => manifest,
            Ok(manifest) => {
                warn!(
                    found = manifest.version,
                    expected = MANIFEST_VERSION,
                    "manifest version mismatch, starting fresh"
                );
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "corrupt manifest treated as empty");
                Self::default()
            }
        }
    }

    /// Persist to disk as pretty JSON. Called once per load cycle.
    pub fn save(&self, path: &Path) -> VitalResult<()> {
        let json = serde_json::to_vec_pretty(self)?;
        fsx::write(path, &json)?;
        Ok(())
    }

    /// Whether a document needs (re-)extraction given its current hash.
    pub fn needs_extraction(&self, relative_path: &str, hash: &str) -> bool {
        match self.entries.get(relative_path) {
            Some(entry) => entry.hash != hash,
            None => true,
        }
    }

    /// Record a completed extraction. Replaces any existing entry for the
    /// path — one entry per path is invariant.
    pub fn update_entry(
        &mut self,
        relative_path: &str,
        hash: &str,
        domain: DocumentDomain,
        now: DateTime<Utc>,
    ) {
        self.entries.insert(
            relative_path.to_string(),
            ManifestEntry {
                hash: hash.to_string(),
                domain,
                last_extracted_at: now,
            },
        );
    }

    /// Current stored hash for a path, if any.
    pub fn hash_for(&self, relative_path: &str) -> Option<&str> {
        self.entries.get(relative_path).map(|e| e.hash.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_path_needs_extraction() {
        let manifest = Manifest::default();
        assert!(manifest.needs_extraction("labs/2025.txt", "aaaa"));
    }

    #[test]
    fn matching_hash_skips_extraction() {
        let mut manifest = Manifest::default();
        manifest.update_entry("labs/2025.txt", "aaaa", DocumentDomain::Bloodwork, Utc::now());
        assert!(!manifest.needs_extraction("labs/2025.txt", "aaaa"));
        assert!(manifest.needs_extraction("labs/2025.txt", "bbbb"));
    }

    #[test]
    fn update_replaces_existing_entry() {
        let mut manifest = Manifest::default();
        manifest.update_entry("a.txt", "h1", DocumentDomain::Bloodwork, Utc::now());
        manifest.update_entry("a.txt", "h2", DocumentDomain::Bloodwork, Utc::now());
        assert_eq!(manifest.entries.len(), 1);
        assert_eq!(manifest.hash_for("a.txt"), Some("h2"));
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(&path, "{ not json").unwrap();
        let manifest = Manifest::load(&path);
        assert!(manifest.entries.is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let mut manifest = Manifest::default();
        manifest.update_entry("labs/a.txt", "cafe", DocumentDomain::Bloodwork, Utc::now());
        manifest.save(&path).unwrap();

        let loaded = Manifest::load(&path);
        assert_eq!(loaded.hash_for("labs/a.txt"), Some("cafe"));
    }
}
