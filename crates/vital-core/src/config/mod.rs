//! Pipeline configuration, deserializable from TOML.

mod defaults;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{StoreError, VitalResult};
use crate::fsx;
use crate::models::Sex;

/// Top-level configuration for the Vital pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalConfig {
    /// Root directory containing the source health documents.
    pub data_root: PathBuf,
    /// Directory holding the manifest and per-domain cache payloads.
    pub cache_dir: PathBuf,
    /// Subject birth date, used for chronological age.
    pub birth_date: Option<NaiveDate>,
    /// Subject sex, carried into body-composition snapshots.
    pub sex: Option<Sex>,
    /// Primary (AI-backed) extractor settings.
    pub extractor: ExtractorConfig,
    /// Number of trailing daily activity records converted to events.
    pub activity_window_days: usize,
    /// Files larger than this are skipped during discovery (bytes).
    pub max_file_size: u64,
}

/// Settings for the primary structured extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// HTTP endpoint of the structured extraction service.
    pub endpoint: String,
    /// Environment variable holding the API key (never stored in config).
    pub api_key_env: String,
    /// Hard timeout on a single extraction call (milliseconds).
    pub timeout_ms: u64,
    /// Minimum number of defined fields for a primary result to count as
    /// sufficient; below this the fallback extractor runs as well.
    pub min_fields: usize,
}

impl Default for VitalConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("."),
            cache_dir: PathBuf::from(defaults::DEFAULT_CACHE_DIR),
            birth_date: None,
            sex: None,
            extractor: ExtractorConfig::default(),
            activity_window_days: defaults::DEFAULT_ACTIVITY_WINDOW_DAYS,
            max_file_size: defaults::DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key_env: defaults::DEFAULT_API_KEY_ENV.to_string(),
            timeout_ms: defaults::DEFAULT_EXTRACTOR_TIMEOUT_MS,
            min_fields: defaults::DEFAULT_MIN_SUFFICIENT_FIELDS,
        }
    }
}

impl VitalConfig {
    /// Load config from a TOML file. A missing file yields defaults; a
    /// malformed file is an error (misconfiguration should be loud).
    pub fn load(path: &Path) -> VitalResult<Self> {
        if !fsx::exists(path) {
            return Ok(Self::default());
        }
        let text = fsx::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| {
            StoreError::Config {
                reason: format!("{}: {e}", path.display()),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = VitalConfig::default();
        assert_eq!(cfg.activity_window_days, 14);
        assert!(cfg.extractor.timeout_ms > 0);
        assert!(cfg.extractor.min_fields > 0);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = VitalConfig::load(Path::new("/no/such/vital.toml")).unwrap();
        assert_eq!(cfg.max_file_size, VitalConfig::default().max_file_size);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vital.toml");
        std::fs::write(&path, "data_root = \"/tmp/health\"\nbirth_date = \"1990-06-15\"\n")
            .unwrap();
        let cfg = VitalConfig::load(&path).unwrap();
        assert_eq!(cfg.data_root, PathBuf::from("/tmp/health"));
        assert_eq!(
            cfg.birth_date,
            Some(NaiveDate::from_ymd_opt(1990, 6, 15).unwrap())
        );
        assert_eq!(cfg.extractor.min_fields, 3);
    }
}
