use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain classification of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentDomain {
    Bloodwork,
    Dexa,
    Activity,
    Unknown,
}

impl fmt::Display for DocumentDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bloodwork => "bloodwork",
            Self::Dexa => "dexa",
            Self::Activity => "activity",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Wearable vendor identified from a folder-based export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    Whoop,
    Oura,
    Garmin,
    Fitbit,
}

impl TrackerKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Whoop => "whoop",
            Self::Oura => "oura",
            Self::Garmin => "garmin",
            Self::Fitbit => "fitbit",
        }
    }
}

/// A discovered source document, tagged and content-hashed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the scan root — the manifest key.
    pub relative_path: String,
    /// Domain tag from the classifier.
    pub domain: DocumentDomain,
    /// Lowercased file extension.
    pub extension: String,
    /// xxh3 content hash, zero-padded hex.
    pub hash: String,
    /// Last-modified timestamp.
    pub modified: DateTime<Utc>,
}
