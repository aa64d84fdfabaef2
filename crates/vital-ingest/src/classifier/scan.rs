//! Discovery walk: organized layout first, keyword heuristics second.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use vital_core::fsx;
use vital_core::models::{DocumentDomain, RawDocument};

use super::trackers::probe_tracker;
use super::types::{ClassifiedFiles, ScanStats};
use crate::hash;

/// Subtree names recognized for the organized layout, per domain.
const BLOODWORK_DIRS: &[&str] = &["bloodwork", "blood-tests", "labs"];
const DEXA_DIRS: &[&str] = &["dexa", "body-scans", "body-composition"];
const ACTIVITY_DIRS: &[&str] = &["activity", "wearables"];

/// Extensions the pipeline accepts; non-text formats are delegated to
/// opaque parsers downstream.
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "csv", "xlsx", "pdf", "xml", "json", "zip"];

/// Discovers and tags source documents under a root directory.
pub struct Classifier {
    root: PathBuf,
    max_file_size: u64,
}

impl Classifier {
    pub fn new(root: impl Into<PathBuf>, max_file_size: u64) -> Self {
        Self {
            root: root.into(),
            max_file_size,
        }
    }

    /// Run a discovery pass. All fs errors are swallowed; the worst case is
    /// an empty result.
    pub fn classify(&self) -> ClassifiedFiles {
        let start = Instant::now();

        let organized = self.find_organized_subtrees();
        let mut candidates: Vec<(PathBuf, DocumentDomain)> = Vec::new();
        let mut activity_root: Option<PathBuf> = None;

        if organized.is_empty() {
            // Legacy flat layout: classify each file by filename keywords.
            self.collect_files(&self.root, &mut |path| {
                let domain = classify_by_name(&path);
                candidates.push((path, domain));
            });
            activity_root = Some(self.root.clone());
        } else {
            for (dir, domain) in &organized {
                if *domain == DocumentDomain::Activity {
                    activity_root = Some(dir.clone());
                    // Activity exports are parsed per-vendor downstream;
                    // only the tracker probe looks inside.
                    continue;
                }
                self.collect_files(dir, &mut |path| {
                    candidates.push((path, *domain));
                });
            }
        }

        let mut skipped = 0usize;
        let mut to_hash: Vec<(PathBuf, DocumentDomain)> = Vec::new();
        for (path, domain) in candidates {
            if !has_supported_extension(&path) {
                skipped += 1;
                continue;
            }
            if fsx::file_size(&path).map(|s| s > self.max_file_size).unwrap_or(true) {
                skipped += 1;
                continue;
            }
            to_hash.push((path, domain));
        }

        // Hash in parallel; unreadable files are dropped.
        let mut documents: Vec<RawDocument> = to_hash
            .par_iter()
            .filter_map(|(path, domain)| self.build_document(path, *domain))
            .collect();
        skipped += to_hash.len() - documents.len();
        documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        let active_tracker = activity_root.as_deref().and_then(probe_tracker);

        let stats = ScanStats {
            files_found: documents.len(),
            files_skipped: skipped,
            organized_layout: !organized.is_empty(),
            duration: start.elapsed(),
        };
        debug!(
            files = stats.files_found,
            skipped = stats.files_skipped,
            organized = stats.organized_layout,
            tracker = active_tracker.as_ref().map(|t| t.kind.name()),
            elapsed_ms = stats.duration.as_millis() as u64,
            "classification pass complete"
        );

        ClassifiedFiles {
            documents,
            active_tracker,
            stats,
        }
    }

    /// Probe for the organized per-domain layout.
    fn find_organized_subtrees(&self) -> Vec<(PathBuf, DocumentDomain)> {
        let mut found = Vec::new();
        let probe = |names: &[&str], domain: DocumentDomain, out: &mut Vec<_>| {
            for name in names {
                let dir = self.root.join(name);
                if fsx::is_dir(&dir) {
                    out.push((dir, domain));
                    return;
                }
            }
        };
        probe(BLOODWORK_DIRS, DocumentDomain::Bloodwork, &mut found);
        probe(DEXA_DIRS, DocumentDomain::Dexa, &mut found);
        probe(ACTIVITY_DIRS, DocumentDomain::Activity, &mut found);
        found
    }

    /// Recursively walk a directory, invoking `visit` per file. Unreadable
    /// directories are skipped silently.
    fn collect_files(&self, dir: &Path, visit: &mut dyn FnMut(PathBuf)) {
        for path in fsx::or_default(fsx::read_dir(dir)) {
            if fsx::is_dir(&path) {
                self.collect_files(&path, visit);
            } else {
                visit(path);
            }
        }
    }

    fn build_document(&self, path: &Path, domain: DocumentDomain) -> Option<RawDocument> {
        let hash = hash::hash_file(path).ok()?;
        let modified = fsx::modified(path).ok()?;
        let relative_path = path
            .strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        Some(RawDocument {
            path: path.to_path_buf(),
            relative_path,
            domain,
            extension,
            hash,
            modified,
        })
    }
}

/// Filename-keyword heuristic for flat layouts.
fn classify_by_name(path: &Path) -> DocumentDomain {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    if name.contains("blood") || name.contains("lab") {
        DocumentDomain::Bloodwork
    } else if name.contains("dexa") || name.contains("body") {
        DocumentDomain::Dexa
    } else if name.contains("whoop")
        || name.contains("activity")
        || name.contains("hrv")
        || name.contains("sleep")
    {
        DocumentDomain::Activity
    } else {
        DocumentDomain::Unknown
    }
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn keyword_fallback_classifies_lab_results() {
        assert_eq!(
            classify_by_name(Path::new("completed-lab-result-2025.pdf")),
            DocumentDomain::Bloodwork
        );
        assert_eq!(
            classify_by_name(Path::new("dexa-scan-jan.pdf")),
            DocumentDomain::Dexa
        );
        assert_eq!(
            classify_by_name(Path::new("sleep_summary.csv")),
            DocumentDomain::Activity
        );
        assert_eq!(
            classify_by_name(Path::new("notes.txt")),
            DocumentDomain::Unknown
        );
    }

    #[test]
    fn organized_layout_takes_precedence_over_keywords() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("bloodwork")).unwrap();
        // Keyword says dexa, subtree says bloodwork.
        fs::write(root.path().join("bloodwork/body-panel.txt"), "Albumin 4.5").unwrap();

        let result = Classifier::new(root.path(), 1 << 20).classify();
        assert!(result.stats.organized_layout);
        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.documents[0].domain, DocumentDomain::Bloodwork);
    }

    #[test]
    fn flat_layout_uses_keywords() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("completed-lab-result-2025.txt"), "Glucose 85").unwrap();
        fs::write(root.path().join("unrelated.docx"), "skip me").unwrap();

        let result = Classifier::new(root.path(), 1 << 20).classify();
        assert!(!result.stats.organized_layout);
        assert_eq!(result.documents.len(), 1);
        assert_eq!(result.documents[0].domain, DocumentDomain::Bloodwork);
        assert_eq!(result.stats.files_skipped, 1);
    }

    #[test]
    fn missing_root_degrades_to_empty() {
        let result = Classifier::new("/no/such/health/dir", 1 << 20).classify();
        assert!(result.documents.is_empty());
        assert!(result.active_tracker.is_none());
    }

    #[test]
    fn oversized_files_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("labs.txt"), "x".repeat(64)).unwrap();
        let result = Classifier::new(root.path(), 16).classify();
        assert!(result.documents.is_empty());
        assert_eq!(result.stats.files_skipped, 1);
    }
}
