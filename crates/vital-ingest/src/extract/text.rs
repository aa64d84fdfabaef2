//! Raw-text source collaborator.
//!
//! PDF/XLSX-to-text conversion is an external concern; the pipeline only
//! requires this trait. An empty string means "nothing to extract from this
//! document" and skips it — it is not an error.

use std::path::Path;

use vital_core::errors::VitalResult;
use vital_core::fsx;

/// Produces raw text for a document.
pub trait TextSource: Send + Sync {
    fn extract_text(&self, path: &Path) -> VitalResult<String>;
}

/// Default source: reads plain-text formats directly, returns empty text
/// for opaque binary formats (pdf, xlsx, zip) so hosts without a converter
/// still degrade cleanly.
pub struct PlainTextSource;

const TEXT_EXTENSIONS: &[&str] = &["txt", "csv", "xml", "json"];

impl TextSource for PlainTextSource {
    fn extract_text(&self, path: &Path) -> VitalResult<String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if !TEXT_EXTENSIONS.contains(&ext.as_str()) {
            return Ok(String::new());
        }
        Ok(fsx::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_formats_yield_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, b"%PDF-1.4 ...").unwrap();
        let text = PlainTextSource.extract_text(&path).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn text_formats_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labs.txt");
        std::fs::write(&path, "Glucose 85 mg/dL").unwrap();
        let text = PlainTextSource.extract_text(&path).unwrap();
        assert_eq!(text, "Glucose 85 mg/dL");
    }
}
