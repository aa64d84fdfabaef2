/// Filesystem errors, always carrying the offending path.
///
/// The `fsx` wrappers map these to defaults at the call site — no fs error
/// surfaces past the classifier or cache layers.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("read failed for {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("write failed for {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("metadata unavailable for {path}: {source}")]
    Metadata {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
