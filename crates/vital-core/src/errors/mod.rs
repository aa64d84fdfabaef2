//! Error taxonomy for the Vital pipeline.
//!
//! One enum per concern. Almost every error in this system is recovered
//! locally (fs errors degrade to empty results, extractor errors engage the
//! fallback, corrupt cache payloads become cache misses); `VitalError` exists
//! for the few seams where propagation is the right call.

mod fs_error;
mod ingest_error;
mod store_error;

pub use fs_error::FsError;
pub use ingest_error::IngestError;
pub use store_error::StoreError;

/// Top-level error type aggregating all subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum VitalError {
    #[error(transparent)]
    Fs(#[from] FsError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used across the workspace.
pub type VitalResult<T> = Result<T, VitalError>;
