/// Extraction-layer errors (text sources and the structured extractor).
///
/// An insufficient primary result is not an error: the orchestrator tags
/// it in the extraction outcome and merges the fallback instead.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("structured extractor failed: {reason}")]
    Extractor { reason: String },

    #[error("structured extractor timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("structured extraction cancelled")]
    Cancelled,

    #[error("malformed extractor response: {reason}")]
    MalformedResponse { reason: String },
}
