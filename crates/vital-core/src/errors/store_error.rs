/// Store/coordinator errors. Cache-dir problems never land here: payload
/// and manifest writes degrade to a logged warning.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("config error: {reason}")]
    Config { reason: String },
}
