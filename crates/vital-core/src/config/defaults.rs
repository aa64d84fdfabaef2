//! Default configuration values.

pub const DEFAULT_CACHE_DIR: &str = ".vital-cache";
pub const DEFAULT_API_KEY_ENV: &str = "VITAL_EXTRACTOR_API_KEY";
pub const DEFAULT_EXTRACTOR_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MIN_SUFFICIENT_FIELDS: usize = 3;
pub const DEFAULT_ACTIVITY_WINDOW_DAYS: usize = 14;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
