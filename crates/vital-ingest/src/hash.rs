//! Content hashing for cache invalidation.

use std::path::Path;

use xxhash_rust::xxh3::xxh3_64;

use vital_core::errors::FsError;
use vital_core::fsx;

/// xxh3 hash of a byte slice, zero-padded hex.
pub fn hash_bytes(bytes: &[u8]) -> String {
    format!("{:016x}", xxh3_64(bytes))
}

/// xxh3 hash of a file's contents.
pub fn hash_file(path: &Path) -> Result<String, FsError> {
    fsx::read(path).map(|bytes| hash_bytes(&bytes))
}
