//! Shared constants: canonical marker ids and alias normalization.

mod aliases;

pub use aliases::canonical_id;
