//! # vital-store
//!
//! The async facade over the whole pipeline. A `HealthStore` lazily runs
//! one load cycle (discovery, cached/primary/fallback extraction, metric
//! derivation, event building) on first access; concurrent callers share
//! the single in-flight load, and the result is held for the lifetime of
//! the store.

pub mod parsers;
mod pipeline;
mod state;
mod store;

pub use parsers::{default_parsers, ActivityParser};
pub use state::HealthState;
pub use store::HealthStore;
