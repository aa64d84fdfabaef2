//! # vital-events
//!
//! Pure mapping from the merged health state into an ordered,
//! severity-tagged `HealthEvent` stream. No I/O; rerunning on unchanged
//! input yields byte-identical events (ids included), which downstream
//! dispatch relies on for dedupe.

mod builder;
mod rules;

pub use builder::{build_events, EventBuilderInput};
pub use rules::{
    activity_severity, body_comp_rules, classify_threshold, longevity_severity, BodyCompRule,
    Direction,
};
