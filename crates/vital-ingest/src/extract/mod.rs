//! Two-stage structured extraction.
//!
//! Primary: an AI-backed `StructuredExtractor` (opaque network call,
//! bounded by timeout and cancellation). Fallback: deterministic regex
//! rules over the same text. The decision between them is an explicit
//! branch on a tagged outcome, not exception-driven flow.

pub mod fallback;
mod orchestrator;
mod primary;
mod text;

pub use orchestrator::{Extraction, ExtractionOutcome, Orchestrator};
pub use primary::{HttpExtractor, StructuredExtractor};
pub use text::{PlainTextSource, TextSource};
