//! Shortlist core library (used by the server and integration tests).
//!
//! Turns uploaded PDF payloads into a bounded suitability score:
//!
//! - [`extract`] parses a raw PDF payload and recovers its plain text.
//! - [`scoring`] matches that text against a fixed [`KeywordTaxonomy`] and
//!   folds per-category results into a single score in `[0, 100]`.
//! - [`offload`] owns the bounded [`WorkerPool`] that keeps both of those
//!   CPU-bound stages off the request-handling path.
//! - [`config`] loads the `SHORTLIST_*` environment configuration.
//!
//! The HTTP surface lives in the `shortlist-server` crate; everything here
//! is transport-agnostic and returns explicit `Result` types so the
//! server's error taxonomy can be derived without downcasting.

pub mod config;
pub mod extract;
pub mod offload;
pub mod scoring;

pub use config::{Config, ConfigError};
pub use extract::{ExtractError, ExtractedText, PDF_MAGIC, PdfExtractor};
pub use offload::{DEFAULT_WORKER_COUNT, OffloadError, WorkerPool};
pub use scoring::{
    CATEGORY_MATCH_WEIGHT, CategoryScore, KeywordScorer, KeywordTaxonomy, MAX_SCORE, ScoringError,
};
