use std::sync::Arc;

use shortlist::extract::PdfExtractor;
use shortlist::offload::WorkerPool;
use shortlist::scoring::KeywordScorer;

/// Per-process dependencies handed to every request handler.
///
/// The worker pool is the only shared mutable resource; the extractor is
/// stateless and the scorer's taxonomy is read-only after startup.
#[derive(Clone)]
pub struct HandlerState {
    pub pool: Arc<WorkerPool>,

    pub extractor: Arc<PdfExtractor>,

    pub scorer: Arc<KeywordScorer>,

    /// Authoritative upload size ceiling; a payload of exactly this size
    /// is accepted.
    pub max_size_bytes: u64,
}

impl HandlerState {
    pub fn new(
        pool: Arc<WorkerPool>,
        extractor: Arc<PdfExtractor>,
        scorer: Arc<KeywordScorer>,
        max_size_bytes: u64,
    ) -> Self {
        Self {
            pool,
            extractor,
            scorer,
            max_size_bytes,
        }
    }
}
