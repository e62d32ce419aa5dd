//! Keyword-based suitability scoring.
//!
//! Given extracted document text, match it against a fixed
//! [`KeywordTaxonomy`] and fold per-category results into a single score
//! in `[0, 100]`. Matching is a presence test over distinct terms: a term
//! occurring five times counts once. Scores are real-valued; rounding for
//! display is the caller's concern.
//!
//! A score is expected to always exist once extraction has succeeded, so
//! [`KeywordScorer::score`] absorbs internal failures into `0.0` with a
//! logged diagnostic. The fallible pass is still exposed as
//! [`KeywordScorer::try_score`] so the failure policy stays type-visible.

pub mod error;
pub mod taxonomy;


pub use error::ScoringError;
pub use taxonomy::KeywordTaxonomy;

use tracing::{debug, error};

/// Weight applied per matched term within a category.
pub const CATEGORY_MATCH_WEIGHT: f64 = 20.0;

/// Upper bound for category and final scores.
pub const MAX_SCORE: f64 = 100.0;

/// Per-category outcome of a scoring pass. Ephemeral: computed and
/// discarded within one call.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: String,
    pub matched_terms: usize,
    pub value: f64,
}

/// Scores plain text against a fixed keyword taxonomy.
///
/// The taxonomy is the scorer's only dependency; there is no model state
/// on the scoring path.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    taxonomy: KeywordTaxonomy,
}

impl KeywordScorer {
    pub fn new(taxonomy: KeywordTaxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &KeywordTaxonomy {
        &self.taxonomy
    }

    /// Scores `text`, always returning a value in `[0, 100]`.
    ///
    /// Internal failures are logged and reported as `0.0` instead of
    /// propagating; scoring must never crash the caller.
    pub fn score(&self, text: &str) -> f64 {
        match self.try_score(text) {
            Ok(score) => score,
            Err(e) => {
                error!(error = %e, "scoring failed, reporting zero score");
                0.0
            }
        }
    }

    /// Fallible scoring pass: arithmetic mean of the category scores,
    /// clamped to [`MAX_SCORE`].
    pub fn try_score(&self, text: &str) -> Result<f64, ScoringError> {
        let scores = self.category_scores(text)?;

        let sum: f64 = scores.iter().map(|s| s.value).sum();
        let mean = sum / scores.len() as f64;
        Ok(mean.min(MAX_SCORE))
    }

    /// Computes the per-category breakdown for `text`.
    ///
    /// The text is lowercased once; each category counts the distinct
    /// terms present as substrings and caps at
    /// `min(matched * CATEGORY_MATCH_WEIGHT, MAX_SCORE)`.
    pub fn category_scores(&self, text: &str) -> Result<Vec<CategoryScore>, ScoringError> {
        if self.taxonomy.is_empty() {
            return Err(ScoringError::EmptyTaxonomy);
        }

        let lowered = text.to_lowercase();
        let scores = self
            .taxonomy
            .categories()
            .map(|(name, terms)| {
                let matched = terms
                    .iter()
                    .filter(|term| lowered.contains(term.as_str()))
                    .count();
                let value = (matched as f64 * CATEGORY_MATCH_WEIGHT).min(MAX_SCORE);

                debug!(category = name, matched, value, "category scored");
                CategoryScore {
                    category: name.to_string(),
                    matched_terms: matched,
                    value,
                }
            })
            .collect();

        Ok(scores)
    }
}
