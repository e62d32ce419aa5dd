//! Static category → term data consumed by the scorer.

use super::error::ScoringError;

/// Fixed mapping from category name to lowercase match terms.
///
/// Constructed once at startup, never mutated afterwards; safe to share
/// across requests behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct KeywordTaxonomy {
    categories: Vec<(String, Vec<String>)>,
}

impl KeywordTaxonomy {
    /// Builds a taxonomy, lowercasing and trimming every term.
    pub fn new(categories: Vec<(String, Vec<String>)>) -> Result<Self, ScoringError> {
        if categories.is_empty() {
            return Err(ScoringError::EmptyTaxonomy);
        }

        let mut normalized = Vec::with_capacity(categories.len());
        for (name, terms) in categories {
            if terms.is_empty() {
                return Err(ScoringError::EmptyCategory { category: name });
            }
            let terms: Vec<String> = terms.into_iter().map(|t| t.trim().to_lowercase()).collect();
            if terms.iter().any(|t| t.is_empty()) {
                return Err(ScoringError::BlankTerm { category: name });
            }
            normalized.push((name, terms));
        }

        Ok(Self {
            categories: normalized,
        })
    }

    /// The taxonomy the service ships with.
    pub fn default_categories() -> Self {
        let categories = [
            (
                "ml_skills",
                &["machine learning", "deep learning", "neural networks", "ai"][..],
            ),
            ("python_skills", &["python", "tensorflow", "pytorch", "keras"][..]),
            ("research", &["research", "paper", "publication", "journal"][..]),
            ("math", &["statistics", "mathematics", "algorithms"][..]),
        ];

        let categories = categories
            .into_iter()
            .map(|(name, terms)| {
                (
                    name.to_string(),
                    terms.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();

        // Static data, non-empty by construction.
        Self::new(categories).expect("default taxonomy is valid")
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterates categories in insertion order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, terms)| (name.as_str(), terms.as_slice()))
    }

    #[cfg(test)]
    pub(crate) fn empty_for_tests() -> Self {
        Self {
            categories: Vec::new(),
        }
    }
}
