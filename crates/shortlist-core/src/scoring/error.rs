use thiserror::Error;

/// Errors raised while building or applying a keyword taxonomy.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// A taxonomy with no categories cannot produce a mean.
    #[error("taxonomy has no categories")]
    EmptyTaxonomy,

    /// A category with no terms can never match anything.
    #[error("category '{category}' has no terms")]
    EmptyCategory { category: String },

    /// Blank terms would match every document.
    #[error("category '{category}' contains a blank term")]
    BlankTerm { category: String },
}
