use thiserror::Error;

/// Failure modes of PDF text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The payload is not a structurally valid PDF.
    #[error("malformed document: {reason}")]
    MalformedDocument { reason: String },

    /// Structurally valid document whose pages carry no usable text.
    #[error("document contains no extractable text")]
    NoExtractableText,
}
