//! Error types for the extraction engine.
//!
//! Expected irregularities — missing fields, unparseable webhook JSON,
//! ambiguous kind — never surface here; extractors resolve them into
//! sentinels or structured invalid records. Only faults the extractors
//! cannot answer for become an `ExtractError`, which the assembler maps
//! into a failure envelope.

/// Extractor-level failure.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Input too large: {size} bytes exceeds limit of {max}")]
    InputTooLarge { size: usize, max: usize },
}
