//! Analysis error types.
//!
//! The pipeline has no transient failure modes: every error here is
//! deterministic for a given input and reproduces identically on
//! re-invocation. Callers should present the cause and decline to render
//! partial results.

use thiserror::Error;

/// Errors produced by the scoring and diagnostic pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required column is missing: the identifier column is not in the
    /// table, or a keyed question has no matching response column.
    #[error("schema error: {0}")]
    Schema(String),

    /// No usable answer key could be resolved from the configured source.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// There are zero rows to analyze.
    #[error("empty dataset: {0}")]
    EmptyDataset(String),
}

impl AnalysisError {
    /// Returns `true` if this failure stems from the shape of the input
    /// data rather than how the run was configured.
    pub fn is_data_error(&self) -> bool {
        matches!(self, AnalysisError::Schema(_) | AnalysisError::EmptyDataset(_))
    }
}
