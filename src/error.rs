//! Error types for pose similarity scoring.

use thiserror::Error;

/// Errors from weight derivation and similarity scoring.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoreError {
    /// A frame, vector, weight vector or visibility row has the wrong length.
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// What was being checked, e.g. "reference frame 3"
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Sequence too short for the requested computation.
    #[error("{sequence} sequence needs at least {required} frame(s), got {actual}")]
    InsufficientFrames {
        sequence: &'static str,
        required: usize,
        actual: usize,
    },

    /// No joint moved across the reference sequence.
    #[error("Reference motion is degenerate: total joint displacement is zero")]
    DegenerateReferenceMotion,

    /// Scorer configuration rejected at construction.
    #[error("Invalid scorer configuration: {0}")]
    InvalidConfig(String),
}

impl ScoreError {
    pub(crate) fn shape(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}
