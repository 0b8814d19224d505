// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Most of the crate propagates anyhow::Error. These variants
// exist where a caller needs to tell one failure apart from
// the rest.

use std::path::PathBuf;
use thiserror::Error;

/// Structural problems in a scene annotation file
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// The top-level array had no elements
    #[error("annotation file {path} is empty; expected a non-empty array")]
    EmptyAnnotation { path: PathBuf },

    /// `correct` names an option that the question does not have
    #[error("scene {scene}, question {index}: answer '{answer}' has no matching option")]
    AnswerWithoutOption {
        scene:  String,
        index:  usize,
        answer: String,
    },
}

/// Invalid generation settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid vision settings: {0}")]
    InvalidVision(String),
}
