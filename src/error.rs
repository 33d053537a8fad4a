// ============================================================
// Error Taxonomy
// ============================================================
// Every failure the core can produce is one of these variants.
// None of them are retried: the same bad dataset or the same
// broken artifact fails the same way every time.
//
//   DataFormat   — training CSV is malformed (fatal to `train`)
//   ArtifactLoad — persisted model missing/corrupt/mismatched
//   EmptyInput   — predict called with no usable symptoms
//   Io           — writing artifacts failed
//
// The application and CLI layers wrap these in anyhow with
// extra context; the core itself stays on this typed enum so
// callers can match on the variant.

use std::io;

use thiserror::Error;

/// Errors raised by the classification pipeline.
#[derive(Error, Debug)]
pub enum SymptomError {
    /// The training dataset cannot be parsed into fixed-width rows.
    #[error("data format error: {0}")]
    DataFormat(String),

    /// The vectorizer/classifier pair cannot be loaded or does not fit together.
    #[error("artifact load error: {0}")]
    ArtifactLoad(String),

    /// No symptoms were supplied to `predict`.
    #[error("no symptoms supplied")]
    EmptyInput,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SymptomError {
    pub fn data_format(msg: impl Into<String>) -> Self {
        SymptomError::DataFormat(msg.into())
    }

    pub fn artifact_load(msg: impl Into<String>) -> Self {
        SymptomError::ArtifactLoad(msg.into())
    }
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, SymptomError>;
