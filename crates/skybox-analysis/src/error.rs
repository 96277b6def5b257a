//! Error types for spectral and correlation analysis.

use thiserror::Error;

/// Errors raised by the analysis routines.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Too few samples to compute a result.
    #[error("need at least {needed} samples, got {actual}")]
    InsufficientSamples {
        /// Minimum sample count.
        needed: usize,
        /// Samples available.
        actual: usize,
    },

    /// Sample rate is zero, negative or not finite.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    /// A signal's values and time stamps have different lengths.
    #[error("signal has {values} values but {time} time stamps")]
    LengthMismatch {
        /// Number of values.
        values: usize,
        /// Number of time stamps.
        time: usize,
    },

    /// A signal has no variance after mean removal, so correlation is undefined.
    #[error("signal is constant, correlation is undefined")]
    FlatSignal,

    /// Dataset lookup failed.
    #[error(transparent)]
    Dataset(#[from] skybox_core::Error),
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
