//! Error types for record normalization and dataset operations.

use thiserror::Error;

/// Errors raised while normalizing records or operating on datasets.
///
/// Every variant describes a structural mistake in the input or the call,
/// never a transient condition, so none of them are worth retrying.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The structured record carries no field-name metadata and cannot be classified.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A raw array's element count does not match the product of its shape.
    #[error("field '{field}' has {actual} elements but its shape implies {expected}")]
    ShapeMismatch {
        /// Name of the offending field.
        field: String,
        /// Element count implied by the shape.
        expected: usize,
        /// Element count actually stored.
        actual: usize,
    },

    /// A record promoted to a dataset has no `Time` field.
    #[error("record has no 'Time' field")]
    MissingTimeField,

    /// The `Time` coordinate decreases somewhere.
    #[error("'Time' is not monotonically non-decreasing at sample {index}")]
    NonMonotonicTime {
        /// First sample index whose value is smaller than its predecessor.
        index: usize,
    },

    /// A channel's length differs from the length of `Time`.
    #[error("channel '{channel}' has {actual} samples but 'Time' has {expected}")]
    ChannelLength {
        /// Channel name.
        channel: String,
        /// Length of `Time`.
        expected: usize,
        /// Length of the channel.
        actual: usize,
    },

    /// A field that must be numeric (a catalog channel or `Time`) holds text.
    #[error("field '{0}' holds text where numbers are required")]
    TextChannel(String),

    /// The named channel does not exist in the dataset.
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    /// The tare window selects no samples.
    #[error("calibration window [{start_time}, {end_time}] selects no samples")]
    EmptyCalibrationWindow {
        /// Requested window start in seconds.
        start_time: f64,
        /// Requested window end in seconds.
        end_time: f64,
    },
}

/// Convenience result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
