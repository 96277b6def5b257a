//! Timing-reference detection on a digital timing channel.
//!
//! Independent recording subsystems all see the same timing LED. The first
//! sample where the LED channel is positive (rising reference) and the last
//! such sample (falling reference) give a shared time-zero for coarse
//! alignment. Edges are resolved to sample granularity, no interpolation.

use serde::Serialize;

use crate::dataset::{AttrValue, TimeSeriesDataset};
use crate::error::Result;

/// Attribute key of the rising-edge sample index.
pub const RISE_INDEX_ATTR: &str = "timing_rise_index";
/// Attribute key of the rising-edge time.
pub const RISE_TIME_ATTR: &str = "timing_rise_time";
/// Attribute key of the falling-edge sample index.
pub const FALL_INDEX_ATTR: &str = "timing_fall_index";
/// Attribute key of the falling-edge time.
pub const FALL_TIME_ATTR: &str = "timing_fall_time";

/// Edges found on a timing channel.
///
/// When the channel never goes positive all four values are zero and
/// `degenerate` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TimingReference {
    /// Index of the first positive sample.
    pub rise_index: usize,
    /// `Time` at `rise_index`.
    pub rise_time: f64,
    /// Index of the last positive sample.
    pub fall_index: usize,
    /// `Time` at `fall_index`.
    pub fall_time: f64,
    /// True when no positive sample exists and the values above are placeholders.
    pub degenerate: bool,
}

/// Find the timing reference on `channel` and record it in `ds`'s metadata.
///
/// The four values are stored under [`RISE_INDEX_ATTR`], [`RISE_TIME_ATTR`],
/// [`FALL_INDEX_ATTR`] and [`FALL_TIME_ATTR`], replacing any earlier
/// annotation. A channel with no positive sample is not an error: the
/// degenerate reference is stored and returned, and a warning is logged.
///
/// # Errors
///
/// [`Error::UnknownChannel`](crate::Error::UnknownChannel) if the dataset has
/// no such channel.
pub fn detect_timing_reference(ds: &mut TimeSeriesDataset, channel: &str) -> Result<TimingReference> {
    let values = ds.require_channel(channel)?;

    let first = values.iter().position(|&v| v > 0.0);
    let last = values.iter().rposition(|&v| v > 0.0);

    let reference = match (first, last) {
        (Some(rise_index), Some(fall_index)) => TimingReference {
            rise_index,
            rise_time: ds.time[rise_index],
            fall_index,
            fall_time: ds.time[fall_index],
            degenerate: false,
        },
        _ => {
            tracing::warn!(channel, "timing channel has no positive sample, reference set to zero");
            TimingReference {
                degenerate: true,
                ..TimingReference::default()
            }
        }
    };

    tracing::debug!(
        channel,
        rise = reference.rise_index,
        fall = reference.fall_index,
        "timing reference"
    );

    ds.set_attr(RISE_INDEX_ATTR, AttrValue::Scalar(reference.rise_index as f64));
    ds.set_attr(RISE_TIME_ATTR, AttrValue::Scalar(reference.rise_time));
    ds.set_attr(FALL_INDEX_ATTR, AttrValue::Scalar(reference.fall_index as f64));
    ds.set_attr(FALL_TIME_ATTR, AttrValue::Scalar(reference.fall_time));

    Ok(reference)
}
