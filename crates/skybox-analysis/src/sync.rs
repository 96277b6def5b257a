//! Time-lag estimation between two recordings by cross-correlation.
//!
//! The two signals are brought to a common rate according to a
//! [`ResamplePolicy`], truncated to a common length `N`, mean-centered and
//! correlated over every lag in `-(N-1) ..= N-1`. The lag of the global
//! maximum of the normalized correlation, divided by the common rate, is the
//! estimated shift. Every local maximum within 90 % of the global one is
//! reported alongside, so a caller can spot periodic or ambiguous alignment.
//!
//! A positive shift means the second signal is delayed relative to the first:
//! `sig2(t) ≈ sig1(t - best_shift)`.

use serde::Serialize;
use skybox_core::TimeSeriesDataset;

use crate::error::{AnalysisError, Result};
use crate::resample::{ResamplePolicy, bin_average, linear_resample, rates_match};
use crate::xcorr::{argmax, lag_of, local_maxima, xcorr_normalized_full};

/// Fraction of the global maximum a secondary peak must reach.
pub const SECONDARY_PEAK_RATIO: f64 = 0.9;

/// One single-channel recording borrowed from its owner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal<'a> {
    /// Sample values.
    pub values: &'a [f64],
    /// Time stamps in seconds, one per value.
    pub time: &'a [f64],
    /// Nominal sample rate in Hz.
    pub sample_rate: f64,
}

impl<'a> Signal<'a> {
    /// Wrap values, time stamps and a sample rate.
    pub fn new(values: &'a [f64], time: &'a [f64], sample_rate: f64) -> Self {
        Self {
            values,
            time,
            sample_rate,
        }
    }

    /// Borrow `channel` from a dataset.
    ///
    /// Without an explicit `sample_rate` the rate is derived from the
    /// dataset's time axis.
    pub fn from_dataset(
        ds: &'a TimeSeriesDataset,
        channel: &str,
        sample_rate: Option<f64>,
    ) -> Result<Self> {
        let values = ds.require_channel(channel)?;
        let sample_rate = match sample_rate.or_else(|| ds.sample_rate()) {
            Some(rate) => rate,
            None => {
                return Err(AnalysisError::InsufficientSamples {
                    needed: 2,
                    actual: ds.len(),
                });
            }
        };
        Ok(Self::new(values, ds.time(), sample_rate))
    }

    /// Check the rate and that values and time stamps pair up.
    pub fn validate(&self) -> Result<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(AnalysisError::InvalidSampleRate(self.sample_rate));
        }
        if self.values.len() != self.time.len() {
            return Err(AnalysisError::LengthMismatch {
                values: self.values.len(),
                time: self.time.len(),
            });
        }
        Ok(())
    }
}

/// Outcome of [`estimate_shift`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftEstimate {
    /// Lag of the correlation maximum in seconds.
    pub best_shift: f64,
    /// Lags in seconds of every local maximum at or above 90 % of the global maximum.
    pub all_peak_shifts: Vec<f64>,
    /// Common rate the correlation was computed at, in Hz.
    pub sample_rate: f64,
    /// Normalized correlation at `best_shift`.
    pub peak_correlation: f64,
    /// Samples per signal after resampling and truncation.
    pub common_len: usize,
}

impl ShiftEstimate {
    /// `best_shift` expressed in samples at the common rate.
    pub fn best_lag(&self) -> isize {
        (self.best_shift * self.sample_rate).round() as isize
    }
}

/// Estimate how far `sig2` lags behind `sig1`.
///
/// When the two rates agree within
/// [`RATE_TOLERANCE`](crate::resample::RATE_TOLERANCE) no resampling takes
/// place and `policy` is irrelevant. Otherwise [`ResamplePolicy::Downsample`] bin-averages both to
/// the lower rate and [`ResamplePolicy::Upsample`] linearly interpolates both
/// to the higher one. The two can disagree by up to a sample period.
///
/// # Errors
///
/// - [`AnalysisError::InvalidSampleRate`] / [`AnalysisError::LengthMismatch`]
///   for a malformed input signal.
/// - [`AnalysisError::InsufficientSamples`] if fewer than two samples are
///   left after resampling and truncation.
/// - [`AnalysisError::FlatSignal`] if either signal is constant.
pub fn estimate_shift(
    sig1: &Signal<'_>,
    sig2: &Signal<'_>,
    policy: ResamplePolicy,
) -> Result<ShiftEstimate> {
    sig1.validate()?;
    sig2.validate()?;

    let (mut a, mut b, rate) = common_rate(sig1, sig2, policy);

    let n = a.len().min(b.len());
    if n < 2 {
        return Err(AnalysisError::InsufficientSamples {
            needed: 2,
            actual: n,
        });
    }
    a.truncate(n);
    b.truncate(n);
    center(&mut a);
    center(&mut b);

    let corr = xcorr_normalized_full(&a, &b).ok_or(AnalysisError::FlatSignal)?;
    let (best_idx, peak_correlation) = argmax(&corr).ok_or(AnalysisError::FlatSignal)?;
    let best_shift = lag_of(best_idx, n) as f64 / rate;

    let all_peak_shifts: Vec<f64> = local_maxima(&corr, SECONDARY_PEAK_RATIO * peak_correlation)
        .into_iter()
        .map(|i| lag_of(i, n) as f64 / rate)
        .collect();

    tracing::info!(
        best_shift,
        peak_correlation,
        peaks = all_peak_shifts.len(),
        common_len = n,
        rate_hz = rate,
        "estimated time shift"
    );

    Ok(ShiftEstimate {
        best_shift,
        all_peak_shifts,
        sample_rate: rate,
        peak_correlation,
        common_len: n,
    })
}

/// Both signals at one rate, plus that rate.
fn common_rate(
    sig1: &Signal<'_>,
    sig2: &Signal<'_>,
    policy: ResamplePolicy,
) -> (Vec<f64>, Vec<f64>, f64) {
    let (r1, r2) = (sig1.sample_rate, sig2.sample_rate);
    if rates_match(r1, r2) {
        return (sig1.values.to_vec(), sig2.values.to_vec(), r1);
    }

    let target = policy.target_rate(r1, r2);
    tracing::debug!(
        ?policy,
        rate1_hz = r1,
        rate2_hz = r2,
        target_hz = target,
        "resampling to common rate"
    );

    let (a, b) = match policy {
        ResamplePolicy::Downsample => (
            bin_average(sig1.values, r1, target),
            bin_average(sig2.values, r2, target),
        ),
        ResamplePolicy::Upsample => (
            linear_resample(sig1.values, sig1.time, target),
            linear_resample(sig2.values, sig2.time, target),
        ),
    };
    (a, b, target)
}

fn center(values: &mut [f64]) {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    for v in values.iter_mut() {
        *v -= mean;
    }
}
