//! Rate conversion for bringing two recordings onto a common sample rate.
//!
//! Two strategies, deliberately kept separate because they give different
//! numbers:
//!
//! - **Bin averaging** (downsampling): input samples are grouped into
//!   fixed-width bins of `source_rate / target_rate` samples and each bin is
//!   replaced by its mean. The mean doubles as a crude anti-alias filter.
//! - **Linear interpolation** (upsampling): the signal is evaluated on a
//!   regular grid at the target rate starting at its first time stamp,
//!   interpolating linearly between neighbouring samples. New samples are
//!   synthesized, which buys finer lag resolution.
//!
//! # Example
//!
//! ```rust
//! use skybox_analysis::resample::{bin_average, linear_resample};
//!
//! // 4 samples at 100 Hz → 2 bins at 50 Hz
//! assert_eq!(bin_average(&[1.0, 3.0, 5.0, 7.0], 100.0, 50.0), vec![2.0, 6.0]);
//!
//! // 3 samples at 1 Hz → 5 samples at 2 Hz
//! let up = linear_resample(&[0.0, 2.0, 4.0], &[0.0, 1.0, 2.0], 2.0);
//! assert_eq!(up, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
//! ```

use serde::{Deserialize, Serialize};

/// How two signals at different rates are brought to a common rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResamplePolicy {
    /// Bin-average both signals down to the lower of the two rates.
    #[default]
    Downsample,
    /// Linearly interpolate both signals up to the higher of the two rates.
    Upsample,
}

impl ResamplePolicy {
    /// The common rate this policy targets for the given pair.
    pub fn target_rate(self, rate1: f64, rate2: f64) -> f64 {
        match self {
            ResamplePolicy::Downsample => rate1.min(rate2),
            ResamplePolicy::Upsample => rate1.max(rate2),
        }
    }
}

/// Relative tolerance under which two sample rates count as the same rate.
///
/// Rates derived from a time axis as `(n - 1) / (t_last - t_first)` carry
/// rounding noise of a few ulps, e.g. `49.99999999999999` for 50 Hz.
pub const RATE_TOLERANCE: f64 = 1e-9;

/// True if `a` and `b` agree within [`RATE_TOLERANCE`].
pub fn rates_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= RATE_TOLERANCE * a.abs().max(b.abs())
}

impl std::str::FromStr for ResamplePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "downsample" | "down" => Ok(ResamplePolicy::Downsample),
            "upsample" | "up" => Ok(ResamplePolicy::Upsample),
            other => Err(format!(
                "unknown resample policy '{other}' (expected downsample or upsample)"
            )),
        }
    }
}

/// Downsample by averaging consecutive samples into fixed-width bins.
///
/// Sample `i` falls in bin `floor(i · target_rate / source_rate)`, where a
/// position within [`RATE_TOLERANCE`] below a bin boundary counts as on it.
/// Since the bin width is at least one sample every bin is populated; the
/// last bin may be partial. If `target_rate` is not lower than `source_rate`
/// (within tolerance) the input is returned as is.
pub fn bin_average(signal: &[f64], source_rate: f64, target_rate: f64) -> Vec<f64> {
    if signal.is_empty() || target_rate >= source_rate || rates_match(source_rate, target_rate) {
        return signal.to_vec();
    }

    let bin_of = |i: usize| {
        let pos = i as f64 * target_rate / source_rate;
        (pos + pos * RATE_TOLERANCE).floor() as usize
    };
    let bins = bin_of(signal.len() - 1) + 1;
    let mut sums = vec![0.0; bins];
    let mut counts = vec![0usize; bins];

    for (i, &v) in signal.iter().enumerate() {
        let b = bin_of(i).min(bins - 1);
        sums[b] += v;
        counts[b] += 1;
    }

    sums.iter()
        .zip(&counts)
        .map(|(&s, &c)| s / c.max(1) as f64)
        .collect()
}

/// Resample onto a regular grid at `target_rate` by linear interpolation.
///
/// The grid starts at `time[0]` and covers `[time[0], time[last]]`. Repeated
/// time stamps are skipped over. `values` and `time` must have equal length.
pub fn linear_resample(values: &[f64], time: &[f64], target_rate: f64) -> Vec<f64> {
    let n = values.len().min(time.len());
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![values[0]];
    }

    let t0 = time[0];
    let span = time[n - 1] - t0;
    // tolerance keeps the last grid point when span·rate is an integer up to rounding
    let count = (span * target_rate + 1e-9).floor() as usize + 1;
    let dt = 1.0 / target_rate;

    let mut out = Vec::with_capacity(count);
    let mut i = 0usize;
    for k in 0..count {
        let t = (t0 + k as f64 * dt).min(time[n - 1]);
        while i + 2 < n && time[i + 1] <= t {
            i += 1;
        }
        let (ta, tb) = (time[i], time[i + 1]);
        let frac = if tb > ta {
            ((t - ta) / (tb - ta)).clamp(0.0, 1.0)
        } else {
            1.0
        };
        out.push(values[i] + (values[i + 1] - values[i]) * frac);
    }
    out
}
