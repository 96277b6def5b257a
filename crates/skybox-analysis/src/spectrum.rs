//! Single-sided amplitude and power spectra.
//!
//! For a real signal of even length N sampled at `fs`:
//!
//! ```text
//! f[k]   = k · fs / N                      k = 0 ..= N/2
//! A[k]   = |X[k]| / N · (2 if 0 < k < N/2 else 1)
//! S[k]   = A[k]² / 2 / Δf                  Δf = fs / N
//! ```
//!
//! Doubling every bin except DC and Nyquist folds the negative-frequency
//! half into the positive one, so a sinusoid of amplitude `a` on a bin
//! reads `a` in `A`. Odd-length input drops its last sample first.

use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::fft::Fft;

/// Frequency axis with single-sided amplitude and power spectral density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumResult {
    /// Bin frequencies in Hz, DC to Nyquist.
    pub frequencies: Vec<f64>,
    /// Single-sided amplitude per bin, in signal units.
    pub amplitude: Vec<f64>,
    /// Single-sided power spectral density per bin, in units²/Hz.
    pub psd: Vec<f64>,
}

impl SpectrumResult {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns true if there are no bins.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Bin spacing in Hz.
    pub fn resolution(&self) -> f64 {
        self.frequencies[1] - self.frequencies[0]
    }

    /// Index of the bin closest to `freq`.
    pub fn bin_for(&self, freq: f64) -> usize {
        ((freq / self.resolution()).round().max(0.0) as usize).min(self.len() - 1)
    }

    /// Frequency and amplitude of the strongest non-DC bin.
    pub fn dominant(&self) -> Option<(f64, f64)> {
        self.amplitude
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(k, &a)| (self.frequencies[k], a))
    }
}

/// Compute the single-sided spectrum of `signal` sampled at `sample_rate` Hz.
///
/// # Errors
///
/// - [`AnalysisError::InvalidSampleRate`] if the rate is not a positive finite number.
/// - [`AnalysisError::InsufficientSamples`] if fewer than two samples remain
///   after truncating to even length.
pub fn spectrum(signal: &[f64], sample_rate: f64) -> Result<SpectrumResult> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(AnalysisError::InvalidSampleRate(sample_rate));
    }

    let n = signal.len() / 2 * 2;
    if n == 0 {
        return Err(AnalysisError::InsufficientSamples {
            needed: 2,
            actual: signal.len(),
        });
    }

    let resolution = sample_rate / n as f64;
    tracing::debug!(
        samples = n,
        resolution_hz = resolution,
        nyquist_hz = sample_rate / 2.0,
        "single-sided spectrum"
    );

    let half = n / 2;
    let bins = Fft::new(n).forward(&signal[..n]);

    let mut amplitude: Vec<f64> = bins.iter().map(|c| c.norm() / n as f64).collect();
    for a in &mut amplitude[1..half] {
        *a *= 2.0;
    }

    let frequencies = (0..=half).map(|k| k as f64 * resolution).collect();
    let psd = amplitude.iter().map(|a| a * a / 2.0 / resolution).collect();

    Ok(SpectrumResult {
        frequencies,
        amplitude,
        psd,
    })
}
